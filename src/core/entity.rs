use std::f64::consts::TAU;
use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{Error, Result};

/// Stable identifier issued by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Wrap a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric id.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind discriminator without payload, used in snapshots and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTag {
    Ship,
    Bullet,
}

/// A bullet sitting in a ship's magazine. It has no position until fired.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedBullet {
    pub(crate) id: EntityId,
    radius: f64,
    mass: f64,
}

impl LoadedBullet {
    pub(crate) fn new(id: EntityId, radius: f64, mass: f64) -> Self {
        Self { id, radius, mass }
    }

    /// Id the bullet will carry once fired.
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mass carried by the ship while loaded.
    pub fn mass(&self) -> f64 {
        self.mass
    }
}

/// Ship-specific state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    orientation: f64,
    thruster_active: bool,
    magazine: Vec<LoadedBullet>,
    hits_taken: u32,
}

impl Ship {
    /// Orientation in radians, normalized to [0, 2π).
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// Unit vector along the orientation.
    pub fn heading(&self) -> DVec2 {
        DVec2::from_angle(self.orientation)
    }

    /// Whether the thruster is accelerating the ship.
    pub fn thruster_active(&self) -> bool {
        self.thruster_active
    }

    /// Magazine contents; the last entry is fired first.
    pub fn loaded_bullets(&self) -> &[LoadedBullet] {
        &self.magazine
    }

    /// Foreign bullet hits absorbed so far.
    pub fn hits_taken(&self) -> u32 {
        self.hits_taken
    }

    pub(crate) fn turn(&mut self, angle: f64) {
        self.orientation = normalize_angle(self.orientation + angle);
    }

    pub(crate) fn set_thruster_active(&mut self, active: bool) {
        self.thruster_active = active;
    }

    pub(crate) fn load(&mut self, bullet: LoadedBullet) {
        self.magazine.push(bullet);
    }

    /// Take the most recently loaded bullet.
    pub(crate) fn unload(&mut self) -> Option<LoadedBullet> {
        self.magazine.pop()
    }

    /// Count a hit; returns the new total.
    pub(crate) fn record_hit(&mut self) -> u32 {
        self.hits_taken = self.hits_taken.saturating_add(1);
        self.hits_taken
    }

    fn cargo_mass(&self) -> f64 {
        self.magazine.iter().map(LoadedBullet::mass).sum()
    }
}

/// Bullet-specific state.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    source: Option<EntityId>,
    bounces: u32,
}

impl Bullet {
    /// The ship that fired this bullet, if any. The ship may no longer be alive.
    pub fn source(&self) -> Option<EntityId> {
        self.source
    }

    /// Wall bounces so far.
    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    /// Count a wall bounce; returns the new total.
    pub(crate) fn bounce(&mut self) -> u32 {
        self.bounces = self.bounces.saturating_add(1);
        self.bounces
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Ship(Ship),
    Bullet(Bullet),
}

/// A circular rigid body in the arena.
///
/// Radius and hull mass are fixed at construction. Velocity is kept within the
/// configured speed cap by every mutator that can raise it. `revision` is bumped
/// each time the entity takes part in a realized event or receives a command, which
/// invalidates its queued predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    mass: f64,
    kind: EntityKind,
    revision: u64,
}

impl Entity {
    /// Create a ship after validating position, radius, orientation and speed.
    ///
    /// A velocity with a non-finite component is replaced by zero rather than
    /// rejected. A finite velocity faster than the cap is an error.
    pub fn ship(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        orientation: f64,
        cfg: &SimConfig,
    ) -> Result<Self> {
        if !orientation.is_finite() {
            return Err(Error::InvalidParam("orientation must be finite".into()));
        }
        let vel = validate_body(pos, vel, radius, cfg.min_ship_radius, cfg.max_speed)?;
        Ok(Self {
            pos,
            vel,
            radius,
            mass: cfg.ship_mass(radius),
            kind: EntityKind::Ship(Ship {
                orientation: normalize_angle(orientation),
                thruster_active: false,
                magazine: Vec::new(),
                hits_taken: 0,
            }),
            revision: 0,
        })
    }

    /// Create a free bullet with no source.
    pub fn bullet(pos: DVec2, vel: DVec2, radius: f64, cfg: &SimConfig) -> Result<Self> {
        let vel = validate_body(pos, vel, radius, cfg.min_bullet_radius, cfg.max_speed)?;
        Ok(Self {
            pos,
            vel,
            radius,
            mass: cfg.bullet_mass(radius),
            kind: EntityKind::Bullet(Bullet {
                source: None,
                bounces: 0,
            }),
            revision: 0,
        })
    }

    /// Turn a loaded bullet into a free body fired by `source`.
    pub(crate) fn fired(loaded: &LoadedBullet, pos: DVec2, vel: DVec2, source: EntityId) -> Self {
        Self {
            pos,
            vel,
            radius: loaded.radius,
            mass: loaded.mass,
            kind: EntityKind::Bullet(Bullet {
                source: Some(source),
                bounces: 0,
            }),
            revision: 0,
        }
    }

    /// Center position.
    #[inline]
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    /// Velocity (km/s).
    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    /// Radius, fixed at construction.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Effective mass: the hull plus, for ships, every loaded bullet.
    pub fn mass(&self) -> f64 {
        match &self.kind {
            EntityKind::Ship(ship) => self.mass + ship.cargo_mass(),
            EntityKind::Bullet(_) => self.mass,
        }
    }

    /// Kind-specific payload.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Ship or bullet, without the payload.
    pub fn tag(&self) -> EntityTag {
        match self.kind {
            EntityKind::Ship(_) => EntityTag::Ship,
            EntityKind::Bullet(_) => EntityTag::Bullet,
        }
    }

    /// Ship payload, or `None` for a bullet.
    pub fn as_ship(&self) -> Option<&Ship> {
        match &self.kind {
            EntityKind::Ship(ship) => Some(ship),
            EntityKind::Bullet(_) => None,
        }
    }

    pub(crate) fn as_ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.kind {
            EntityKind::Ship(ship) => Some(ship),
            EntityKind::Bullet(_) => None,
        }
    }

    /// Bullet payload, or `None` for a ship.
    pub fn as_bullet(&self) -> Option<&Bullet> {
        match &self.kind {
            EntityKind::Bullet(bullet) => Some(bullet),
            EntityKind::Ship(_) => None,
        }
    }

    pub(crate) fn as_bullet_mut(&mut self) -> Option<&mut Bullet> {
        match &mut self.kind {
            EntityKind::Bullet(bullet) => Some(bullet),
            EntityKind::Ship(_) => None,
        }
    }

    /// Revision counter used to invalidate queued events.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub(crate) fn bump_revision(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }

    /// Move along the current velocity for `dt` time units.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidParam(format!(
                "advance duration must be finite and >= 0, got {dt}"
            )));
        }
        self.pos += self.vel * dt;
        Ok(())
    }

    /// Move for `dt` under constant acceleration `accel`, never exceeding `max_speed`.
    ///
    /// Once the speed reaches the cap the rest of the interval is covered at that
    /// velocity, so splitting `dt` gives the same result as one call.
    pub(crate) fn advance_accelerating(
        &mut self,
        accel: DVec2,
        dt: f64,
        max_speed: f64,
    ) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidParam(format!(
                "advance duration must be finite and >= 0, got {dt}"
            )));
        }
        if !accel.is_finite() {
            return Err(Error::MathError("acceleration became non-finite".into()));
        }
        let aa = accel.length_squared();
        if aa == 0.0 {
            return self.advance(dt);
        }

        // Time until |v + a t| reaches the cap; the constant term is <= 0.
        let va = self.vel.dot(accel);
        let c = self.vel.length_squared() - max_speed * max_speed;
        let disc = (va * va - aa * c).max(0.0);
        let to_cap = ((-va + disc.sqrt()) / aa).max(0.0);

        let t1 = dt.min(to_cap);
        self.pos += self.vel * t1 + 0.5 * accel * t1 * t1;
        self.vel = cap_speed(self.vel + accel * t1, max_speed);
        if dt > t1 {
            self.pos += self.vel * (dt - t1);
        }
        Ok(())
    }

    pub(crate) fn set_position(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    /// Set velocity, scaling it down onto the speed cap if needed.
    pub(crate) fn set_velocity_capped(&mut self, vel: DVec2, max_speed: f64) -> Result<()> {
        if !vel.is_finite() {
            return Err(Error::MathError("velocity became non-finite".into()));
        }
        self.vel = cap_speed(vel, max_speed);
        Ok(())
    }

    /// Kinetic energy 1/2 m |v|^2 using the effective mass.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass() * self.vel.length_squared()
    }

    /// Momentum m v using the effective mass.
    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass()
    }

    /// Whether the bodies overlap by more than a relative tolerance.
    pub fn overlaps(&self, other: &Entity, offset: DVec2) -> bool {
        let d = other.pos + offset - self.pos;
        let s = self.radius + other.radius;
        d.length_squared() < s * s * (1.0 - OVERLAP_TOLERANCE)
    }
}

/// Relative slack on the squared contact distance before two bodies count as overlapping.
pub const OVERLAP_TOLERANCE: f64 = 1e-6;

/// Normalize an angle to [0, 2π).
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU {
        0.0
    } else {
        a
    }
}

#[inline]
pub(crate) fn cap_speed(vel: DVec2, max_speed: f64) -> DVec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel * (max_speed / speed)
    } else {
        vel
    }
}

fn validate_body(
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    min_radius: f64,
    max_speed: f64,
) -> Result<DVec2> {
    if !radius.is_finite() || radius < min_radius {
        return Err(Error::InvalidParam(format!(
            "radius must be finite and >= {min_radius}, got {radius}"
        )));
    }
    if !pos.is_finite() {
        return Err(Error::InvalidParam("position must be finite".into()));
    }
    let vel = if vel.is_finite() {
        vel
    } else {
        log::debug!("non-finite velocity {vel} reset to zero");
        DVec2::ZERO
    };
    if vel.length() > max_speed {
        return Err(Error::InvalidParam(format!(
            "speed {} exceeds the cap of {max_speed}",
            vel.length()
        )));
    }
    Ok(vel)
}
