use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use glam::DVec2;

use crate::config::{EmptyMagazinePolicy, SimConfig};
use crate::core::arena::{Arena, Boundary, Wall};
use crate::core::entity::{cap_speed, Entity, EntityId, EntityTag, LoadedBullet};
use crate::core::event::{Event, EventKind};
use crate::core::predict::{self, Contact};
use crate::core::resolve::{self, Effect};
use crate::core::scheduler::Scheduler;
use crate::core::snapshot::{EntitySnapshot, Snapshot};
use crate::error::{Error, Result};
use crate::observe::{LogObserver, Observer, Resolution};

/// Summary of one `evolve` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvolveReport {
    /// Events resolved during the call.
    pub events: usize,
    /// Entities destroyed during the call, in order.
    pub destroyed: Vec<EntityId>,
}

/// What happened when a ship fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// The bullet entered the arena.
    Launched(EntityId),
    /// Nothing was loaded and the configuration says to ignore the request.
    Empty,
    /// The bullet would have spawned outside the arena and was destroyed.
    Lost,
    /// The bullet spawned on top of `target` and the contact was resolved at once.
    Impact { target: EntityId },
}

/// The arena and everything flying in it.
///
/// All mutation goes through `&mut self`, so commands can only land between
/// `evolve` calls. Event times in the queue are absolute.
pub struct World {
    time_now: f64,
    arena: Arena,
    config: SimConfig,
    entities: BTreeMap<EntityId, Entity>,
    terminated: BTreeSet<EntityId>,
    next_id: u32,
    scheduler: Scheduler,
    observer: Box<dyn Observer>,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("time_now", &self.time_now)
            .field("arena", &self.arena)
            .field("entities", &self.entities.len())
            .field("queued", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}

impl World {
    /// Empty world reporting to a [`LogObserver`].
    pub fn new(arena: Arena, config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            time_now: 0.0,
            arena,
            config,
            entities: BTreeMap::new(),
            terminated: BTreeSet::new(),
            next_id: 0,
            scheduler: Scheduler::new(),
            observer: Box::new(LogObserver),
        })
    }

    /// Replace the observer.
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Returns current simulation time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// The arena bodies move in.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Constants and policies the world was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity is live.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// A live entity, or `None` if it was never added, was destroyed, or is loaded on a ship.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Live entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(&id, e)| (id, e))
    }

    /// Whether `id` was destroyed or removed.
    pub fn is_terminated(&self, id: EntityId) -> bool {
        self.terminated.contains(&id)
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.entities.values().map(Entity::kinetic_energy).sum()
    }

    /// Total momentum (diagnostic).
    pub fn momentum(&self) -> DVec2 {
        self.entities.values().map(Entity::momentum).sum()
    }

    /// Immutable copy of every live entity.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time_now,
            entities: self
                .entities
                .iter()
                .map(|(&id, e)| EntitySnapshot::of(id, e))
                .collect(),
        }
    }

    /// Insert an entity into the live set.
    ///
    /// Errors:
    /// - `Error::OutOfBounds` if it does not fit inside the arena.
    /// - `Error::Overlapping` if it overlaps a live entity (the new id is reported as `a`).
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId> {
        if !self.arena.contains(entity.position(), entity.radius()) {
            return Err(Error::OutOfBounds(format!(
                "entity at {} with radius {} does not fit in a {} x {} arena",
                entity.position(),
                entity.radius(),
                self.arena.width(),
                self.arena.height()
            )));
        }
        let id = EntityId::new(self.next_id);
        if let Some(other) = self.first_overlap(&entity, None) {
            return Err(Error::Overlapping { a: id, b: other });
        }
        self.next_id += 1;
        self.entities.insert(id, entity);
        self.schedule_for(&[id])?;
        Ok(id)
    }

    /// Take an entity out of the live set for good.
    ///
    /// A removed ship takes its magazine with it; the loaded bullets are
    /// terminated too.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity> {
        let entity = self.entities.remove(&id).ok_or_else(|| self.missing(id))?;
        self.terminated.insert(id);
        if let Some(ship) = entity.as_ship() {
            self.terminated
                .extend(ship.loaded_bullets().iter().map(LoadedBullet::id));
        }
        Ok(entity)
    }

    /// Relative time until `a` and `b` touch, or `None` if they never will.
    ///
    /// Pure prediction: a bullet and its own source are still reported.
    pub fn time_to_collision(&self, a: EntityId, b: EntityId) -> Result<Option<f64>> {
        if a == b {
            return Err(Error::SameEntity(a));
        }
        let (ea, eb) = self.pair(a, b)?;
        Ok(self.earliest_contact(a, ea, b, eb)?.map(|(t, _)| t))
    }

    /// Point where `a` and `b` will first touch, or `None` if they never will.
    ///
    /// The point lies on the line of centers at `a`'s radius from `a`'s center,
    /// using the nearest periodic image of `b` when the arena wraps.
    pub fn collision_position(&self, a: EntityId, b: EntityId) -> Result<Option<DVec2>> {
        if a == b {
            return Err(Error::SameEntity(a));
        }
        let (ea, eb) = self.pair(a, b)?;
        let Some((t, offset)) = self.earliest_contact(a, ea, b, eb)? else {
            return Ok(None);
        };
        let pa = ea.position() + ea.velocity() * t;
        let pb = eb.position() + offset + eb.velocity() * t;
        let n = (pb - pa).try_normalize().ok_or_else(|| {
            Error::MathError(format!("{a} and {b} would touch with coincident centers"))
        })?;
        let point = pa + n * ea.radius();
        Ok(Some(match self.arena.boundary() {
            Boundary::Reflect => point,
            Boundary::Wrap => point.rem_euclid(self.arena.size()),
        }))
    }

    /// Signed gap between the rims of `a` and `b`; negative when they overlap.
    pub fn distance_between(&self, a: EntityId, b: EntityId) -> Result<f64> {
        if a == b {
            return Err(Error::SameEntity(a));
        }
        let (ea, eb) = self.pair(a, b)?;
        let d = self.arena.displacement(ea.position(), eb.position());
        Ok(d.length() - (ea.radius() + eb.radius()))
    }

    /// Whether `a` and `b` overlap. An entity always overlaps itself.
    pub fn overlap(&self, a: EntityId, b: EntityId) -> Result<bool> {
        let ea = self.entities.get(&a).ok_or_else(|| self.missing(a))?;
        if a == b {
            return Ok(true);
        }
        let eb = self.entities.get(&b).ok_or_else(|| self.missing(b))?;
        Ok(self
            .arena
            .image_offsets()
            .into_iter()
            .any(|off| ea.overlaps(eb, off)))
    }

    /// Relative time until `id` reaches an arena edge.
    pub fn time_to_wall(&self, id: EntityId) -> Result<Option<(f64, Wall)>> {
        let e = self.entities.get(&id).ok_or_else(|| self.missing(id))?;
        Ok(predict::time_to_wall(e, &self.arena))
    }

    /// Advance the simulation by `duration`, resolving every contact on the way.
    ///
    /// Every entity is drifted to each event time, the event is resolved, and
    /// only the entities it touched are rescheduled. Ships with an active thruster
    /// accelerate continuously; while any is on, drifting stops on the absolute
    /// `thrust_step` grid so their straight-line predictions stay fresh. The grid
    /// is absolute, so splitting a call into shorter ones gives the same motion.
    pub fn evolve(&mut self, duration: f64) -> Result<EvolveReport> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidParam(format!(
                "evolve duration must be finite and >= 0, got {duration}"
            )));
        }
        let target = self.time_now + duration;
        let mut report = EvolveReport::default();

        loop {
            let stop = self.segment_end(target);
            let entities = &self.entities;
            let revision = |id: EntityId| entities.get(&id).map(Entity::revision);
            let due = matches!(
                self.scheduler.peek_valid(revision),
                Some(ev) if ev.time_f64() <= stop
            );
            if !due {
                // No more events in this segment; drift to its end
                self.drift_all(stop)?;
                if stop >= target {
                    break;
                }
                continue;
            }
            let Some(ev) = self.scheduler.pop_next(revision) else {
                continue;
            };

            let t_ev = ev.time_f64().clamp(self.time_now, stop);
            self.drift_all(t_ev)?;
            let destroyed = self.resolve(ev)?;
            report.events += 1;
            report.destroyed.extend(destroyed);
        }

        Ok(report)
    }

    /// Rebuild the event queue from the current state.
    ///
    /// Incremental rescheduling after each event gives the same results; this is
    /// the from-scratch path used after bulk edits.
    pub fn rebuild_event_queue(&mut self) -> Result<()> {
        self.scheduler.clear();
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        self.schedule_for(&ids)
    }

    // ============ Commands ============

    /// Add `amount` of speed along the ship's orientation, capped at the speed limit.
    ///
    /// Negative amounts are treated as zero.
    pub fn thrust(&mut self, ship: EntityId, amount: f64) -> Result<()> {
        if !amount.is_finite() {
            return Err(Error::InvalidParam("thrust amount must be finite".into()));
        }
        let amount = amount.max(0.0);
        let max_speed = self.config.max_speed;
        let e = self.ship_entity_mut(ship)?;
        let heading = e.as_ship().map(|s| s.heading()).unwrap_or(DVec2::ZERO);
        e.set_velocity_capped(e.velocity() + heading * amount, max_speed)?;
        e.bump_revision();
        self.schedule_for(&[ship])
    }

    /// Rotate the ship by `angle` radians.
    pub fn turn(&mut self, ship: EntityId, angle: f64) -> Result<()> {
        if !angle.is_finite() {
            return Err(Error::InvalidParam("turn angle must be finite".into()));
        }
        if let Some(s) = self.ship_entity_mut(ship)?.as_ship_mut() {
            s.turn(angle);
        }
        Ok(())
    }

    /// Switch the ship's thruster on or off.
    pub fn set_thruster_active(&mut self, ship: EntityId, active: bool) -> Result<()> {
        if let Some(s) = self.ship_entity_mut(ship)?.as_ship_mut() {
            s.set_thruster_active(active);
        }
        Ok(())
    }

    /// Put a new bullet of `radius` into the ship's magazine; returns the bullet's id.
    pub fn load_bullet(&mut self, ship: EntityId, radius: f64) -> Result<EntityId> {
        if !radius.is_finite() || radius < self.config.min_bullet_radius {
            return Err(Error::InvalidParam(format!(
                "bullet radius must be finite and >= {}, got {radius}",
                self.config.min_bullet_radius
            )));
        }
        let mass = self.config.bullet_mass(radius);
        let id = EntityId::new(self.next_id);
        let Some(s) = self.ship_entity_mut(ship)?.as_ship_mut() else {
            return Err(Error::NotAShip(ship));
        };
        s.load(LoadedBullet::new(id, radius, mass));
        self.next_id += 1;
        Ok(id)
    }

    /// Move a live bullet from the arena into the ship's magazine.
    pub fn load_from_world(&mut self, ship: EntityId, bullet: EntityId) -> Result<()> {
        let b = self.entities.get(&bullet).ok_or_else(|| self.missing(bullet))?;
        if b.as_bullet().is_none() {
            return Err(Error::NotABullet(bullet));
        }
        let loaded = LoadedBullet::new(bullet, b.radius(), b.mass());
        let Some(s) = self.ship_entity_mut(ship)?.as_ship_mut() else {
            return Err(Error::NotAShip(ship));
        };
        s.load(loaded);
        self.entities.remove(&bullet);
        Ok(())
    }

    /// Fire the ship's most recently loaded bullet along its orientation.
    ///
    /// The bullet spawns tangent to the hull with the ship's velocity plus the
    /// muzzle speed. See [`FireOutcome`] for the possible results.
    pub fn fire(&mut self, ship: EntityId) -> Result<FireOutcome> {
        let policy = self.config.empty_magazine;
        let (muzzle, max_speed) = (self.config.muzzle_speed, self.config.max_speed);
        let synth_radius = self.config.default_bullet_radius;
        let synth_mass = self.config.bullet_mass(synth_radius);

        let e = self.ship_entity_mut(ship)?;
        let (ship_pos, ship_vel, ship_radius) = (e.position(), e.velocity(), e.radius());
        let Some(s) = e.as_ship_mut() else {
            return Err(Error::NotAShip(ship));
        };
        let heading = s.heading();
        let loaded = match s.unload() {
            Some(b) => b,
            None => match policy {
                EmptyMagazinePolicy::Reject => return Err(Error::EmptyMagazine(ship)),
                EmptyMagazinePolicy::Ignore => return Ok(FireOutcome::Empty),
                EmptyMagazinePolicy::Synthesize => {
                    let id = self.alloc_id();
                    LoadedBullet::new(id, synth_radius, synth_mass)
                }
            },
        };

        let id = loaded.id();
        let mut pos = ship_pos + heading * (ship_radius + loaded.radius());
        let vel = cap_speed(ship_vel + heading * muzzle, max_speed);
        if self.arena.boundary() == Boundary::Wrap {
            pos = pos.rem_euclid(self.arena.size());
        }
        let bullet = Entity::fired(&loaded, pos, vel, ship);

        if !self.arena.contains(pos, loaded.radius()) {
            self.terminated.insert(id);
            self.observer.destroyed(id, bullet.tag(), self.time_now);
            return Ok(FireOutcome::Lost);
        }

        if let Some(target) = self.first_overlap(&bullet, Some(ship)) {
            return self.spawn_impact(id, bullet, target);
        }

        self.entities.insert(id, bullet);
        self.schedule_for(&[id])?;
        self.observer.fired(ship, id, self.time_now);
        Ok(FireOutcome::Launched(id))
    }

    // ============ Internal helpers ============

    pub(crate) fn notify_rejected(&mut self, what: &str, reason: &str) {
        self.observer.rejected(what, reason);
    }

    /// Resolve a bullet that spawned on top of `target` without ever entering the arena.
    fn spawn_impact(
        &mut self,
        id: EntityId,
        mut bullet: Entity,
        target: EntityId,
    ) -> Result<FireOutcome> {
        let mut other = self
            .entities
            .remove(&target)
            .ok_or_else(|| self.missing(target))?;
        let delta = self.arena.displacement(bullet.position(), other.position());
        let out = match resolve::resolve_pair(id, &mut bullet, target, &mut other, delta, &self.config)
        {
            Ok(out) => out,
            Err(e) => {
                self.entities.insert(target, other);
                return Err(e);
            }
        };

        self.terminated.insert(id);
        let mut destroyed = vec![id];
        let mut gone = vec![(id, bullet.tag())];
        if out.b_destroyed {
            self.terminated.insert(target);
            destroyed.push(target);
            gone.push((target, other.tag()));
        } else {
            other.bump_revision();
            self.entities.insert(target, other);
            self.schedule_for(&[target])?;
        }
        self.report(EventKind::pair(id, target), out.effect, &destroyed, &gone);
        Ok(FireOutcome::Impact { target })
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Error for an id that is not in the live set.
    fn missing(&self, id: EntityId) -> Error {
        if self.terminated.contains(&id) {
            Error::Terminated(id)
        } else {
            Error::UnknownEntity(id)
        }
    }

    fn ship_entity_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        if !self.entities.contains_key(&id) {
            return Err(self.missing(id));
        }
        match self.entities.get_mut(&id) {
            Some(e) if e.as_ship().is_some() => Ok(e),
            Some(_) => Err(Error::NotAShip(id)),
            None => Err(Error::UnknownEntity(id)),
        }
    }

    fn pair(&self, a: EntityId, b: EntityId) -> Result<(&Entity, &Entity)> {
        let ea = self.entities.get(&a).ok_or_else(|| self.missing(a))?;
        let eb = self.entities.get(&b).ok_or_else(|| self.missing(b))?;
        Ok((ea, eb))
    }

    /// First live entity (other than `skip`) that `entity` overlaps.
    fn first_overlap(&self, entity: &Entity, skip: Option<EntityId>) -> Option<EntityId> {
        let offsets = self.arena.image_offsets();
        self.entities
            .iter()
            .filter(|&(&id, _)| Some(id) != skip)
            .find(|(_, other)| offsets.iter().any(|&off| entity.overlaps(other, off)))
            .map(|(&id, _)| id)
    }

    /// Earliest contact over every periodic image of `b`, with the image offset.
    fn earliest_contact(
        &self,
        a: EntityId,
        ea: &Entity,
        b: EntityId,
        eb: &Entity,
    ) -> Result<Option<(f64, DVec2)>> {
        let mut best: Option<(f64, DVec2)> = None;
        for off in self.arena.image_offsets() {
            match predict::time_to_collision_image(ea, eb, off) {
                Contact::Never => {}
                Contact::At(t) => {
                    if best.map_or(true, |(bt, _)| t < bt) {
                        best = Some((t, off));
                    }
                }
                Contact::Overlapping => {
                    return Err(Error::Overlapping {
                        a: a.min(b),
                        b: a.max(b),
                    })
                }
            }
        }
        Ok(best)
    }

    /// Queue fresh predictions for every entity in `ids`.
    fn schedule_for(&mut self, ids: &[EntityId]) -> Result<()> {
        let mut fresh: Vec<Event> = Vec::new();
        for (k, &i) in ids.iter().enumerate() {
            let Some(ei) = self.entities.get(&i) else {
                continue;
            };

            if let Some((t, wall)) = predict::time_to_wall(ei, &self.arena) {
                fresh.push(Event::new(
                    self.time_now + t,
                    EventKind::Wall { entity: i, wall },
                    ei.revision(),
                    None,
                )?);
            }

            for (&j, ej) in &self.entities {
                // Pairs inside `ids` are predicted once, from the earlier member.
                if j == i || ids[..k].contains(&j) {
                    continue;
                }
                if !resolve::interacts(i, ei, j, ej) {
                    continue;
                }
                let contact = match self.earliest_contact(i, ei, j, ej) {
                    Ok(c) => c.map(|(t, _)| t),
                    // Only an accelerating ship can get here: its straight-line
                    // prediction ran slightly late. Resolve now if still closing.
                    Err(Error::Overlapping { .. }) => {
                        let d = self.arena.displacement(ei.position(), ej.position());
                        ((ej.velocity() - ei.velocity()).dot(d) < 0.0).then_some(0.0)
                    }
                    Err(e) => return Err(e),
                };
                if let Some(t) = contact {
                    let (a, b, ra, rb) = if i < j {
                        (i, j, ei.revision(), ej.revision())
                    } else {
                        (j, i, ej.revision(), ei.revision())
                    };
                    fresh.push(Event::new(
                        self.time_now + t,
                        EventKind::Pair { a, b },
                        ra,
                        Some(rb),
                    )?);
                }
            }
        }
        for ev in fresh {
            self.scheduler.push(ev);
        }
        Ok(())
    }

    /// Drift all entities to the specified absolute time and make it the current time.
    ///
    /// Coasting bodies move linearly; thrusting ships accelerate and are
    /// re-predicted from their new state.
    fn drift_all(&mut self, to_time: f64) -> Result<()> {
        let dt = to_time - self.time_now;
        if dt <= 0.0 {
            return Ok(());
        }
        let (force, max_speed) = (self.config.thrust_force, self.config.max_speed);
        let mut thrusting = Vec::new();
        for (&id, e) in self.entities.iter_mut() {
            match thrust_accel(e, force) {
                Some(accel) => {
                    e.advance_accelerating(accel, dt, max_speed)?;
                    e.bump_revision();
                    thrusting.push(id);
                }
                None => e.advance(dt)?,
            }
            // Floating-point drift may leave a rim a hair past its wall; edge
            // contacts are still handled by wall events.
            let clamped = self.arena.clamp_center(e.position(), e.radius());
            e.set_position(clamped);
        }
        self.time_now = to_time;
        self.schedule_for(&thrusting)
    }

    /// End of the next drift segment: `target`, or the next `thrust_step`
    /// grid point while any thruster is on.
    fn segment_end(&self, target: f64) -> f64 {
        let force = self.config.thrust_force;
        if !self.entities.values().any(|e| thrust_accel(e, force).is_some()) {
            return target;
        }
        let step = self.config.thrust_step;
        let mut next = ((self.time_now / step).floor() + 1.0) * step;
        if next <= self.time_now {
            next = self.time_now + step;
        }
        next.min(target)
    }

    /// Resolve one event; returns the ids it destroyed.
    fn resolve(&mut self, ev: Event) -> Result<Vec<EntityId>> {
        match ev.kind {
            EventKind::Pair { a, b } => {
                let mut ea = self.entities.remove(&a).ok_or_else(|| self.missing(a))?;
                let Some(mut eb) = self.entities.remove(&b) else {
                    self.entities.insert(a, ea);
                    return Err(self.missing(b));
                };
                let delta = self.arena.displacement(ea.position(), eb.position());
                let out = resolve::resolve_pair(a, &mut ea, b, &mut eb, delta, &self.config);
                let out = match out {
                    Ok(out) => out,
                    Err(e) => {
                        self.entities.insert(a, ea);
                        self.entities.insert(b, eb);
                        return Err(e);
                    }
                };
                ea.bump_revision();
                eb.bump_revision();

                let mut destroyed = Vec::new();
                let mut gone = Vec::new();
                let mut survivors = Vec::new();
                for (id, e, dies) in [(a, ea, out.a_destroyed), (b, eb, out.b_destroyed)] {
                    if dies {
                        self.terminated.insert(id);
                        destroyed.push(id);
                        gone.push((id, e.tag()));
                    } else {
                        self.entities.insert(id, e);
                        survivors.push(id);
                    }
                }
                self.schedule_for(&survivors)?;
                self.report(ev.kind, out.effect, &destroyed, &gone);
                Ok(destroyed)
            }
            EventKind::Wall { entity, wall } => {
                let e = self
                    .entities
                    .get_mut(&entity)
                    .ok_or(Error::UnknownEntity(entity))?;
                let out = resolve::resolve_wall(e, wall, &self.arena, &self.config)?;
                e.bump_revision();
                let tag = e.tag();
                let destroyed = if out.destroyed {
                    self.entities.remove(&entity);
                    self.terminated.insert(entity);
                    vec![entity]
                } else {
                    self.schedule_for(&[entity])?;
                    Vec::new()
                };
                let gone: Vec<_> = destroyed.iter().map(|&id| (id, tag)).collect();
                self.report(ev.kind, out.effect, &destroyed, &gone);
                Ok(destroyed)
            }
        }
    }

    fn report(
        &mut self,
        kind: EventKind,
        effect: Effect,
        destroyed: &[EntityId],
        gone: &[(EntityId, EntityTag)],
    ) {
        self.observer.resolved(&Resolution {
            time: self.time_now,
            kind,
            effect,
            destroyed: destroyed.to_vec(),
        });
        for &(id, tag) in gone {
            self.observer.destroyed(id, tag, self.time_now);
        }
    }
}

/// Acceleration of a ship whose thruster is on, `a = F / m` along its heading.
fn thrust_accel(e: &Entity, force: f64) -> Option<DVec2> {
    if force <= 0.0 {
        return None;
    }
    e.as_ship()
        .filter(|s| s.thruster_active())
        .map(|s| s.heading() * (force / e.mass()))
}
