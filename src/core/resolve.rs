//! Collision resolution rules.
//!
//! Every function here assumes the participants have already been advanced to
//! the event time, so pair participants are in contact and wall participants
//! touch their wall.

use glam::DVec2;

use crate::config::{BulletWallPolicy, ShipHitPolicy, SimConfig};
use crate::core::arena::{Arena, Boundary, Wall};
use crate::core::entity::{Entity, EntityId, EntityKind};
use crate::error::{Error, Result};

/// Smallest center distance accepted when building a contact normal.
const MIN_NORMAL_LEN: f64 = 1e-12;

/// What a resolution did, for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Elastic bounce between ships or off a wall.
    Bounce,
    /// Center re-entered at the opposite edge.
    Wrap,
    /// A bullet touched the ship that fired it; nothing happened.
    PassThrough,
    /// A bullet struck a ship or another bullet.
    Impact,
    /// A bullet died at a wall.
    Expired,
}

/// Result of resolving a pair contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairOutcome {
    pub effect: Effect,
    pub a_destroyed: bool,
    pub b_destroyed: bool,
}

/// Result of resolving a wall contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallOutcome {
    pub effect: Effect,
    pub destroyed: bool,
}

/// Whether a contact between these two entities has any effect at all.
///
/// A bullet never interacts with the ship that fired it.
pub fn interacts(a_id: EntityId, a: &Entity, b_id: EntityId, b: &Entity) -> bool {
    !(fired_by(a, b_id) || fired_by(b, a_id))
}

fn fired_by(bullet: &Entity, ship_id: EntityId) -> bool {
    bullet
        .as_bullet()
        .is_some_and(|bb| bb.source() == Some(ship_id))
}

/// Resolve a contact between `a` and `b`.
///
/// `delta` is the displacement from `a` to `b` at contact (the nearest periodic
/// image when the arena wraps).
pub fn resolve_pair(
    a_id: EntityId,
    a: &mut Entity,
    b_id: EntityId,
    b: &mut Entity,
    delta: DVec2,
    cfg: &SimConfig,
) -> Result<PairOutcome> {
    if !interacts(a_id, a, b_id, b) {
        return Ok(PairOutcome {
            effect: Effect::PassThrough,
            a_destroyed: false,
            b_destroyed: false,
        });
    }

    match (a.kind(), b.kind()) {
        (EntityKind::Ship(_), EntityKind::Ship(_)) => {
            bounce_ships(a, b, delta, cfg.max_speed)?;
            Ok(PairOutcome {
                effect: Effect::Bounce,
                a_destroyed: false,
                b_destroyed: false,
            })
        }
        (EntityKind::Ship(_), EntityKind::Bullet(_)) => Ok(PairOutcome {
            effect: Effect::Impact,
            a_destroyed: hit_ship(a, cfg.ship_hit),
            b_destroyed: true,
        }),
        (EntityKind::Bullet(_), EntityKind::Ship(_)) => Ok(PairOutcome {
            effect: Effect::Impact,
            a_destroyed: true,
            b_destroyed: hit_ship(b, cfg.ship_hit),
        }),
        (EntityKind::Bullet(_), EntityKind::Bullet(_)) => Ok(PairOutcome {
            effect: Effect::Impact,
            a_destroyed: true,
            b_destroyed: true,
        }),
    }
}

/// Elastic impulse along the line of centers.
///
/// `J = 2 m_a m_b (Δv·Δp) / ((m_a + m_b) σ)` with σ the center distance;
/// `a` gains `J Δp / (σ m_a)` and `b` loses `J Δp / (σ m_b)`.
fn bounce_ships(a: &mut Entity, b: &mut Entity, delta: DVec2, max_speed: f64) -> Result<()> {
    let sigma = delta.length();
    if sigma <= MIN_NORMAL_LEN {
        return Err(Error::MathError(
            "degenerate contact normal in ship collision".into(),
        ));
    }
    let (ma, mb) = (a.mass(), b.mass());
    let dv = b.velocity() - a.velocity();
    let j = 2.0 * ma * mb * dv.dot(delta) / ((ma + mb) * sigma);
    let jvec = delta * (j / sigma);

    a.set_velocity_capped(a.velocity() + jvec / ma, max_speed)?;
    b.set_velocity_capped(b.velocity() - jvec / mb, max_speed)?;
    Ok(())
}

/// Apply a foreign bullet hit; returns whether the ship is destroyed.
fn hit_ship(ship: &mut Entity, policy: ShipHitPolicy) -> bool {
    match policy {
        ShipHitPolicy::Destroy => true,
        ShipHitPolicy::Absorb { max_hits } => match ship.as_ship_mut() {
            Some(s) => s.record_hit() >= max_hits,
            None => true,
        },
    }
}

/// Resolve a contact between `entity` and `wall`.
pub fn resolve_wall(
    entity: &mut Entity,
    wall: Wall,
    arena: &Arena,
    cfg: &SimConfig,
) -> Result<WallOutcome> {
    let axis = wall.axis();
    let (lo, hi) = arena.center_bounds(entity.radius());
    let mut pos = entity.position();

    if arena.boundary() == Boundary::Wrap {
        // Leaving through the max edge re-enters at the min edge and vice versa.
        pos[axis] = if wall.is_max() { lo[axis] } else { hi[axis] };
        entity.set_position(pos);
        return Ok(WallOutcome {
            effect: Effect::Wrap,
            destroyed: false,
        });
    }

    if let Some(bullet) = entity.as_bullet_mut() {
        let expired = match cfg.bullet_wall {
            BulletWallPolicy::Destroy => true,
            BulletWallPolicy::Bounce { max_bounces } => bullet.bounce() > max_bounces,
        };
        if expired {
            return Ok(WallOutcome {
                effect: Effect::Expired,
                destroyed: true,
            });
        }
    }

    // Snap onto the contact line, then mirror the normal component.
    pos[axis] = if wall.is_max() { hi[axis] } else { lo[axis] };
    entity.set_position(pos);
    let mut vel = entity.velocity();
    vel[axis] = -vel[axis];
    entity.set_velocity_capped(vel, cfg.max_speed)?;
    Ok(WallOutcome {
        effect: Effect::Bounce,
        destroyed: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SimConfig {
        SimConfig::default()
    }

    fn ship(x: f64, vx: f64, r: f64) -> Result<Entity> {
        Entity::ship(DVec2::new(x, 50.0), DVec2::new(vx, 0.0), r, 0.0, &cfg())
    }

    fn bullet(x: f64, vx: f64) -> Result<Entity> {
        Entity::bullet(DVec2::new(x, 50.0), DVec2::new(vx, 0.0), 2.0, &cfg())
    }

    fn id(n: u32) -> EntityId {
        EntityId::new(n)
    }

    #[test]
    fn equal_ships_swap_velocities() -> Result<()> {
        let mut a = ship(0.0, 5.0, 10.0)?;
        let mut b = ship(20.0, -3.0, 10.0)?;
        let delta = b.position() - a.position();
        let out = resolve_pair(id(1), &mut a, id(2), &mut b, delta, &cfg())?;
        assert_eq!(out.effect, Effect::Bounce);
        assert!((a.velocity().x + 3.0).abs() < 1e-9);
        assert!((b.velocity().x - 5.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn ship_collision_conserves_momentum_and_energy() -> Result<()> {
        let mut a = Entity::ship(
            DVec2::new(100.0, 100.0),
            DVec2::new(4.0, 1.0),
            12.0,
            0.0,
            &cfg(),
        )?;
        let mut b = Entity::ship(
            DVec2::new(120.0, 115.0),
            DVec2::new(-2.0, -3.0),
            13.0,
            0.0,
            &cfg(),
        )?;
        let p0 = a.momentum() + b.momentum();
        let e0 = a.kinetic_energy() + b.kinetic_energy();
        let delta = b.position() - a.position();
        resolve_pair(id(1), &mut a, id(2), &mut b, delta, &cfg())?;
        let p1 = a.momentum() + b.momentum();
        let e1 = a.kinetic_energy() + b.kinetic_energy();
        assert!((p1 - p0).length() <= 1e-9 * p0.length());
        assert!(((e1 - e0) / e0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn foreign_bullet_destroys_ship_and_bullet() -> Result<()> {
        let mut s = ship(0.0, 0.0, 10.0)?;
        let mut b = bullet(12.0, -5.0)?;
        let delta = b.position() - s.position();
        let out = resolve_pair(id(1), &mut s, id(2), &mut b, delta, &cfg())?;
        assert_eq!(out.effect, Effect::Impact);
        assert!(out.a_destroyed && out.b_destroyed);
        Ok(())
    }

    #[test]
    fn absorb_policy_counts_hits() -> Result<()> {
        let c = SimConfig {
            ship_hit: ShipHitPolicy::Absorb { max_hits: 2 },
            ..cfg()
        };
        let mut s = ship(0.0, 0.0, 10.0)?;
        let mut b1 = bullet(12.0, -5.0)?;
        let out = resolve_pair(id(2), &mut b1, id(1), &mut s, DVec2::new(-12.0, 0.0), &c)?;
        assert!(out.a_destroyed);
        assert!(!out.b_destroyed);
        let mut b2 = bullet(12.0, -5.0)?;
        let out = resolve_pair(id(1), &mut s, id(3), &mut b2, DVec2::new(12.0, 0.0), &c)?;
        assert!(out.a_destroyed && out.b_destroyed);
        Ok(())
    }

    #[test]
    fn bullets_annihilate() -> Result<()> {
        let mut x = bullet(0.0, 5.0)?;
        let mut y = bullet(4.0, -5.0)?;
        let out = resolve_pair(id(1), &mut x, id(2), &mut y, DVec2::new(4.0, 0.0), &cfg())?;
        assert!(out.a_destroyed && out.b_destroyed);
        Ok(())
    }

    #[test]
    fn wall_reflects_ship_and_snaps() -> Result<()> {
        let arena = Arena::new(100.0, 100.0)?;
        let mut s = Entity::ship(
            DVec2::new(89.999_999, 50.0),
            DVec2::new(3.0, 2.0),
            10.0,
            0.0,
            &cfg(),
        )?;
        let out = resolve_wall(&mut s, Wall::Right, &arena, &cfg())?;
        assert_eq!(out.effect, Effect::Bounce);
        assert_eq!(s.position().x, 90.0);
        assert_eq!(s.velocity(), DVec2::new(-3.0, 2.0));
        Ok(())
    }

    #[test]
    fn bullet_expires_after_max_bounces() -> Result<()> {
        let arena = Arena::new(100.0, 100.0)?;
        let c = SimConfig {
            bullet_wall: BulletWallPolicy::Bounce { max_bounces: 1 },
            ..cfg()
        };
        let mut b = Entity::bullet(DVec2::new(98.0, 50.0), DVec2::new(1.0, 0.0), 2.0, &c)?;
        let first = resolve_wall(&mut b, Wall::Right, &arena, &c)?;
        assert!(!first.destroyed);
        let second = resolve_wall(&mut b, Wall::Left, &arena, &c)?;
        assert!(second.destroyed);
        assert_eq!(second.effect, Effect::Expired);
        Ok(())
    }

    #[test]
    fn wrap_teleports_without_changing_velocity() -> Result<()> {
        let arena = Arena::with_boundary(100.0, 100.0, Boundary::Wrap)?;
        let mut s = Entity::ship(DVec2::new(100.0, 30.0), DVec2::new(2.0, 1.0), 10.0, 0.0, &cfg())?;
        let out = resolve_wall(&mut s, Wall::Right, &arena, &cfg())?;
        assert_eq!(out.effect, Effect::Wrap);
        assert_eq!(s.position(), DVec2::new(0.0, 30.0));
        assert_eq!(s.velocity(), DVec2::new(2.0, 1.0));
        Ok(())
    }
}
