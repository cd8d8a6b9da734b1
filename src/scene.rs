//! Seeded random scenes.
//!
//! Ships are placed by rejection sampling so that no two overlap and each fits
//! inside the arena. The same seed always yields the same fleet.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

use crate::core::{Entity, EntityId, World};
use crate::error::{Error, Result};

/// Placement attempts per ship before giving up.
const MAX_ATTEMPTS: usize = 100_000;

/// Parameters for a random fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetSpec {
    pub ships: usize,
    /// Inclusive range for ship radii.
    pub radius: (f64, f64),
    /// Each velocity component is drawn from `[-max_component, max_component]`.
    pub max_component: f64,
    /// Bullets loaded into every ship after placement.
    pub bullets_per_ship: usize,
    /// `None` draws a seed from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for FleetSpec {
    fn default() -> Self {
        Self {
            ships: 8,
            radius: (10.0, 20.0),
            max_component: 50.0,
            bullets_per_ship: 0,
            seed: None,
        }
    }
}

/// Add a random fleet to `world`; returns the new ship ids in creation order.
pub fn populate(world: &mut World, fleet: &FleetSpec) -> Result<Vec<EntityId>> {
    let (r_lo, r_hi) = fleet.radius;
    let min_radius = world.config().min_ship_radius;
    if !r_lo.is_finite() || !r_hi.is_finite() || r_lo < min_radius || r_hi < r_lo {
        return Err(Error::InvalidParam(format!(
            "radius range must be finite, ordered and >= {min_radius}"
        )));
    }
    if !fleet.max_component.is_finite() || fleet.max_component < 0.0 {
        return Err(Error::InvalidParam(
            "max_component must be finite and >= 0".into(),
        ));
    }
    let size = world.arena().size();
    if size.min_element() < 2.0 * r_hi {
        return Err(Error::InvalidParam(
            "arena must be at least twice the largest radius in every dimension".into(),
        ));
    }

    let mut rng: StdRng = match fleet.seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    };

    let bullet_radius = world.config().default_bullet_radius;
    let mut ids = Vec::with_capacity(fleet.ships);
    for n in 0..fleet.ships {
        let radius = rng.random_range(r_lo..=r_hi);
        let vel = DVec2::new(
            rng.random_range(-fleet.max_component..=fleet.max_component),
            rng.random_range(-fleet.max_component..=fleet.max_component),
        );
        let orientation = rng.random_range(0.0..TAU);

        let mut attempts = 0usize;
        let id = loop {
            if attempts >= MAX_ATTEMPTS {
                return Err(Error::InvalidParam(format!(
                    "failed to place ship {n} without overlap; try fewer ships or smaller radii"
                )));
            }
            attempts += 1;
            let pos = DVec2::new(
                rng.random_range(radius..=size.x - radius),
                rng.random_range(radius..=size.y - radius),
            );
            let ship = Entity::ship(pos, vel, radius, orientation, world.config())?;
            match world.add_entity(ship) {
                Ok(id) => break id,
                Err(Error::Overlapping { .. }) => continue,
                Err(e) => return Err(e),
            }
        };

        for _ in 0..fleet.bullets_per_ship {
            world.load_bullet(id, bullet_radius)?;
        }
        ids.push(id);
    }
    log::debug!("placed {} ships", ids.len());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::core::Arena;

    fn world() -> Result<World> {
        World::new(Arena::new(800.0, 600.0)?, SimConfig::default())
    }

    #[test]
    fn same_seed_same_fleet() -> Result<()> {
        let fleet = FleetSpec {
            seed: Some(7),
            ..FleetSpec::default()
        };
        let (mut a, mut b) = (world()?, world()?);
        populate(&mut a, &fleet)?;
        populate(&mut b, &fleet)?;
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.len(), 8);
        Ok(())
    }

    #[test]
    fn ships_fit_and_carry_bullets() -> Result<()> {
        let fleet = FleetSpec {
            ships: 12,
            bullets_per_ship: 2,
            seed: Some(99),
            ..FleetSpec::default()
        };
        let mut w = world()?;
        let ids = populate(&mut w, &fleet)?;
        for id in ids {
            let e = w.entity(id).expect("ship");
            assert!(w.arena().contains(e.position(), e.radius()));
            assert_eq!(e.as_ship().map(|s| s.loaded_bullets().len()), Some(2));
        }
        Ok(())
    }

    #[test]
    fn impossible_packing_is_reported() -> Result<()> {
        let mut w = World::new(Arena::new(50.0, 50.0)?, SimConfig::default())?;
        let fleet = FleetSpec {
            ships: 10,
            radius: (20.0, 20.0),
            seed: Some(1),
            ..FleetSpec::default()
        };
        assert!(populate(&mut w, &fleet).is_err());
        Ok(())
    }
}
