//! Continuous-collision simulation of ships and bullets in a rectangular arena.
//!
//! Bodies move in straight lines between contacts. Instead of stepping on a
//! fixed grid, [`World::evolve`] predicts the exact time of every upcoming
//! contact, jumps the whole arena to the earliest one, resolves it and repeats,
//! so nothing can tunnel through anything else however fast it moves.
//!
//! ```no_run
//! use arenasim::{Arena, Entity, SimConfig, World};
//! use glam::DVec2;
//!
//! # fn main() -> arenasim::Result<()> {
//! let cfg = SimConfig::default();
//! let mut world = World::new(Arena::new(1000.0, 1000.0)?, cfg.clone())?;
//! let ship = world.add_entity(Entity::ship(
//!     DVec2::new(500.0, 500.0),
//!     DVec2::ZERO,
//!     12.0,
//!     0.0,
//!     &cfg,
//! )?)?;
//! world.load_bullet(ship, cfg.default_bullet_radius)?;
//! world.fire(ship)?;
//! world.evolve(0.5)?;
//! println!("{}", world.snapshot().to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod core;
pub mod error;
pub mod observe;
pub mod scene;

pub use crate::command::Command;
pub use crate::config::{BulletWallPolicy, EmptyMagazinePolicy, ShipHitPolicy, SimConfig};
pub use crate::core::{
    Arena, Boundary, Entity, EntityId, EntityTag, EvolveReport, FireOutcome, Snapshot, Wall,
    World,
};
pub use crate::error::{Error, Result};
pub use crate::observe::{LogObserver, Observer, Recorder};
