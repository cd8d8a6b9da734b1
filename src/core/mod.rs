//! Simulation core: bodies, prediction, scheduling, resolution and the world loop.
//!
//! Nothing in here knows about rendering or input; the outer layers talk to
//! [`World`] through commands and snapshots.

pub mod arena;
pub mod entity;
pub mod event;
pub mod predict;
pub mod resolve;
pub mod scheduler;
pub mod snapshot;
pub mod world;

pub use arena::{Arena, Boundary, Wall};
pub use entity::{Bullet, Entity, EntityId, EntityKind, EntityTag, LoadedBullet, Ship};
pub use event::{Event, EventKind};
pub use predict::{time_to_collision, time_to_wall, Contact};
pub use resolve::Effect;
pub use scheduler::Scheduler;
pub use snapshot::{EntitySnapshot, Snapshot};
pub use world::{EvolveReport, FireOutcome, World};
