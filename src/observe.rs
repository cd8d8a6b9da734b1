//! Observability hooks.
//!
//! The world never logs through global state of its own: it reports to the
//! [`Observer`] it was built with. [`LogObserver`] forwards to the `log` facade,
//! [`Recorder`] keeps everything in memory.

use crate::core::resolve::Effect;
use crate::core::{EntityId, EntityTag, EventKind};

/// One resolved event.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Absolute simulation time of the contact.
    pub time: f64,
    pub kind: EventKind,
    pub effect: Effect,
    /// Entities removed from the arena by this event.
    pub destroyed: Vec<EntityId>,
}

/// Receives simulation notifications. Every method defaults to doing nothing.
pub trait Observer {
    /// An event was resolved.
    fn resolved(&mut self, _record: &Resolution) {}

    /// An entity left the arena for good.
    fn destroyed(&mut self, _id: EntityId, _tag: EntityTag, _time: f64) {}

    /// A ship fired a bullet that entered the arena.
    fn fired(&mut self, _ship: EntityId, _bullet: EntityId, _time: f64) {}

    /// A command or add was refused.
    fn rejected(&mut self, _what: &str, _reason: &str) {}
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn resolved(&mut self, record: &Resolution) {
        log::debug!(
            "t={:.6} {:?} -> {:?} (destroyed: {:?})",
            record.time,
            record.kind,
            record.effect,
            record.destroyed
        );
    }

    fn destroyed(&mut self, id: EntityId, tag: EntityTag, time: f64) {
        log::info!("{tag:?} {id} destroyed at t={time:.6}");
    }

    fn fired(&mut self, ship: EntityId, bullet: EntityId, time: f64) {
        log::debug!("ship {ship} fired bullet {bullet} at t={time:.6}");
    }

    fn rejected(&mut self, what: &str, reason: &str) {
        log::warn!("{what} rejected: {reason}");
    }
}

/// Keeps every notification; handy for replays and tests.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub resolutions: Vec<Resolution>,
    pub destroyed: Vec<(EntityId, EntityTag, f64)>,
    pub fired: Vec<(EntityId, EntityId, f64)>,
}

impl Observer for Recorder {
    fn resolved(&mut self, record: &Resolution) {
        self.resolutions.push(record.clone());
    }

    fn destroyed(&mut self, id: EntityId, tag: EntityTag, time: f64) {
        self.destroyed.push((id, tag, time));
    }

    fn fired(&mut self, ship: EntityId, bullet: EntityId, time: f64) {
        self.fired.push((ship, bullet, time));
    }
}

/// Lets a caller keep a handle on an observer it lends to the world.
impl<O: Observer + ?Sized> Observer for std::rc::Rc<std::cell::RefCell<O>> {
    fn resolved(&mut self, record: &Resolution) {
        self.borrow_mut().resolved(record);
    }

    fn destroyed(&mut self, id: EntityId, tag: EntityTag, time: f64) {
        self.borrow_mut().destroyed(id, tag, time);
    }

    fn fired(&mut self, ship: EntityId, bullet: EntityId, time: f64) {
        self.borrow_mut().fired(ship, bullet, time);
    }

    fn rejected(&mut self, what: &str, reason: &str) {
        self.borrow_mut().rejected(what, reason);
    }
}
