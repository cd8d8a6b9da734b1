use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::core::entity::EntityId;
use crate::core::event::{Event, EventKind};

/// Events closer together than this are treated as simultaneous.
pub const EPS_TIME: f64 = 1e-12;

/// Priority queue of predicted contacts keyed by absolute time.
///
/// Entries are never updated in place. When an entity changes, fresh predictions
/// are pushed and the old ones are dropped lazily once they reach the top, by
/// comparing the revisions stored in the event against the current ones.
#[derive(Debug, Default)]
pub struct Scheduler {
    pq: BinaryHeap<Reverse<Event>>,
}

impl Scheduler {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a prediction; stale entries already queued are left alone.
    pub fn push(&mut self, ev: Event) {
        self.pq.push(Reverse(ev));
    }

    /// Drop every queued entry.
    pub fn clear(&mut self) {
        self.pq.clear();
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.pq.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pq.is_empty()
    }

    /// Earliest valid event, left in the queue.
    ///
    /// `revision` returns the current revision of a live entity, or `None` once
    /// the entity has left the arena.
    pub fn peek_valid<F>(&mut self, revision: F) -> Option<Event>
    where
        F: Fn(EntityId) -> Option<u64>,
    {
        while let Some(Reverse(ev)) = self.pq.peek() {
            if is_current(ev, &revision) {
                return Some(*ev);
            }
            self.pq.pop();
        }
        None
    }

    /// Remove and return the next event to resolve.
    ///
    /// Among valid events within [`EPS_TIME`] of the earliest one, pair events win
    /// over wall events and lower ids win over higher ids.
    pub fn pop_next<F>(&mut self, revision: F) -> Option<Event>
    where
        F: Fn(EntityId) -> Option<u64>,
    {
        let first = self.peek_valid(&revision)?;
        let horizon = first.time_f64() + EPS_TIME;

        let mut window: Vec<Event> = Vec::new();
        while let Some(Reverse(ev)) = self.pq.peek() {
            if ev.time_f64() > horizon {
                break;
            }
            let ev = *ev;
            self.pq.pop();
            if is_current(&ev, &revision) {
                window.push(ev);
            }
        }

        let pick = window
            .iter()
            .enumerate()
            .min_by_key(|(_, ev)| ev.tie_key())
            .map(|(idx, _)| idx)?;
        let chosen = window.swap_remove(pick);
        for ev in window {
            self.pq.push(Reverse(ev));
        }
        Some(chosen)
    }
}

fn is_current<F>(ev: &Event, revision: &F) -> bool
where
    F: Fn(EntityId) -> Option<u64>,
{
    match ev.kind {
        EventKind::Pair { a, b } => match (revision(a), revision(b)) {
            (Some(ra), Some(rb)) => ev.is_valid(ra, Some(rb)),
            _ => false,
        },
        EventKind::Wall { entity, .. } => match revision(entity) {
            Some(r) => ev.is_valid(r, None),
            None => false,
        },
    }
}
