use crate::core::arena::Wall;
use crate::core::entity::EntityId;
use crate::error::{Error, Result};
use ordered_float::NotNan;
use std::cmp::Ordering;

/// Kinds of events that can occur in the arena.
///
/// Tie-breaking for deterministic ordering prefers `Pair` < `Wall` when times are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Contact between entities `a` and `b`, with `a < b`.
    Pair { a: EntityId, b: EntityId },
    /// Contact between `entity` and an arena edge.
    Wall { entity: EntityId, wall: Wall },
}

impl EventKind {
    /// Pair event with its participants in canonical order.
    pub fn pair(x: EntityId, y: EntityId) -> Self {
        if x <= y {
            EventKind::Pair { a: x, b: y }
        } else {
            EventKind::Pair { a: y, b: x }
        }
    }

    /// Whether `id` takes part in this event.
    pub fn involves(&self, id: EntityId) -> bool {
        match *self {
            EventKind::Pair { a, b } => a == id || b == id,
            EventKind::Wall { entity, .. } => entity == id,
        }
    }

    #[inline]
    pub(crate) fn order_key(&self) -> (u8, u32, u32) {
        match *self {
            EventKind::Pair { a, b } => (0, a.raw(), b.raw()),
            EventKind::Wall { entity, wall } => (1, entity.raw(), wall as u32),
        }
    }
}

/// A scheduled event with deterministic ordering.
///
/// - `time`: absolute simulation time of the contact (finite, non-NaN).
/// - `kind`: event kind and participants.
/// - `rev_a`, `rev_b`: revision snapshots used to discard stale predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: NotNan<f64>,
    pub kind: EventKind,
    pub rev_a: u64,
    pub rev_b: Option<u64>,
}

impl Event {
    /// Create a new event, validating that time is finite and non-NaN.
    pub fn new(time: f64, kind: EventKind, rev_a: u64, rev_b: Option<u64>) -> Result<Self> {
        let time = NotNan::new(time)
            .ok()
            .filter(|t| t.is_finite())
            .ok_or_else(|| Error::InvalidParam(format!("event time must be finite, got {time}")))?;
        Ok(Self {
            time,
            kind,
            rev_a,
            rev_b,
        })
    }

    /// Returns the raw f64 event time.
    #[inline]
    pub fn time_f64(&self) -> f64 {
        self.time.into_inner()
    }

    /// Validate against current revisions. A wall event passes `None` for `rev_b_now`.
    #[inline]
    pub fn is_valid(&self, rev_a_now: u64, rev_b_now: Option<u64>) -> bool {
        if self.rev_a != rev_a_now {
            return false;
        }
        match (self.rev_b, rev_b_now) {
            (Some(x), Some(y)) => x == y,
            (None, None) => true,
            (None, Some(_)) => true,
            (Some(_), None) => false,
        }
    }

    /// Ordering among events considered simultaneous.
    #[inline]
    pub(crate) fn tie_key(&self) -> (u8, u32, u32) {
        self.kind.order_key()
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => match self.kind.order_key().cmp(&other.kind.order_key()) {
                // Final tie-breaker on revisions to ensure a total order.
                Ordering::Equal => (self.rev_a, self.rev_b.unwrap_or(0))
                    .cmp(&(other.rev_a, other.rev_b.unwrap_or(0))),
                o => o,
            },
            o => o,
        }
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
