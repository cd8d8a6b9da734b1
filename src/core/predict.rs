//! Closed-form contact-time prediction.
//!
//! Times returned here are relative to "now". The world turns them into absolute
//! times before queueing.

use glam::DVec2;

use crate::core::arena::{Arena, Wall};
use crate::core::entity::{Entity, OVERLAP_TOLERANCE};

/// Relative slack under which a negative discriminant still counts as a glancing touch.
pub const DISCRIMINANT_EPS: f64 = 1e-10;

/// Outcome of a pair query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// The bodies will not touch on their current straight-line paths.
    Never,
    /// The bodies touch after this many time units (0 means "now").
    At(f64),
    /// The bodies already overlap; no prediction is possible.
    Overlapping,
}

impl Contact {
    /// The contact time, if any.
    pub fn time(self) -> Option<f64> {
        match self {
            Contact::At(t) => Some(t),
            Contact::Never | Contact::Overlapping => None,
        }
    }
}

/// Earliest time at which `a` and `b` touch.
///
/// Solves `|Δp + Δv t| = r_a + r_b` for the smaller root while the bodies
/// approach. A pair that is tangent and approaching collides now; a pair that is
/// tangent and separating never does, so a freshly resolved contact is not
/// reported again. The result is symmetric in `a` and `b`.
pub fn time_to_collision(a: &Entity, b: &Entity) -> Contact {
    time_to_collision_image(a, b, DVec2::ZERO)
}

/// Like [`time_to_collision`] with `b` translated by `offset` (periodic image).
pub(crate) fn time_to_collision_image(a: &Entity, b: &Entity, offset: DVec2) -> Contact {
    let dp = b.position() + offset - a.position();
    let dv = b.velocity() - a.velocity();
    let s = a.radius() + b.radius();

    let qa = dv.dot(dv);
    if qa == 0.0 {
        // Identical velocities: the gap never changes.
        return Contact::Never;
    }
    let qb = 2.0 * dp.dot(dv);
    let qc = dp.dot(dp) - s * s;

    // Roots straddle zero
    if qc < -OVERLAP_TOLERANCE * s * s {
        return Contact::Overlapping;
    }
    if qb >= 0.0 {
        return Contact::Never;
    }

    let mut disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        if disc < -DISCRIMINANT_EPS * qb * qb {
            return Contact::Never;
        }
        disc = 0.0;
    }

    // q has the sign of -qb, so the smaller root c/q avoids cancellation.
    let q = -0.5 * (qb - disc.sqrt());
    let t = (qc / q).max(0.0);
    if t.is_finite() {
        Contact::At(t)
    } else {
        Contact::Never
    }
}

/// Earliest time at which `entity` reaches an arena edge, with the edge hit.
///
/// For reflecting arenas the disc's rim must reach the wall; for wrapping arenas
/// the center must reach the edge line. Velocity components that are zero or
/// point away from a wall are ignored. Ties between axes go to x.
pub fn time_to_wall(entity: &Entity, arena: &Arena) -> Option<(f64, Wall)> {
    let (lo, hi) = arena.center_bounds(entity.radius());
    let pos = entity.position().to_array();
    let vel = entity.velocity().to_array();
    let lo = lo.to_array();
    let hi = hi.to_array();

    let mut best: Option<(f64, Wall)> = None;
    for axis in 0..2 {
        let v = vel[axis];
        let (target, is_max) = if v < 0.0 {
            (lo[axis], false)
        } else if v > 0.0 {
            (hi[axis], true)
        } else {
            continue;
        };
        let t = ((target - pos[axis]) / v).max(0.0);
        if !t.is_finite() {
            continue;
        }
        match best {
            Some((bt, _)) if bt <= t => {}
            _ => best = Some((t, Wall::on_axis(axis, is_max))),
        }
    }

    best
}
