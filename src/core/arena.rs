use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How entities interact with the arena edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Edges are solid walls; bodies bounce off them.
    #[default]
    Reflect,
    /// Toroidal arena; a center leaving one edge re-enters at the opposite one.
    Wrap,
}

/// One of the four arena edges.
///
/// The declaration order is the tie-break order for simultaneous wall events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Wall {
    /// x = 0
    Left,
    /// x = width
    Right,
    /// y = 0
    Bottom,
    /// y = height
    Top,
}

impl Wall {
    /// Axis index of the wall normal (0 = x, 1 = y).
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Wall::Left | Wall::Right => 0,
            Wall::Bottom | Wall::Top => 1,
        }
    }

    /// Whether the wall sits at the far end of its axis.
    #[inline]
    pub fn is_max(self) -> bool {
        matches!(self, Wall::Right | Wall::Top)
    }

    #[inline]
    pub(crate) fn on_axis(axis: usize, is_max: bool) -> Self {
        match (axis, is_max) {
            (0, false) => Wall::Left,
            (0, true) => Wall::Right,
            (_, false) => Wall::Bottom,
            (_, true) => Wall::Top,
        }
    }
}

/// Axis-aligned rectangle `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    width: f64,
    height: f64,
    boundary: Boundary,
}

impl Arena {
    /// Reflecting arena of the given size.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Self::with_boundary(width, height, Boundary::Reflect)
    }

    pub fn with_boundary(width: f64, height: f64, boundary: Boundary) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "arena size must be finite and > 0, got {width} x {height}"
            )));
        }
        Ok(Self {
            width,
            height,
            boundary,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Whether a body of `radius` centered at `pos` lies inside the arena.
    ///
    /// Reflecting arenas need the whole disc inside; wrapping arenas only the center.
    pub fn contains(&self, pos: DVec2, radius: f64) -> bool {
        let (lo, hi) = self.center_bounds(radius);
        pos.cmpge(lo).all() && pos.cmple(hi).all()
    }

    /// Inclusive bounds for a body's center.
    #[inline]
    pub(crate) fn center_bounds(&self, radius: f64) -> (DVec2, DVec2) {
        match self.boundary {
            Boundary::Reflect => (DVec2::splat(radius), self.size() - DVec2::splat(radius)),
            Boundary::Wrap => (DVec2::ZERO, self.size()),
        }
    }

    /// Pull a center back inside its bounds after floating-point drift.
    #[inline]
    pub(crate) fn clamp_center(&self, pos: DVec2, radius: f64) -> DVec2 {
        let (lo, hi) = self.center_bounds(radius);
        pos.max(lo).min(hi)
    }

    /// Shortest vector from `from` to `to`, honouring periodic images when wrapping.
    pub fn displacement(&self, from: DVec2, to: DVec2) -> DVec2 {
        let d = to - from;
        match self.boundary {
            Boundary::Reflect => d,
            Boundary::Wrap => {
                let size = self.size();
                d - size * (d / size).round()
            }
        }
    }

    /// Translations of a partner body that must be considered for contact.
    pub(crate) fn image_offsets(&self) -> Vec<DVec2> {
        match self.boundary {
            Boundary::Reflect => vec![DVec2::ZERO],
            Boundary::Wrap => {
                let mut out = Vec::with_capacity(9);
                for i in -1..=1 {
                    for j in -1..=1 {
                        out.push(DVec2::new(i as f64 * self.width, j as f64 * self.height));
                    }
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_size_rejected() {
        assert!(Arena::new(0.0, 10.0).is_err());
        assert!(Arena::new(10.0, f64::NAN).is_err());
    }

    #[test]
    fn reflect_contains_requires_whole_disc() -> Result<()> {
        let arena = Arena::new(100.0, 50.0)?;
        assert!(arena.contains(DVec2::new(10.0, 10.0), 10.0));
        assert!(!arena.contains(DVec2::new(5.0, 10.0), 10.0));
        assert!(!arena.contains(DVec2::new(50.0, 45.0), 10.0));
        Ok(())
    }

    #[test]
    fn wrap_displacement_uses_nearest_image() -> Result<()> {
        let arena = Arena::with_boundary(100.0, 100.0, Boundary::Wrap)?;
        let d = arena.displacement(DVec2::new(95.0, 50.0), DVec2::new(5.0, 50.0));
        assert!((d - DVec2::new(10.0, 0.0)).length() < 1e-12);
        assert_eq!(arena.image_offsets().len(), 9);
        Ok(())
    }

    #[test]
    fn wall_axis_side() {
        assert_eq!(Wall::Left.axis(), 0);
        assert!(!Wall::Left.is_max());
        assert_eq!(Wall::Top.axis(), 1);
        assert!(Wall::Top.is_max());
        assert_eq!(Wall::on_axis(1, false), Wall::Bottom);
    }
}
