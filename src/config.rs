//! Simulation constants and policy switches.
//!
//! Everything tunable lives in [`SimConfig`]. Loading it from disk is the
//! caller's business; this module only parses and validates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What happens to a bullet that reaches an arena wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletWallPolicy {
    /// Reflect and count; the bullet dies once the count exceeds `max_bounces`.
    Bounce { max_bounces: u32 },
    /// The bullet dies on its first wall contact.
    Destroy,
}

impl Default for BulletWallPolicy {
    fn default() -> Self {
        BulletWallPolicy::Bounce { max_bounces: 2 }
    }
}

/// What a foreign bullet does to a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipHitPolicy {
    /// One hit destroys the ship.
    #[default]
    Destroy,
    /// The ship survives until it has taken `max_hits` hits.
    Absorb { max_hits: u32 },
}

/// Behaviour of `fire` when the ship's magazine is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyMagazinePolicy {
    /// Report [`Error::EmptyMagazine`].
    #[default]
    Reject,
    /// Do nothing and report `FireOutcome::Empty`.
    Ignore,
    /// Create a bullet of `default_bullet_radius` on the spot.
    Synthesize,
}

/// Physical constants and resolution policies.
///
/// Units follow the classic Asteroids model: km, s, kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Speed cap for every entity (km/s).
    pub max_speed: f64,
    /// Smallest admissible ship radius (km).
    pub min_ship_radius: f64,
    /// Smallest admissible bullet radius (km).
    pub min_bullet_radius: f64,
    /// Ship hull density (kg/km³).
    pub ship_density: f64,
    /// Bullet density (kg/km³).
    pub bullet_density: f64,
    /// Speed added to a bullet along the firing ship's orientation (km/s).
    pub muzzle_speed: f64,
    /// Radius of bullets created by `load_bullet` defaults and by `Synthesize`.
    pub default_bullet_radius: f64,
    /// Force of an active thruster (N).
    pub thrust_force: f64,
    /// Longest stretch a thrusting ship drifts before its predictions are refreshed (s).
    ///
    /// Contact prediction assumes straight-line motion, so an accelerating ship is
    /// re-predicted on this absolute time grid.
    pub thrust_step: f64,
    pub bullet_wall: BulletWallPolicy,
    pub ship_hit: ShipHitPolicy,
    pub empty_magazine: EmptyMagazinePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_speed: 300_000.0,
            min_ship_radius: 10.0,
            min_bullet_radius: 1.0,
            ship_density: 1.42e12,
            bullet_density: 7.8e12,
            muzzle_speed: 250.0,
            default_bullet_radius: 3.0,
            thrust_force: 1.1e21,
            thrust_step: 0.01,
            bullet_wall: BulletWallPolicy::default(),
            ship_hit: ShipHitPolicy::default(),
            empty_magazine: EmptyMagazinePolicy::default(),
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document; missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: SimConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every constant is finite and in range.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_speed", self.max_speed),
            ("min_ship_radius", self.min_ship_radius),
            ("min_bullet_radius", self.min_bullet_radius),
            ("ship_density", self.ship_density),
            ("bullet_density", self.bullet_density),
            ("default_bullet_radius", self.default_bullet_radius),
            ("thrust_step", self.thrust_step),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("muzzle_speed", self.muzzle_speed),
            ("thrust_force", self.thrust_force),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if self.default_bullet_radius < self.min_bullet_radius {
            return Err(Error::InvalidParam(
                "default_bullet_radius must be >= min_bullet_radius".into(),
            ));
        }
        if let ShipHitPolicy::Absorb { max_hits: 0 } = self.ship_hit {
            return Err(Error::InvalidParam("max_hits must be >= 1".into()));
        }
        Ok(())
    }

    /// Mass of a ship hull of the given radius.
    #[inline]
    pub fn ship_mass(&self, radius: f64) -> f64 {
        sphere_volume(radius) * self.ship_density
    }

    /// Mass of a bullet of the given radius.
    #[inline]
    pub fn bullet_mass(&self, radius: f64) -> f64 {
        sphere_volume(radius) * self.bullet_density
    }
}

#[inline]
fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * std::f64::consts::PI * radius.powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() -> Result<()> {
        SimConfig::default().validate()
    }

    #[test]
    fn partial_json_fills_defaults() -> Result<()> {
        let cfg = SimConfig::from_json(
            r#"{ "muzzle_speed": 100.0, "bullet_wall": "destroy", "ship_hit": { "absorb": { "max_hits": 3 } } }"#,
        )?;
        assert_eq!(cfg.muzzle_speed, 100.0);
        assert_eq!(cfg.bullet_wall, BulletWallPolicy::Destroy);
        assert_eq!(cfg.ship_hit, ShipHitPolicy::Absorb { max_hits: 3 });
        assert_eq!(cfg.max_speed, 300_000.0);
        Ok(())
    }

    #[test]
    fn rejects_non_positive_speed_cap() {
        let cfg = SimConfig {
            max_speed: 0.0,
            ..SimConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_speed"));
    }

    #[test]
    fn rejects_zero_thrust_step() {
        let cfg = SimConfig {
            thrust_step: 0.0,
            ..SimConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("thrust_step"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn mass_scales_with_cube_of_radius() {
        let cfg = SimConfig::default();
        let ratio = cfg.ship_mass(20.0) / cfg.ship_mass(10.0);
        assert!((ratio - 8.0).abs() < 1e-12);
    }
}
