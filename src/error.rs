use crate::core::EntityId;
use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the arena.
///
/// Precondition violations (`Overlapping`, `SameEntity`) are kept apart from
/// invalid input so callers can tell "no future collision" from "invalid query".
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Numerical or geometric issue (e.g., coincident centers at contact).
    #[error("numerical error: {0}")]
    MathError(String),

    /// Two entities already overlap, so no contact time can be predicted.
    #[error("entities {a} and {b} already overlap")]
    Overlapping { a: EntityId, b: EntityId },

    /// A pair query was made for an entity against itself.
    #[error("entity {0} cannot collide with itself")]
    SameEntity(EntityId),

    /// The id was never issued by this world.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    /// The entity existed but has been destroyed or removed.
    #[error("entity {0} has been terminated")]
    Terminated(EntityId),

    /// The entity exists but is not a ship.
    #[error("entity {0} is not a ship")]
    NotAShip(EntityId),

    /// The entity exists but is not a bullet.
    #[error("entity {0} is not a bullet")]
    NotABullet(EntityId),

    /// The ship has no loaded bullet and the configuration forbids synthesizing one.
    #[error("ship {0} has no bullet loaded")]
    EmptyMagazine(EntityId),

    /// Entity placed (or found) outside the arena.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Configuration could not be parsed.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("radius must be >= 10".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn overlap_names_both_entities() {
        let e = Error::Overlapping {
            a: EntityId::new(3),
            b: EntityId::new(7),
        };
        let msg = e.to_string();
        assert!(msg.contains("#3"));
        assert!(msg.contains("#7"));
    }

    #[test]
    fn json_errors_convert() {
        let parsed: std::result::Result<u32, _> = serde_json::from_str("nope");
        let e: Error = parsed.unwrap_err().into();
        assert!(matches!(e, Error::Config(_)));
    }
}
