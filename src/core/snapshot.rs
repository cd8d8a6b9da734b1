use glam::DVec2;
use serde::Serialize;

use crate::core::entity::{Entity, EntityId, EntityTag};

/// Read-only view of one live entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityTag,
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    /// Orientation for ships; `None` for bullets.
    pub orientation: Option<f64>,
}

impl EntitySnapshot {
    /// Copy the state of `entity`.
    pub fn of(id: EntityId, entity: &Entity) -> Self {
        Self {
            id,
            kind: entity.tag(),
            position: entity.position(),
            velocity: entity.velocity(),
            radius: entity.radius(),
            orientation: entity.as_ship().map(|s| s.orientation()),
        }
    }
}

/// Owned copy of the live set at one instant, ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Simulation time the copy was taken at.
    pub time: f64,
    /// Live entities in ascending id order.
    pub entities: Vec<EntitySnapshot>,
}

impl Snapshot {
    /// Look up one entity by id.
    pub fn get(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|idx| &self.entities[idx])
    }

    /// Serialize the snapshot as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
