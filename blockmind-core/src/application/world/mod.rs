//! Actuation contract consumed by the world tools.

mod offline;
mod tools;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use offline::OfflineWorld;
pub use tools::world_tools;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub entity_id: String,
    /// Meters from the agent.
    pub distance: f64,
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("world is unavailable: {0}")]
    Unavailable(String),
    #[error("Entity with ID {0} is not found!")]
    EntityNotFound(String),
    #[error("{0}")]
    Rejected(String),
}

/// The game world as seen by one agent.
///
/// Actuation calls resolve once the action finished; bounding how long that
/// takes is up to the implementation.
#[async_trait]
pub trait World: Send + Sync {
    fn username(&self) -> &str;

    fn position(&self) -> Position;

    /// Current game mode tag, matched against tool mode restrictions.
    fn game_mode(&self) -> String;

    fn health(&self) -> f64;

    fn food(&self) -> f64;

    /// Entities within `max_distance`, nearest first, excluding the agent.
    async fn nearby_entities(&self, max_distance: f64) -> Result<Vec<EntityInfo>, WorldError>;

    async fn walk_to(&self, target: Position) -> Result<Position, WorldError>;

    /// Walks to an entity and returns where it was reached.
    async fn walk_to_entity(&self, entity_id: &str) -> Result<Position, WorldError>;

    async fn attack(&self, entity_id: &str) -> Result<(), WorldError>;

    /// Puts an item from the creative menu into the active hotbar slot and
    /// returns its display name.
    async fn give_creative_item(&self, item_id: &str, amount: u32) -> Result<String, WorldError>;
}
