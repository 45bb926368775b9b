use async_trait::async_trait;

use super::{EntityInfo, Position, World, WorldError};
use crate::constants::{DEFAULT_GAME_MODE, DEFAULT_USERNAME};

const FULL_BAR: f64 = 20.0;

/// A world with nobody in it. Observations answer from fixed values and every
/// action is refused, which is enough to run the agent without a game server.
#[derive(Debug, Clone)]
pub struct OfflineWorld {
    username: String,
    game_mode: String,
    position: Position,
}

impl OfflineWorld {
    pub fn new(username: impl Into<String>, game_mode: impl Into<String>, position: Position) -> Self {
        Self {
            username: username.into(),
            game_mode: game_mode.into(),
            position,
        }
    }
}

impl Default for OfflineWorld {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_GAME_MODE, Position::default())
    }
}

#[async_trait]
impl World for OfflineWorld {
    fn username(&self) -> &str {
        &self.username
    }

    fn position(&self) -> Position {
        self.position
    }

    fn game_mode(&self) -> String {
        self.game_mode.clone()
    }

    fn health(&self) -> f64 {
        FULL_BAR
    }

    fn food(&self) -> f64 {
        FULL_BAR
    }

    async fn nearby_entities(&self, _max_distance: f64) -> Result<Vec<EntityInfo>, WorldError> {
        Ok(Vec::new())
    }

    async fn walk_to(&self, _target: Position) -> Result<Position, WorldError> {
        Err(WorldError::Unavailable("not connected to a game server".into()))
    }

    async fn walk_to_entity(&self, entity_id: &str) -> Result<Position, WorldError> {
        Err(WorldError::EntityNotFound(entity_id.to_string()))
    }

    async fn attack(&self, entity_id: &str) -> Result<(), WorldError> {
        Err(WorldError::EntityNotFound(entity_id.to_string()))
    }

    async fn give_creative_item(&self, _item_id: &str, _amount: u32) -> Result<String, WorldError> {
        Err(WorldError::Unavailable("not connected to a game server".into()))
    }
}
