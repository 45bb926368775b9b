use async_trait::async_trait;

use super::types::{ModelError, ModelRequest, ModelResponse};

/// A chat-completions backend.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> &str;

    /// Sends one request and returns the first choice.
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
