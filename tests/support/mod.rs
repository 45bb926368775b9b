// Shared fixtures for the integration tests: a scripted model provider and a
// world that answers from fixed values.

#![allow(dead_code)]

use async_trait::async_trait;
use blockmind_core::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use blockmind_core::types::ToolCall;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct ScriptedProvider {
    responses: Arc<Mutex<Vec<ModelResponse>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<ModelResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request);
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("scripted", "script exhausted"));
        }
        Ok(responses.remove(0))
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> ModelResponse {
    ModelResponse::with_tool_calls(vec![ToolCall::new(id, name, arguments)])
}
