//! OpenAI-compatible chat-completions client (OpenAI, LM Studio, vLLM, llama.cpp server, ...)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use super::base::HttpClientBase;
use crate::application::tooling::ToolSchema;
use crate::config::ModelConfig;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse, ToolChoice};
use crate::domain::types::ToolCall;

const PROVIDER_ID: &str = "openai";

#[derive(Clone)]
pub struct OpenAiClient {
    base: HttpClientBase,
    api_path: String,
}

impl OpenAiClient {
    pub fn new(endpoint: impl Into<String>, api_path: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base: HttpClientBase::new(PROVIDER_ID.to_string(), endpoint.into(), api_key),
            api_path: api_path.into(),
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        let api_key = resolve_api_key(PROVIDER_ID, config.api_key_env.as_deref());
        Self::new(config.endpoint.clone(), config.api_path.clone(), api_key)
    }
}

#[async_trait]
impl ModelProvider for OpenAiClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(&self.api_path);
        let payload = ChatCompletionRequest::from_request(&request);

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: ChatCompletionResponse = self.base.post_json(&url, &payload).await?;
        debug!("Received response from OpenAI-compatible provider");
        response.into_model_response(&self.base.id)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Value>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSchema]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parallel_tool_calls: Option<bool>,
    stream: bool,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Tool fields are only sent when tools are offered; several servers reject
    /// `tool_choice` without `tools`.
    fn from_request(request: &'a ModelRequest) -> Self {
        let has_tools = !request.tools.is_empty();
        Self {
            model: &request.model,
            messages: MessageAdapter::to_openai_format(&request.messages),
            temperature: request.temperature,
            tools: has_tools.then_some(request.tools.as_slice()),
            tool_choice: has_tools.then_some(request.tool_choice),
            parallel_tool_calls: has_tools.then_some(request.parallel_tool_calls),
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    reasoning: Option<String>,
    reasoning_content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    id: Option<String>,
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    arguments: Option<String>,
}

impl ChatCompletionResponse {
    fn into_model_response(self, provider: &str) -> Result<ModelResponse, ModelError> {
        let message = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .ok_or_else(|| ModelError::invalid_response(provider, "missing choices[0].message"))?;

        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                let id = call
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("call_{}", Uuid::new_v4().simple()));
                ToolCall::new(id, call.function.name, call.function.arguments.unwrap_or_default())
            })
            .collect();

        Ok(ModelResponse {
            content: message.content,
            reasoning: message.reasoning.or(message.reasoning_content),
            tool_calls,
        })
    }
}
