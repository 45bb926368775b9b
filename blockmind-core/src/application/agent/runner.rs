use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::errors::AgentError;
use super::models::{AgentOptions, AgentOutcome, AgentStep, RepeatPolicy, StatusMessagePolicy};
use super::prompt;
use super::state::ConversationState;
use crate::application::coalescer::IncomingMessage;
use crate::application::tasks::TaskList;
use crate::application::tooling::{
    ToolCallResult, ToolContext, ToolDispatcher, ToolFilter, ToolSchema,
};
use crate::application::world::World;
use crate::constants::REPEAT_HISTORY_CAPACITY;
use crate::domain::types::{ChatMessage, ToolCall};
use crate::infrastructure::memory::{Memory, MemoryError};
use crate::infrastructure::model::{ModelProvider, ModelRequest, ToolChoice};

/// Number of chat turns shown to the model when deciding whether a message
/// was meant for the agent.
const ADDRESS_CHECK_WINDOW: usize = 5;

/// One agent: its conversation, its task list and the collaborators it talks to.
pub struct Agent<P: ModelProvider> {
    provider: P,
    dispatcher: ToolDispatcher,
    memory: Arc<dyn Memory>,
    options: AgentOptions,
    state: ConversationState,
    context: ToolContext,
}

impl<P: ModelProvider> Agent<P> {
    pub fn new(
        provider: P,
        dispatcher: ToolDispatcher,
        memory: Arc<dyn Memory>,
        world: Arc<dyn World>,
        options: AgentOptions,
    ) -> Self {
        Self {
            provider,
            dispatcher,
            memory,
            options,
            state: ConversationState::new(),
            context: ToolContext::new(world),
        }
    }

    /// Like [`new`](Self::new), continuing from the last saved conversation.
    pub async fn resume(
        provider: P,
        dispatcher: ToolDispatcher,
        memory: Arc<dyn Memory>,
        world: Arc<dyn World>,
        options: AgentOptions,
    ) -> Result<Self, MemoryError> {
        let snapshot = memory.load().await?;
        let mut agent = Self::new(provider, dispatcher, memory, world, options);
        match snapshot {
            Some(messages) => {
                info!(messages = messages.len(), "Loaded conversation from memory");
                agent.state = ConversationState::from_messages(messages);
            }
            None => info!("No saved conversation, starting fresh"),
        }
        Ok(agent)
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    pub fn tasks(&self) -> &TaskList {
        &self.context.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskList {
        &mut self.context.tasks
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.ensure_system_prompt();
        self.state.push(message);
    }

    /// Appends a coalesced batch, one user turn per message.
    pub fn push_inputs(&mut self, inputs: Vec<IncomingMessage>) {
        for input in inputs {
            self.push_message(input.into_chat_message());
        }
    }

    /// Runs the conversation until the model produces a final reply. Failures
    /// collapse into one generic text.
    pub async fn respond(&mut self) -> String {
        match self.try_respond().await {
            Ok(outcome) => outcome.response,
            Err(err) => {
                error!(error = %err, reason = %err.diagnostic(), "LLM request failed");
                err.user_message()
            }
        }
    }

    pub async fn try_respond(&mut self) -> Result<AgentOutcome, AgentError> {
        self.ensure_system_prompt();
        info!("Starting request");
        let started = Instant::now();

        let mut steps = Vec::new();
        let mut anomaly_retried = false;

        for turn in 1..=self.options.max_turns {
            let request = self.build_request();
            let response = self.provider.chat(request).await?;
            info!(
                turn,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Request completed"
            );

            if !response.tool_calls.is_empty() {
                info!(calls = response.tool_calls.len(), "Processing tool call(s)");
                // Only the first request message carries the model's text.
                let mut content = response.content.unwrap_or_default();
                for call in response.tool_calls {
                    let step = self.execute_call(call, std::mem::take(&mut content)).await;
                    if step.stop {
                        warn!(tool = %step.tool, "Stopping function calls due to stop flag");
                        let response = step.message_text();
                        let stopped_by = Some(step.tool.clone());
                        steps.push(step);
                        return Ok(AgentOutcome {
                            response,
                            steps,
                            turns: turn,
                            stopped_by,
                        });
                    }
                    steps.push(step);
                }
                continue;
            }

            match response.content {
                Some(content) => {
                    self.state.push(ChatMessage::assistant(content.clone()));
                    self.persist().await;
                    if self.context.tasks.active().is_none() {
                        info!(response = %content, "Finish response");
                        return Ok(AgentOutcome {
                            response: content,
                            steps,
                            turns: turn,
                            stopped_by: None,
                        });
                    }
                    debug!("Active task remains, continuing");
                }
                None if anomaly_retried => {
                    warn!("Model returned no content and no tool calls again");
                    return Err(AgentError::Anomaly);
                }
                None => {
                    warn!("Model returned no content and no tool calls, retrying");
                    anomaly_retried = true;
                    if let Some(reasoning) = response.reasoning.filter(|r| !r.trim().is_empty()) {
                        self.state.push(ChatMessage::assistant(reasoning));
                    }
                }
            }
        }

        warn!(max_turns = self.options.max_turns, "Turn limit reached");
        Err(AgentError::TurnLimit(self.options.max_turns))
    }

    /// Asks the model whether the latest chat line was meant for this agent.
    pub async fn is_addressed_to_me(&self) -> Result<bool, AgentError> {
        let mut messages = vec![ChatMessage::system(prompt::address_check(
            self.context.world.username(),
        ))];
        messages.extend(self.state.recent_dialogue(ADDRESS_CHECK_WINDOW));

        let request = ModelRequest::text(
            self.options.model.clone(),
            self.options.temperature,
            messages,
        );
        let answer = self.provider.chat(request).await?.content.unwrap_or_default();
        debug!(answer = %answer, "Address check answered");
        Ok(answer.contains("true"))
    }

    /// Forgets results of observation tools that have gone stale.
    pub async fn prune_tools<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let removed = self.state.prune_tools(names);
        if removed > 0 {
            self.persist().await;
        }
        removed
    }

    fn ensure_system_prompt(&mut self) {
        if self.state.is_empty() {
            let prompt =
                prompt::render_system_prompt(&self.options.system_prompt, self.context.world.username());
            self.state.push(ChatMessage::system(prompt));
        }
    }

    /// Tools offered this turn; a tool call may have changed the game mode.
    fn available_tools(&self) -> Vec<ToolSchema> {
        let filter = ToolFilter {
            groups: self.options.groups.clone(),
            mode: Some(self.context.world.game_mode()),
        };
        let tools = self.dispatcher.registry().schemas(&filter);
        debug!(
            tools = ?tools.iter().map(|t| t.function.name.as_str()).collect::<Vec<_>>(),
            "Available tools"
        );
        tools
    }

    fn build_request(&mut self) -> ModelRequest {
        let tools = self.available_tools();
        let status = ChatMessage::developer(prompt::status_message(
            self.context.world.position(),
            self.context.tasks.active_info(),
        ));
        let messages = match self.options.status_message {
            StatusMessagePolicy::Persisted => {
                self.state.push(status);
                self.state.messages().to_vec()
            }
            StatusMessagePolicy::Ephemeral => {
                let mut messages = self.state.messages().to_vec();
                messages.push(status);
                messages
            }
        };
        let tool_choice = if self.context.tasks.active().is_some() {
            ToolChoice::Required
        } else {
            ToolChoice::Auto
        };

        ModelRequest {
            model: self.options.model.clone(),
            temperature: self.options.temperature,
            tool_choice,
            tools,
            messages,
            parallel_tool_calls: false,
        }
    }

    async fn execute_call(&mut self, call: ToolCall, content: String) -> AgentStep {
        debug!(tool = %call.name, arguments = %call.arguments, "Executing tool call");
        let repeating = self.state.is_repeating(&call.name);

        let result = if repeating && self.options.repeat_policy == RepeatPolicy::Block {
            warn!(tool = %call.name, "Blocking repeated tool call");
            ToolCallResult::error(prompt::repeat_blocked(&call.name, REPEAT_HISTORY_CAPACITY))
        } else {
            self.dispatcher
                .invoke_json(&call.name, &mut self.context, &call.arguments)
                .await
        };

        let mut payload = result.to_payload();
        if repeating && self.options.repeat_policy == RepeatPolicy::Warn {
            payload["warning"] =
                Value::from(prompt::repeat_warning(&call.name, REPEAT_HISTORY_CAPACITY));
        }
        debug!(tool = %call.name, status = result.status.as_str(), "Tool call finished");

        self.state
            .push(ChatMessage::assistant_tool_call(content, call.clone()));
        self.state
            .push(ChatMessage::tool_result(&call, payload.to_string()));
        self.state.record_tool(&call.name);
        self.persist().await;

        AgentStep {
            tool: call.name,
            arguments: call.arguments,
            status: result.status,
            message: result.message,
            stop: result.stop,
        }
    }

    async fn persist(&self) {
        if let Err(err) = self.memory.save(self.state.messages()).await {
            warn!(error = %err, "Failed to save conversation memory");
        }
    }
}
