use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::application::tooling::ToolStatus;
use crate::constants::{DEFAULT_MAX_TURNS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Whether the per-turn status message (position, active task) is kept in
/// the conversation history or only attached to the outgoing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMessagePolicy {
    #[default]
    Ephemeral,
    Persisted,
}

/// What happens when the model calls the same tool over and over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatPolicy {
    /// Dispatch anyway and attach a warning to the result.
    #[default]
    Warn,
    /// Refuse the call with an error result.
    Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStep {
    pub tool: String,
    pub arguments: String,
    pub status: ToolStatus,
    pub message: Value,
    pub stop: bool,
}

impl AgentStep {
    pub fn message_text(&self) -> String {
        match &self.message {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcome {
    pub response: String,
    pub steps: Vec<AgentStep>,
    /// Model requests issued.
    pub turns: usize,
    /// Tool whose result ended the conversation, if any.
    pub stopped_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentOptions {
    pub model: String,
    pub temperature: f32,
    /// Template; `{username}` is replaced with the agent's username.
    pub system_prompt: String,
    pub max_turns: usize,
    pub status_message: StatusMessagePolicy,
    pub repeat_policy: RepeatPolicy,
    pub groups: BTreeSet<String>,
}

impl AgentOptions {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
            status_message: StatusMessagePolicy::default(),
            repeat_policy: RepeatPolicy::default(),
            groups: BTreeSet::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_status_message(mut self, policy: StatusMessagePolicy) -> Self {
        self.status_message = policy;
        self
    }

    pub fn with_repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_TEMPERATURE)
    }
}
