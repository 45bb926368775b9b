use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::constants::REPEAT_HISTORY_CAPACITY;
use crate::domain::types::{ChatMessage, MessageRole};

/// Message history of one agent plus the names of the last few tools it called.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
    recent_tools: VecDeque<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            recent_tools: VecDeque::with_capacity(REPEAT_HISTORY_CAPACITY),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Remembers a call; only the newest few are kept.
    pub fn record_tool(&mut self, name: &str) {
        self.recent_tools.push_back(name.to_string());
        while self.recent_tools.len() > REPEAT_HISTORY_CAPACITY {
            self.recent_tools.pop_front();
        }
    }

    pub fn recent_tools(&self) -> impl Iterator<Item = &str> {
        self.recent_tools.iter().map(String::as_str)
    }

    /// True when every remembered call, with the history full, was `name`.
    pub fn is_repeating(&self, name: &str) -> bool {
        self.recent_tools.len() == REPEAT_HISTORY_CAPACITY
            && self.recent_tools.iter().all(|tool| tool == name)
    }

    /// Drops results of the named tools together with the assistant requests
    /// that asked for them, and forgets the call history. Returns how many
    /// tool results were removed.
    pub fn prune_tools<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let stale: HashSet<String> = self
            .messages
            .iter()
            .filter(|message| message.role == MessageRole::Tool)
            .filter(|message| {
                message
                    .tool_name
                    .as_deref()
                    .is_some_and(|tool| names.iter().any(|name| name.as_ref() == tool))
            })
            .filter_map(|message| message.tool_call_id.clone())
            .collect();

        let before = self.messages.len();
        let mut removed = 0;
        self.messages.retain_mut(|message| {
            if message.role == MessageRole::Tool {
                let is_stale = message
                    .tool_call_id
                    .as_ref()
                    .is_some_and(|id| stale.contains(id));
                if is_stale {
                    removed += 1;
                }
                return !is_stale;
            }
            if message.has_tool_calls() {
                message.tool_calls.retain(|call| !stale.contains(&call.id));
                return message.has_tool_calls() || !message.content.is_empty();
            }
            true
        });
        self.recent_tools.clear();

        debug!(
            removed,
            dropped = before - self.messages.len(),
            "Pruned tool history"
        );
        removed
    }

    /// The last `limit` messages that are neither system prompts nor tool
    /// results. Tool requests are stripped since their results are left out.
    pub fn recent_dialogue(&self, limit: usize) -> Vec<ChatMessage> {
        let dialogue: Vec<ChatMessage> = self
            .messages
            .iter()
            .filter(|message| !matches!(message.role, MessageRole::System | MessageRole::Tool))
            .map(|message| {
                let mut copy = message.clone();
                copy.tool_calls.clear();
                copy
            })
            .collect();
        let skip = dialogue.len().saturating_sub(limit);
        dialogue.into_iter().skip(skip).collect()
    }
}
