use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Success => "success",
            ToolStatus::Error => "error",
        }
    }
}

/// Structured handler output. A missing status counts as success.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolReply {
    pub status: Option<ToolStatus>,
    pub message: Value,
    pub stop: bool,
}

impl ToolReply {
    pub fn new(message: impl Into<Value>) -> Self {
        Self {
            status: None,
            message: message.into(),
            stop: false,
        }
    }

    pub fn success(message: impl Into<Value>) -> Self {
        Self::new(message).with_status(ToolStatus::Success)
    }

    pub fn error(message: impl Into<Value>) -> Self {
        Self::new(message).with_status(ToolStatus::Error)
    }

    pub fn with_status(mut self, status: ToolStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Ends the conversation turn once this result is recorded.
    pub fn stop(mut self) -> Self {
        self.stop = true;
        self
    }
}

/// What a handler hands back to the dispatcher.
///
/// A bare `Text` reply is an error report; handlers that succeed return a
/// structured [`ToolReply`].
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerReply {
    Text(String),
    Reply(ToolReply),
}

impl From<String> for HandlerReply {
    fn from(text: String) -> Self {
        HandlerReply::Text(text)
    }
}

impl From<&str> for HandlerReply {
    fn from(text: &str) -> Self {
        HandlerReply::Text(text.to_string())
    }
}

impl From<ToolReply> for HandlerReply {
    fn from(reply: ToolReply) -> Self {
        HandlerReply::Reply(reply)
    }
}

/// Normalized outcome of a single function call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallResult {
    pub status: ToolStatus,
    pub message: Value,
    pub stop: bool,
}

impl ToolCallResult {
    pub fn success(message: impl Into<Value>) -> Self {
        Self {
            status: ToolStatus::Success,
            message: message.into(),
            stop: false,
        }
    }

    pub fn error(message: impl Into<Value>) -> Self {
        Self {
            status: ToolStatus::Error,
            message: message.into(),
            stop: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    /// Message rendered as plain text; strings are unquoted.
    pub fn message_text(&self) -> String {
        match &self.message {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// `{"result": ..., "message": ...}` as recorded in the tool message.
    pub fn to_payload(&self) -> Value {
        json!({ "result": self.status.as_str(), "message": self.message })
    }
}

impl From<HandlerReply> for ToolCallResult {
    fn from(reply: HandlerReply) -> Self {
        match reply {
            HandlerReply::Text(text) => ToolCallResult::error(text),
            HandlerReply::Reply(reply) => ToolCallResult {
                status: reply.status.unwrap_or(ToolStatus::Success),
                message: reply.message,
                stop: reply.stop,
            },
        }
    }
}
