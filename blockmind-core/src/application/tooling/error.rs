use crate::application::world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("function '{0}' is already registered")]
    DuplicateName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure raised from inside a handler body.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("malformed arguments: {0}")]
    Arguments(#[from] serde_json::Error),
}

impl HandlerError {
    pub fn message(text: impl Into<String>) -> Self {
        HandlerError::Message(text.into())
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Function '{0}' not found!")]
    Lookup(String),
    #[error("Invalid arguments: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Handler(#[from] HandlerError),
    #[error("function '{0}' panicked")]
    Panicked(String),
}

impl DispatchError {
    /// Text fed back to the model as the tool message.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Panicked(name) => format!("Function '{name}' failed unexpectedly"),
            other => other.to_string(),
        }
    }
}
