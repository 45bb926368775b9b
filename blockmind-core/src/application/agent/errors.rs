use crate::constants::GENERIC_FAILURE_MESSAGE;
use crate::infrastructure::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Upstream(#[from] ModelError),
    #[error("model returned neither content nor tool calls after a retry")]
    Anomaly,
    #[error("conversation exceeded {0} model turns")]
    TurnLimit(usize),
}

impl AgentError {
    /// The text shown to players. Details stay in the logs.
    pub fn user_message(&self) -> String {
        GENERIC_FAILURE_MESSAGE.to_string()
    }

    /// Operator-facing explanation for logs and machine-readable output.
    pub fn diagnostic(&self) -> String {
        match self {
            AgentError::Upstream(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
