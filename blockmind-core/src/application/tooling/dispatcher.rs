use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{DispatchError, ValidationError};
use super::handler::{ToolArgs, ToolContext};
use super::registry::ToolRegistry;
use super::result::ToolCallResult;

/// Validates arguments and runs handlers.
///
/// Every public entry point that returns a bare [`ToolCallResult`] absorbs
/// lookup, validation, handler and panic failures into an error-status result.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ToolDispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub async fn invoke(&self, name: &str, ctx: &mut ToolContext, raw: Value) -> ToolCallResult {
        self.try_invoke(name, ctx, raw)
            .await
            .unwrap_or_else(|err| absorb(name, err))
    }

    /// Same as [`invoke`](Self::invoke) for the JSON-encoded arguments string a
    /// model sends. Empty input means no arguments.
    pub async fn invoke_json(
        &self,
        name: &str,
        ctx: &mut ToolContext,
        arguments: &str,
    ) -> ToolCallResult {
        let raw = if arguments.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(arguments) {
                Ok(raw) => raw,
                Err(err) => {
                    let err = ValidationError::new("arguments", format!("malformed JSON: {err}"));
                    return absorb(name, err.into());
                }
            }
        };
        self.invoke(name, ctx, raw).await
    }

    pub async fn try_invoke(
        &self,
        name: &str,
        ctx: &mut ToolContext,
        raw: Value,
    ) -> Result<ToolCallResult, DispatchError> {
        let definition = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::Lookup(name.to_string()))?;
        let args = ToolArgs::new(definition.parameters.validate(&raw)?);

        debug!(tool = %name, "invoking handler");
        let outcome = AssertUnwindSafe(definition.handler.call(ctx, args))
            .catch_unwind()
            .await
            .map_err(|_| DispatchError::Panicked(name.to_string()))?;

        Ok(ToolCallResult::from(outcome?))
    }
}

fn absorb(name: &str, err: DispatchError) -> ToolCallResult {
    warn!(tool = %name, error = %err, "tool call failed");
    ToolCallResult::error(err.user_message())
}
