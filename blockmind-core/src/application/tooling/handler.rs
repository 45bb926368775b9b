use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::HandlerError;
use super::result::HandlerReply;
use crate::application::tasks::TaskList;
use crate::application::world::World;

/// Arguments after schema validation. Only declared fields survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Deserializes one field into a typed value.
    pub fn parse<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, HandlerError> {
        match self.0.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }
}

/// Mutable state that handlers act on during a conversation.
pub struct ToolContext {
    pub tasks: TaskList,
    pub world: Arc<dyn World>,
}

impl ToolContext {
    pub fn new(world: Arc<dyn World>) -> Self {
        Self {
            tasks: TaskList::default(),
            world,
        }
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, ctx: &mut ToolContext, args: ToolArgs)
    -> Result<HandlerReply, HandlerError>;
}

/// Adapter so small tools can be written as plain synchronous closures.
pub struct FnHandler<F>(F);

pub fn sync_handler<F>(f: F) -> FnHandler<F>
where
    F: Fn(&mut ToolContext, ToolArgs) -> Result<HandlerReply, HandlerError> + Send + Sync,
{
    FnHandler(f)
}

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(&mut ToolContext, ToolArgs) -> Result<HandlerReply, HandlerError> + Send + Sync,
{
    async fn call(
        &self,
        ctx: &mut ToolContext,
        args: ToolArgs,
    ) -> Result<HandlerReply, HandlerError> {
        (self.0)(ctx, args)
    }
}
