mod clock;
mod dispatcher;
mod error;
mod handler;
mod registry;
mod result;
pub mod schema;

pub use clock::get_time_tool;
pub use dispatcher::ToolDispatcher;
pub use error::{DispatchError, HandlerError, RegistryError, ValidationError};
pub use handler::{FnHandler, ToolArgs, ToolContext, ToolHandler, sync_handler};
pub use registry::{FunctionSchema, ToolDefinition, ToolFilter, ToolRegistry, ToolSchema};
pub use result::{HandlerReply, ToolCallResult, ToolReply, ToolStatus};
pub use schema::{Param, ParamKind, ParameterSchema};
