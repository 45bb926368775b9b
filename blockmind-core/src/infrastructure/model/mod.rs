//! Model infrastructure
//!
//! - `types` - request, response and error types
//! - `traits` - the `ModelProvider` seam the agent talks to
//! - `adapter` - wire format conversion
//! - `factory` - API key resolution
//! - `clients` - HTTP client implementations

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use clients::OpenAiClient;
pub use traits::ModelProvider;
pub use types::{ModelError, ModelRequest, ModelResponse, ToolChoice};
