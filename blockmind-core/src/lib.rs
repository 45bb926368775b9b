//! blockmind core: the tool-calling orchestration engine behind an LLM game agent.
//!
//! The crate is layered the same way top to bottom:
//! - `domain` holds the conversation message types shared by every layer.
//! - `application` holds the function registry, tool dispatcher, task list,
//!   message coalescer and the conversation loop itself.
//! - `infrastructure` holds the model provider client and memory persistence.
//! - `config` loads `agent.toml`.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, catalog, coalescer, tasks, tooling, world};
pub use config::{AppConfig, ConfigError};
pub use domain::types;
pub use infrastructure::{memory, model};
