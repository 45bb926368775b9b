//! # Agent Module
//!
//! The conversation loop that lets a model act in the game through tools.
//!
//! ## Key Types
//!
//! - [`Agent`] - Owns one conversation and drives the model until it replies
//! - [`AgentOptions`] - Model, prompt and loop settings
//! - [`AgentOutcome`] - Final reply plus every tool step taken on the way
//! - [`ConversationState`] - Message history and repeat-call tracking
//! - [`AgentError`] - Failures that end a run
//!
//! ## Agent Loop
//!
//! Each turn:
//! 1. Attach a status message (position, active task) and send the history
//! 2. Execute every requested tool call in order, recording call and result
//! 3. Stop early if a tool result carries the stop flag
//! 4. A text reply ends the run unless a task is still active

mod errors;
mod models;
pub mod prompt;
mod runner;
mod state;


pub use errors::AgentError;
pub use models::{AgentOptions, AgentOutcome, AgentStep, RepeatPolicy, StatusMessagePolicy};
pub use runner::Agent;
pub use state::ConversationState;
