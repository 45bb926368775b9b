use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::ConfigError;
use crate::application::agent::{AgentOptions, RepeatPolicy, StatusMessagePolicy};
use crate::application::world::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub endpoint: String,
    pub api_path: String,
    pub model: String,
    pub temperature: f32,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub username: String,
    pub system_prompt: Option<String>,
    pub max_turns: usize,
    pub status_message: StatusMessagePolicy,
    pub repeat_policy: RepeatPolicy,
    pub groups: Vec<String>,
    /// Tool results dropped from history after each reply.
    pub volatile_tools: Vec<String>,
    pub address_check: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoalescerConfig {
    pub window: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConfig {
    pub dir: PathBuf,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub mode: String,
    pub position: Position,
}

/// Application configuration loaded from agent.toml
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub agent: AgentConfig,
    pub coalescer: CoalescerConfig,
    pub memory: MemoryConfig,
    pub world: WorldConfig,
}

impl AppConfig {
    /// Load configuration from a file path, or from the default path if None.
    /// A missing default file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration text without consulting the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, Path::new("<inline>"), |_| None)
    }

    pub fn agent_options(&self) -> AgentOptions {
        let mut options = AgentOptions::new(self.model.model.clone(), self.model.temperature)
            .with_max_turns(self.agent.max_turns)
            .with_status_message(self.agent.status_message)
            .with_repeat_policy(self.agent.repeat_policy)
            .with_groups(self.agent.groups.iter().cloned());
        if let Some(prompt) = &self.agent.system_prompt {
            options = options.with_system_prompt(prompt.clone());
        }
        options
    }
}
