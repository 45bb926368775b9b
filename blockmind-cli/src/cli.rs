use std::path::PathBuf;

use blockmind_core::AppConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "blockmind",
    version,
    about = "LLM game agent fed from chat lines on standard input"
)]
pub struct Cli {
    /// Configuration file (defaults to config/agent.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub username: Option<String>,
    /// Game mode, e.g. survival or creative
    #[arg(long)]
    pub mode: Option<String>,
    /// Extra tool group to enable; repeatable
    #[arg(long = "group")]
    pub groups: Vec<String>,
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    /// Keep the conversation in memory only
    #[arg(long)]
    pub no_memory: bool,
    /// Print each reply with its tool steps as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Command-line flags win over the configuration file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(username) = &self.username {
            config.agent.username = username.clone();
        }
        if let Some(mode) = &self.mode {
            config.world.mode = mode.clone();
        }
        for group in &self.groups {
            if !config.agent.groups.contains(group) {
                config.agent.groups.push(group.clone());
            }
        }
        if let Some(endpoint) = &self.endpoint {
            config.model.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            config.model.model = model.clone();
        }
        if self.no_memory {
            config.memory.enabled = false;
        }
    }
}
