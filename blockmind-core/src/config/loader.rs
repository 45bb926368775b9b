use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

use dotenvy::from_filename;
use serde::Deserialize;
use tracing::{debug, info};

use super::app::{AgentConfig, AppConfig, CoalescerConfig, MemoryConfig, ModelConfig, WorldConfig};
use super::error::ConfigError;
use crate::application::agent::{RepeatPolicy, StatusMessagePolicy};
use crate::application::world::Position;
use crate::constants::{
    CONFIG_PATH, DEFAULT_API_KEY_ENV, DEFAULT_API_PATH, DEFAULT_COALESCE_WINDOW_MS,
    DEFAULT_ENDPOINT, DEFAULT_GAME_MODE, DEFAULT_MAX_TURNS, DEFAULT_MEMORY_DIR, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_USERNAME, ENV_PATH,
};

static ENV_LOADER: Once = Once::new();

pub const ENV_MODEL: &str = "LLM_MODEL";
pub const ENV_TEMPERATURE: &str = "LLM_TEMPERATURE";
pub const ENV_ENDPOINT: &str = "LLM_ENDPOINT";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(super) struct RawConfig {
    model: RawModel,
    agent: RawAgent,
    coalescer: RawCoalescer,
    memory: RawMemory,
    world: RawWorld,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawModel {
    endpoint: Option<String>,
    api_path: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    api_key_env: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawAgent {
    username: Option<String>,
    system_prompt: Option<String>,
    max_turns: Option<usize>,
    status_message: Option<StatusMessagePolicy>,
    repeat_policy: Option<RepeatPolicy>,
    groups: Vec<String>,
    volatile_tools: Option<Vec<String>>,
    address_check: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawCoalescer {
    window_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawMemory {
    dir: Option<String>,
    enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawWorld {
    mode: Option<String>,
    position: Option<Position>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration. An explicit path must exist; the default
/// path falls back to built-in defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let lookup = |var: &str| env::var(var).ok();

    let Some(path) = path else {
        let default_path = Path::new(CONFIG_PATH);
        return match read_file(default_path) {
            Ok(content) => parse_config(&content, default_path, lookup),
            Err(ConfigError::NotFound { .. }) => {
                info!(path = %default_path.display(), "No configuration file, using defaults");
                parse_config("", default_path, lookup)
            }
            Err(err) => Err(err),
        };
    };
    let content = read_file(path)?;
    parse_config(&content, path, lookup)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Parses TOML text, layers environment overrides from `lookup` on top and
/// validates the result.
pub(super) fn parse_config<F>(content: &str, path: &Path, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    apply_env_overrides(&mut parsed, lookup)?;
    validate_and_build(parsed)
}

fn apply_env_overrides<F>(raw: &mut RawConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
        raw.model.model = Some(model);
    }
    if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
        raw.model.endpoint = Some(endpoint);
    }
    if let Some(value) = lookup(ENV_TEMPERATURE).filter(|v| !v.trim().is_empty()) {
        let temperature = value
            .trim()
            .parse::<f32>()
            .map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TEMPERATURE.to_string(),
                value: value.clone(),
            })?;
        raw.model.temperature = Some(temperature);
    }
    Ok(())
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let RawConfig {
        model,
        agent,
        coalescer,
        memory,
        world,
    } = parsed;

    let temperature = model.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ConfigError::InvalidTemperature(temperature));
    }
    let window_ms = coalescer.window_ms.unwrap_or(DEFAULT_COALESCE_WINDOW_MS);
    if window_ms == 0 {
        return Err(ConfigError::InvalidWindow);
    }
    let max_turns = agent.max_turns.unwrap_or(DEFAULT_MAX_TURNS);
    if max_turns == 0 {
        return Err(ConfigError::InvalidTurnLimit);
    }

    let api_key_env = match model.api_key_env {
        Some(name) if name.trim().is_empty() => None,
        Some(name) => Some(name),
        None => Some(DEFAULT_API_KEY_ENV.to_string()),
    };

    Ok(AppConfig {
        model: ModelConfig {
            endpoint: model.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_path: model.api_path.unwrap_or_else(|| DEFAULT_API_PATH.to_string()),
            model: model.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            api_key_env,
        },
        agent: AgentConfig {
            username: agent.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            system_prompt: agent.system_prompt,
            max_turns,
            status_message: agent.status_message.unwrap_or_default(),
            repeat_policy: agent.repeat_policy.unwrap_or_default(),
            groups: agent.groups,
            volatile_tools: agent
                .volatile_tools
                .unwrap_or_else(|| vec!["get_nearby_entities".to_string()]),
            address_check: agent.address_check,
        },
        coalescer: CoalescerConfig {
            window: Duration::from_millis(window_ms),
        },
        memory: MemoryConfig {
            dir: expand_path(memory.dir.as_deref().unwrap_or(DEFAULT_MEMORY_DIR))?,
            enabled: memory.enabled.unwrap_or(true),
        },
        world: WorldConfig {
            mode: world.mode.unwrap_or_else(|| DEFAULT_GAME_MODE.to_string()),
            position: world.position.unwrap_or_default(),
        },
    })
}

fn expand_path(raw: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|err| ConfigError::Expand {
            path: raw.to_string(),
            reason: err.to_string(),
        })
}
