// Config loading tests - testing AppConfig::load error handling
//
// Tests focused on configuration file loading and validation errors.

use blockmind_core::agent::{RepeatPolicy, StatusMessagePolicy};
use blockmind_core::config::{AppConfig, ConfigError};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("agent.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn returns_error_when_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/agent.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn returns_error_on_invalid_toml() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[agent\nusername = ");
    let result = AppConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn returns_error_on_zero_window() {
    let result = AppConfig::from_toml_str("[coalescer]\nwindow_ms = 0\n");
    assert!(matches!(result, Err(ConfigError::InvalidWindow)));
}

#[test]
fn loads_full_file() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
[model]
endpoint = "http://localhost:8080"
api_path = "/v1/chat/completions"
model = "qwen3-8b"
temperature = 0.4
api_key_env = ""

[agent]
username = "Digger"
system_prompt = "You are {username}, a quiet miner."
max_turns = 10
status_message = "persisted"
repeat_policy = "block"
groups = ["combat"]
address_check = true

[coalescer]
window_ms = 1200

[memory]
enabled = false

[world]
mode = "creative"
"#,
    );

    let config = AppConfig::load(Some(&path)).expect("valid config");
    assert_eq!(config.model.endpoint, "http://localhost:8080");
    assert_eq!(config.model.api_key_env, None);
    assert_eq!(config.agent.username, "Digger");
    assert!(config.agent.address_check);
    assert_eq!(config.coalescer.window, Duration::from_millis(1200));
    assert!(!config.memory.enabled);
    assert_eq!(config.world.mode, "creative");

    let options = config.agent_options();
    assert_eq!(options.model, "qwen3-8b");
    assert_eq!(options.max_turns, 10);
    assert_eq!(options.status_message, StatusMessagePolicy::Persisted);
    assert_eq!(options.repeat_policy, RepeatPolicy::Block);
    assert!(options.groups.contains("combat"));
    assert_eq!(options.system_prompt, "You are {username}, a quiet miner.");
}
