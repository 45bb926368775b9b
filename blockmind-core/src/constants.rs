//! Application constants
//!
//! Single source of truth for defaults shared by the config loader, the agent and the CLI.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/agent.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:1234";
pub const DEFAULT_API_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_USERNAME: &str = "Bot";
pub const DEFAULT_GAME_MODE: &str = "survival";

/// Upper bound on model requests issued for a single reply.
pub const DEFAULT_MAX_TURNS: usize = 25;

/// Number of most recent tool names remembered for repeat detection.
pub const REPEAT_HISTORY_CAPACITY: usize = 3;

pub const DEFAULT_COALESCE_WINDOW_MS: u64 = 3_000;

pub const DEFAULT_MEMORY_DIR: &str = "bots-data";
pub const MEMORY_FILE_NAME: &str = "memory.json";

pub const DEFAULT_ENTITY_SEARCH_DISTANCE: f64 = 100.0;

/// The only text an end user ever sees when the loop fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error in LLM request";
