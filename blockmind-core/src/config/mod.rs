pub mod app;
pub mod error;
pub mod loader;

pub use app::{AgentConfig, AppConfig, CoalescerConfig, MemoryConfig, ModelConfig, WorldConfig};
pub use error::ConfigError;
pub use loader::ensure_env_loaded;
