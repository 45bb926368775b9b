//! Conversation snapshots.
//!
//! A snapshot is the complete ordered message list of one agent. Every save
//! replaces the previous snapshot wholesale.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::constants::MEMORY_FILE_NAME;
use crate::domain::types::ChatMessage;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("memory I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("memory snapshot at {path:?} is not valid: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait Memory: Send + Sync {
    /// Overwrites the stored snapshot. A `load` issued after this returns
    /// observes the new snapshot.
    async fn save(&self, messages: &[ChatMessage]) -> Result<(), MemoryError>;

    /// Latest snapshot, or `None` when nothing was saved yet.
    async fn load(&self) -> Result<Option<Vec<ChatMessage>>, MemoryError>;
}

/// One pretty-printed JSON file per agent at `{dir}/{username}/memory.json`.
#[derive(Debug, Clone)]
pub struct JsonFileMemory {
    path: PathBuf,
}

impl JsonFileMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_agent(dir: impl AsRef<Path>, username: &str) -> Self {
        Self::new(dir.as_ref().join(username).join(MEMORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> MemoryError {
        MemoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl Memory for JsonFileMemory {
    async fn save(&self, messages: &[ChatMessage]) -> Result<(), MemoryError> {
        let body = serde_json::to_vec_pretty(messages).map_err(|source| MemoryError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        // Write-then-rename so a crash never leaves a truncated snapshot.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body).await.map_err(|e| self.io_error(e))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), messages = messages.len(), "memory saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Vec<ChatMessage>>, MemoryError> {
        let body = match fs::read(&self.path).await {
            Ok(body) => body,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };
        let messages = serde_json::from_slice(&body).map_err(|source| MemoryError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(messages))
    }
}

/// Process-local memory, used when persistence is disabled.
#[derive(Debug, Default)]
pub struct InMemoryMemory {
    snapshot: Mutex<Option<Vec<ChatMessage>>>,
}

impl InMemoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(messages: Vec<ChatMessage>) -> Self {
        Self {
            snapshot: Mutex::new(Some(messages)),
        }
    }
}

#[async_trait]
impl Memory for InMemoryMemory {
    async fn save(&self, messages: &[ChatMessage]) -> Result<(), MemoryError> {
        *self.snapshot.lock().await = Some(messages.to_vec());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Vec<ChatMessage>>, MemoryError> {
        Ok(self.snapshot.lock().await.clone())
    }
}
