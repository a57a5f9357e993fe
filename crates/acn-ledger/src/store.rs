//! Ledger persistence
//!
//! The whole ledger is one JSON document. Stores load it in full and replace
//! it in full; the file store writes a sibling temp file and renames it over
//! the target so a crash never leaves a truncated ledger behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{LedgerError, LedgerState, Result};

/// Backing storage for a [`crate::CreditLedger`]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the full document; an absent document is an empty ledger
    async fn load(&self) -> Result<LedgerState>;

    /// Replace the full document
    async fn save(&self, state: &LedgerState) -> Result<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    async fn load(&self) -> Result<LedgerState> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| LedgerError::Serialization {
                message: format!("{}: {}", self.path.display(), e),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerState::default()),
            Err(e) => Err(LedgerError::Store {
                message: format!("failed to read {}: {}", self.path.display(), e),
            }),
        }
    }

    async fn save(&self, state: &LedgerState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(state).map_err(|e| LedgerError::Serialization {
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| LedgerError::Store {
                message: format!("failed to create {}: {}", parent.display(), e),
            })?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| LedgerError::Store {
            message: format!("failed to write {}: {}", tmp.display(), e),
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| LedgerError::Store {
            message: format!("failed to replace {}: {}", self.path.display(), e),
        })?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Ledger saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store for tests and ephemeral servers
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Arc<Mutex<Option<LedgerState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the last saved document
    pub async fn snapshot(&self) -> Option<LedgerState> {
        self.document.lock().await.clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> Result<LedgerState> {
        Ok(self.document.lock().await.clone().unwrap_or_default())
    }

    async fn save(&self, state: &LedgerState) -> Result<()> {
        *self.document.lock().await = Some(state.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
