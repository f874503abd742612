/// Storage layer for persisting habit data
///
/// Everything is stored as JSON text under a handful of string keys. This
/// module defines the key-value interface the repository talks to and the
/// backends that implement it.

pub mod sqlite;
pub mod migrations;
pub mod file;
pub mod memory;

// Re-export the main storage types
pub use sqlite::SqliteStore;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{BackendKind, Config};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error in '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Asynchronous string key-value store
///
/// There is no atomicity across keys and no transactions. Reading a key that
/// was never written returns `Ok(None)`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting an absent key succeeds
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Open the backend selected in `config`
pub fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        BackendKind::Sqlite => {
            config.ensure_data_dir()?;
            Arc::new(SqliteStore::new(config.database_path())?)
        }
        BackendKind::File => Arc::new(FileStore::new(config.data_dir.clone())),
        BackendKind::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!("Opened {} storage backend", config.backend);
    Ok(store)
}
