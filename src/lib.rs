/// Public library interface for the habit counter
///
/// Habits, their quick-entry options and logged entries are stored locally
/// as three JSON collections behind a key-value store. `HabitSession` is the
/// entry point for front ends; `Repository` and the storage backends are
/// exposed for tooling and tests.

use thiserror::Error;

pub mod config;
pub mod domain;
pub mod format;
pub mod period;
pub mod repository;
pub mod session;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use config::{BackendKind, Config};
pub use domain::*;
pub use format::{format_number, format_number_with_sign};
pub use period::{display_total, period_start, period_total, target_progress, TargetProgress};
pub use repository::{Collection, Repository};
pub use session::{HabitSession, SessionSnapshot, SessionState};
pub use storage::{open_store, FileStore, KeyValueStore, MemoryStore, SqliteStore, StorageError};

/// Errors surfaced to callers of the session and tools
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("{0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the configured store and load a session from it
///
/// The session's default option comes from `config`.
pub async fn open_session(config: &Config) -> Result<HabitSession, TrackerError> {
    tracing::info!(
        "Opening {} storage in {}",
        config.backend,
        config.data_dir.display()
    );

    let store = open_store(config)?;
    let mut session = HabitSession::new(Repository::new(store))
        .with_default_option(config.default_option_label.clone(), config.default_option_value);
    session.initial_load().await;

    tracing::info!("Session ready with {} habits", session.habits().len());
    Ok(session)
}
