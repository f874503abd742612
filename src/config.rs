/// Startup configuration
///
/// Picks the storage backend and data directory once at startup, plus the
/// option created for habits that have none.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::{DEFAULT_OPTION_LABEL, DEFAULT_OPTION_VALUE};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "HABIT_COUNTER_DATA_DIR";

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE: &str = "habits.db";

/// Which key-value backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// SQLite database file (on-device store)
    #[default]
    Sqlite,
    /// One JSON file per key
    File,
    /// Nothing persisted
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::File => "file",
            BackendKind::Memory => "memory",
        })
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(BackendKind::Sqlite),
            "file" | "json" => Ok(BackendKind::File),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!(
                "unknown backend '{}', expected sqlite, file or memory",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub data_dir: PathBuf,
    pub default_option_label: String,
    pub default_option_value: f64,
}

impl Config {
    /// Build a config, resolving the data directory if none was given
    ///
    /// Order: explicit path, then `HABIT_COUNTER_DATA_DIR`, then the first
    /// writable default location.
    pub fn resolve(backend: BackendKind, data_dir: Option<PathBuf>) -> std::io::Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match std::env::var_os(DATA_DIR_ENV) {
                Some(dir) => PathBuf::from(dir),
                None => default_data_dir()?,
            },
        };

        Ok(Self {
            backend,
            data_dir,
            ..Self::default()
        })
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// Create the data directory if it is missing
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: PathBuf::from(".habit_counter"),
            default_option_label: DEFAULT_OPTION_LABEL.to_string(),
            default_option_value: DEFAULT_OPTION_VALUE,
        }
    }
}

/// Find a writable default data directory
fn default_data_dir() -> std::io::Result<PathBuf> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".habit_counter")),
        dirs::data_dir().map(|p| p.join("habit_counter")),
        dirs::config_dir().map(|p| p.join("habit_counter")),
        std::env::current_dir().ok().map(|p| p.join(".habit_counter")),
    ];

    for candidate in candidates.iter().flatten() {
        if std::fs::create_dir_all(candidate).is_ok() {
            let probe = candidate.join(".test_write");
            if std::fs::write(&probe, "test").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return Ok(candidate.clone());
            }
        }
    }

    let fallback = std::env::temp_dir().join("habit_counter");
    std::fs::create_dir_all(&fallback)?;
    tracing::warn!("Using temporary directory for data: {}", fallback.display());
    Ok(fallback)
}
