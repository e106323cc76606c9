mod config;
pub mod database;
mod memory;

pub use config::{Config, HabitsConfig, ProgressionConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, PersistenceError};

/// Key holding the JSON array of habit records.
pub const HABITS_KEY: &str = "habitforge_habits";
/// Key holding the `{ xp, level }` progression record.
pub const USER_KEY: &str = "habitforge_user";

/// Key-value collaborator the tracker reads from and writes to.
pub trait KvStore {
    /// Read a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write all entries or none of them.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), PersistenceError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.set_many(&[(key, value)])
    }
}

/// Returns `~/.config/habitforge[-dev]/` based on HABITFORGE_ENV.
///
/// Set HABITFORGE_ENV=dev to use the development data directory, or
/// HABITFORGE_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HABITFORGE_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITFORGE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitforge-dev")
            } else {
                base_dir.join("habitforge")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
