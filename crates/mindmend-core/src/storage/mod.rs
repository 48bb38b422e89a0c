mod config;
pub mod kv;

pub use config::{Config, InsightsConfig, NotificationsConfig, StorageConfig};
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/mindmend[-dev]/` based on MINDMEND_ENV.
///
/// Set MINDMEND_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MINDMEND_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mindmend-dev")
    } else {
        base_dir.join("mindmend")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
