pub mod config;
pub mod gateway;

pub use config::{ChallengeConfig, Config, EngineConfig, LoggingConfig};
pub use gateway::{FileGateway, MemoryGateway, PersistenceGateway, StorageKey};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `GROWTHTREE_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/growthtree[-dev]/`, with `GROWTHTREE_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("GROWTHTREE_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("GROWTHTREE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("growthtree-dev")
            } else {
                base_dir.join("growthtree")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
