mod config;
pub mod database;
pub mod transfer;

pub use config::{BlogConfig, Config, DisplayConfig, StatsConfig};
pub use database::Database;
pub use transfer::{ExportDocument, ImportSummary};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `CUBELOG_HOME` names the directory outright. Otherwise it is
/// `~/.config/cubelog`, or `~/.config/cubelog-dev` when `CUBELOG_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("CUBELOG_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CUBELOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("cubelog-dev")
            } else {
                base_dir.join("cubelog")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
