mod config;
pub mod preferences;

pub use config::{AllowancesConfig, CalculatorConfig, Config, CountdownConfig, WorkingHoursConfig};
pub use preferences::{
    apply_stored_preference, MemoryPreferenceStore, PeriodPreference, PreferenceStore,
    SqlitePreferenceStore,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/worktime[-dev]/` based on WORKTIME_ENV.
///
/// Set WORKTIME_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WORKTIME_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("worktime-dev")
    } else {
        base_dir.join("worktime")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
