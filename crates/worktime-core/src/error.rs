//! Core error types for worktime-core.
//!
//! This module defines the error hierarchy using thiserror. Every
//! calculation failure is a [`ValidationError`]; the remaining variants
//! belong to the configuration and preference-storage layers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for worktime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid calculation input
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Preference storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input validation errors.
///
/// Raised synchronously before any date iteration takes place. A failed
/// call leaves nothing behind, so callers should surface the message
/// verbatim rather than retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("year {year} is out of range (must be {min}..={max})")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("month {month} is out of range (must be 1..=12)")]
    MonthOutOfRange { month: u32 },

    #[error("hours per day {hours} is out of range (must be > 0 and <= 24)")]
    HoursPerDayOutOfRange { hours: f64 },

    #[error("{field} must be a non-negative number, got {value}")]
    NegativeDays { field: &'static str, value: f64 },

    #[error("invalid working window: start hour {start} must be before end hour {end} (both 0..=24)")]
    InvalidWorkingWindow { start: u32, end: u32 },

    #[error("invalid holiday '{name}': {message}")]
    InvalidHoliday { name: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Preference storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Stored value could not be decoded
    #[error("Corrupt preference for {user_id}/{period_key}: {message}")]
    Corrupt {
        user_id: String,
        period_key: String,
        message: String,
    },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) if e.code == rusqlite::ErrorCode::DatabaseLocked => {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_descriptive() {
        let err = ValidationError::YearOutOfRange { year: 1899, min: 1900, max: 2100 };
        assert_eq!(err.to_string(), "year 1899 is out of range (must be 1900..=2100)");

        let err = ValidationError::MonthOutOfRange { month: 13 };
        assert!(err.to_string().contains("13"));
    }

    #[test]
    fn validation_converts_into_core_error() {
        let core: CoreError = ValidationError::MonthOutOfRange { month: 0 }.into();
        assert!(matches!(core, CoreError::Validation(_)));
        assert!(core.to_string().starts_with("Invalid input:"));
    }
}
