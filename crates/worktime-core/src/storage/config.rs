//! TOML-based application configuration.
//!
//! Stores:
//! - Calculator defaults (hours per day, yearly buffer days)
//! - The holiday rule set (fixed dates and Easter offsets)
//! - The daily working-hour window used by the countdown
//! - Annual vacation and sick-leave allowances
//! - Countdown refresh interval
//!
//! Configuration is stored at `~/.config/worktime/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::availability::{Calculator, DEFAULT_YEARLY_BUFFER_DAYS};
use crate::calendar::HolidayRules;
use crate::countdown::{Countdown, WorkingWindow};
use crate::error::{ConfigError, ValidationError};

/// Calculator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default = "default_hours_per_day")]
    pub default_hours_per_day: f64,
    #[serde(default = "default_yearly_buffer_days")]
    pub yearly_buffer_days: f64,
}

/// Daily working-hour window (local clock hours).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHoursConfig {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

/// Annual absence allowances used by the countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowancesConfig {
    #[serde(default = "default_vacation_days")]
    pub vacation_days: f64,
    #[serde(default = "default_sick_days")]
    pub sick_days: f64,
}

/// Live countdown settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/worktime/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub working_hours: WorkingHoursConfig,
    #[serde(default)]
    pub allowances: AllowancesConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub holidays: HolidayRules,
}

// Default functions
fn default_hours_per_day() -> f64 {
    8.0
}
fn default_yearly_buffer_days() -> f64 {
    DEFAULT_YEARLY_BUFFER_DAYS
}
fn default_start_hour() -> u32 {
    8
}
fn default_end_hour() -> u32 {
    16
}
fn default_vacation_days() -> f64 {
    20.0
}
fn default_sick_days() -> f64 {
    14.0
}
fn default_refresh_interval_ms() -> u64 {
    1000
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_hours_per_day: default_hours_per_day(),
            yearly_buffer_days: default_yearly_buffer_days(),
        }
    }
}

impl Default for WorkingHoursConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl Default for AllowancesConfig {
    fn default() -> Self {
        Self {
            vacation_days: default_vacation_days(),
            sick_days: default_sick_days(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calculator: CalculatorConfig::default(),
            working_hours: WorkingHoursConfig::default(),
            allowances: AllowancesConfig::default(),
            countdown: CountdownConfig::default(),
            holidays: HolidayRules::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning the default when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        cfg.validate().map_err(|e| load_failed(e.to_string()))?;
        Ok(cfg)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config is invalid. `self` is untouched on error.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.update(key, value)?;
        self.save()
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let hours = self.calculator.default_hours_per_day;
        if !(hours > 0.0 && hours <= 24.0) {
            return Err(ValidationError::HoursPerDayOutOfRange { hours });
        }
        for (field, value) in [
            ("calculator.yearly_buffer_days", self.calculator.yearly_buffer_days),
            ("allowances.vacation_days", self.allowances.vacation_days),
            ("allowances.sick_days", self.allowances.sick_days),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ValidationError::NegativeDays { field, value });
            }
        }
        WorkingWindow::new(self.working_hours.start_hour, self.working_hours.end_hour)?;
        self.holidays.validate()?;
        Ok(())
    }

    /// Availability calculator built from the configured rules.
    pub fn calculator(&self) -> Calculator {
        Calculator::new(self.holidays.clone(), self.calculator.yearly_buffer_days)
    }

    /// Live countdown built from the configured window and allowances.
    ///
    /// Falls back to the default window if the configured one is invalid.
    pub fn countdown(&self) -> Countdown {
        let window = WorkingWindow::new(self.working_hours.start_hour, self.working_hours.end_hour)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid working window, using default");
                WorkingWindow::default()
            });
        Countdown::new(
            self.holidays.clone(),
            window,
            self.allowances.vacation_days,
            self.allowances.sick_days,
        )
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}
