//! # Worktime Core Library
//!
//! Working-time availability: how many business hours a year or a month
//! really offers once weekends, public holidays, vacation and a contingency
//! buffer are taken out. A CLI binary (`worktime`) is a thin layer over this
//! library.
//!
//! ## Architecture
//!
//! - **Calendar**: Easter computation, configurable holiday rules and the
//!   weekend/holiday/working day classifier
//! - **Availability**: The period aggregator with its buffer-day policy
//! - **Countdown**: Remaining hours from "now" to the end of the day, week,
//!   month, quarter and year, plus a cancelable periodic ticker
//! - **Storage**: TOML configuration and per-user period preferences
//!
//! ## Key Components
//!
//! - [`compute_availability`]: The pure calculation entry point
//! - [`Calculator`]: Calculator bound to a custom holiday rule set
//! - [`Countdown`] / [`CountdownTicker`]: Live countdown
//! - [`Config`]: Application configuration management

pub mod availability;
pub mod calendar;
pub mod countdown;
pub mod error;
pub mod storage;

pub use availability::{compute_availability, CalculationRequest, CalculationResult, Calculator};
pub use calendar::{DayKind, HolidayRules, HolidaySet};
pub use countdown::{Countdown, CountdownHandle, CountdownSnapshot, CountdownSink, CountdownTicker};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use storage::{Config, MemoryPreferenceStore, PeriodPreference, PreferenceStore, SqlitePreferenceStore};
