//! Working-time availability for a year or a single month.

mod calculator;
mod request;

pub use calculator::{
    compute_availability, CalculationResult, Calculator, DEFAULT_YEARLY_BUFFER_DAYS,
};
pub use request::{period_key, CalculationRequest, MAX_YEAR, MIN_YEAR};
