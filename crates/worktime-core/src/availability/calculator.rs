//! Period aggregator.
//!
//! Walks every date of the requested period, classifies it against the
//! holidays of its year and turns the counts into available working days
//! and hours.
//!
//! ## Buffer resolution
//!
//! 1. An explicit `buffer_days` is used verbatim.
//! 2. A full-year request without one gets the yearly default (14 days).
//! 3. A monthly request without one gets the month's share of the yearly
//!    default, proportional to working days. The yearly working-day count
//!    comes from running this same aggregator for the whole year with zero
//!    vacation and zero buffer.
//!
//! Unrounded values feed the proportional share; rounding happens only when
//! the [`CalculationResult`] is built. Hours are derived from the reported
//! (rounded) available days so the result is self-consistent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::request::CalculationRequest;
use crate::calendar::{count_days, DayCounts, HolidayRules, HolidaySet};
use crate::error::ValidationError;

pub const DEFAULT_YEARLY_BUFFER_DAYS: f64 = 14.0;

/// Output of an availability calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub period: String,
    pub total_days: u32,
    pub working_days: u32,
    pub weekend_days: u32,
    pub holiday_days: u32,
    pub vacation_days: f64,
    pub buffer_days: f64,
    pub available_working_days: f64,
    pub total_working_hours: u32,
    pub hours_per_day: f64,
}

/// Unrounded aggregate, used internally and for the proportional buffer.
#[derive(Debug, Clone, Copy)]
struct Breakdown {
    counts: DayCounts,
    buffer_days: f64,
    available_days: f64,
}

/// Availability calculator bound to a holiday rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    rules: HolidayRules,
    yearly_buffer_days: f64,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(HolidayRules::default(), DEFAULT_YEARLY_BUFFER_DAYS)
    }
}

impl Calculator {
    pub fn new(rules: HolidayRules, yearly_buffer_days: f64) -> Self {
        Self {
            rules,
            yearly_buffer_days,
        }
    }

    pub fn rules(&self) -> &HolidayRules {
        &self.rules
    }

    pub fn yearly_buffer_days(&self) -> f64 {
        self.yearly_buffer_days
    }

    pub fn holidays_for(&self, year: i32) -> HolidaySet {
        self.rules.holidays_for(year)
    }

    /// Count working, weekend and holiday days in `start..=end`.
    pub fn count_days(&self, start: NaiveDate, end: NaiveDate) -> DayCounts {
        count_days(&self.rules, start, end)
    }

    /// Compute availability for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when any input is out of bounds. No dates
    /// are examined in that case.
    pub fn compute(&self, request: &CalculationRequest) -> Result<CalculationResult, ValidationError> {
        let breakdown = self.aggregate(request)?;
        let available = round_tenths(breakdown.available_days);
        let hours = (available * request.hours_per_day).round();

        tracing::debug!(
            period = %request.period_key(),
            working = breakdown.counts.working,
            buffer = breakdown.buffer_days,
            available = breakdown.available_days,
            "computed availability"
        );

        Ok(CalculationResult {
            period: request.period_label(),
            total_days: breakdown.counts.total,
            working_days: breakdown.counts.working,
            weekend_days: breakdown.counts.weekend,
            holiday_days: breakdown.counts.holiday,
            vacation_days: request.vacation_days,
            buffer_days: round_tenths(breakdown.buffer_days),
            available_working_days: available,
            total_working_hours: hours as u32,
            hours_per_day: request.hours_per_day,
        })
    }

    fn aggregate(&self, request: &CalculationRequest) -> Result<Breakdown, ValidationError> {
        request.validate()?;
        let (start, end) = request.date_range()?;
        let counts = self.count_days(start, end);

        let buffer_days = match request.buffer_days {
            Some(explicit) => explicit,
            None if request.is_full_year() => self.yearly_buffer_days,
            None => {
                let yearly = self.aggregate(&CalculationRequest::for_year(request.year).with_buffer_days(0.0))?;
                if yearly.counts.working == 0 {
                    0.0
                } else {
                    self.yearly_buffer_days * f64::from(counts.working)
                        / f64::from(yearly.counts.working)
                }
            }
        };

        let available_days =
            (f64::from(counts.working) - request.vacation_days - buffer_days).max(0.0);

        Ok(Breakdown {
            counts,
            buffer_days,
            available_days,
        })
    }
}

/// Compute availability with the default holiday rules and a 14-day yearly buffer.
///
/// # Errors
///
/// Returns [`ValidationError`] for out-of-range input.
pub fn compute_availability(request: &CalculationRequest) -> Result<CalculationResult, ValidationError> {
    Calculator::default().compute(request)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
