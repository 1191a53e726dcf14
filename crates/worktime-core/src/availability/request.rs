use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::storage::PeriodPreference;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

fn default_hours_per_day() -> f64 {
    8.0
}

/// Input of an availability calculation.
///
/// `month == None` spans the whole calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub year: i32,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
    #[serde(default)]
    pub vacation_days: f64,
    /// Explicit contingency allowance. When absent the calculator resolves one.
    #[serde(default)]
    pub buffer_days: Option<f64>,
}

impl CalculationRequest {
    /// Full-year request with 8 hours/day, no vacation and the default buffer.
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            month: None,
            hours_per_day: default_hours_per_day(),
            vacation_days: 0.0,
            buffer_days: None,
        }
    }

    /// Single-month request with 8 hours/day, no vacation and a proportional buffer.
    pub fn for_month(year: i32, month: u32) -> Self {
        Self {
            month: Some(month),
            ..Self::for_year(year)
        }
    }

    pub fn with_hours_per_day(mut self, hours: f64) -> Self {
        self.hours_per_day = hours;
        self
    }

    pub fn with_vacation_days(mut self, days: f64) -> Self {
        self.vacation_days = days;
        self
    }

    pub fn with_buffer_days(mut self, days: f64) -> Self {
        self.buffer_days = Some(days);
        self
    }

    pub fn is_full_year(&self) -> bool {
        self.month.is_none()
    }

    /// Override hours/day and vacation days with a stored preference.
    pub fn apply_preference(&mut self, preference: &PeriodPreference) {
        self.hours_per_day = preference.working_hours;
        self.vacation_days = preference.vacation_days;
    }

    /// Check every bound. Runs before any date is looked at.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(ValidationError::YearOutOfRange {
                year: self.year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::MonthOutOfRange { month });
            }
        }
        // Negated comparisons so that NaN fails too.
        if !(self.hours_per_day > 0.0 && self.hours_per_day <= 24.0) {
            return Err(ValidationError::HoursPerDayOutOfRange {
                hours: self.hours_per_day,
            });
        }
        if !(self.vacation_days.is_finite() && self.vacation_days >= 0.0) {
            return Err(ValidationError::NegativeDays {
                field: "vacation_days",
                value: self.vacation_days,
            });
        }
        if let Some(buffer) = self.buffer_days {
            if !(buffer.is_finite() && buffer >= 0.0) {
                return Err(ValidationError::NegativeDays {
                    field: "buffer_days",
                    value: buffer,
                });
            }
        }
        Ok(())
    }

    /// First and last day (inclusive) of the requested period.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        let out_of_range = || ValidationError::YearOutOfRange {
            year: self.year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        };
        match self.month {
            None => {
                let start = NaiveDate::from_ymd_opt(self.year, 1, 1).ok_or_else(out_of_range)?;
                let end = NaiveDate::from_ymd_opt(self.year, 12, 31).ok_or_else(out_of_range)?;
                Ok((start, end))
            }
            Some(month) => {
                let start = NaiveDate::from_ymd_opt(self.year, month, 1)
                    .ok_or(ValidationError::MonthOutOfRange { month })?;
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(self.year, month + 1, 1)
                };
                let end = next
                    .and_then(|d| d.pred_opt())
                    .ok_or(ValidationError::MonthOutOfRange { month })?;
                Ok((start, end))
            }
        }
    }

    /// Preference key: `"2025"` or `"2025_8"`.
    pub fn period_key(&self) -> String {
        period_key(self.year, self.month)
    }

    /// Human label: `"2025"` or `"August 2025"`.
    pub fn period_label(&self) -> String {
        match self.month.and_then(|m| u8::try_from(m).ok()).and_then(|m| Month::try_from(m).ok()) {
            Some(month) => format!("{} {}", month.name(), self.year),
            None => self.year.to_string(),
        }
    }
}

pub fn period_key(year: i32, month: Option<u32>) -> String {
    match month {
        Some(month) => format!("{year}_{month}"),
        None => year.to_string(),
    }
}
