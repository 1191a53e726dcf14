//! Public-holiday rule sets and per-year holiday resolution.
//!
//! A [`HolidayRules`] value is the configurable part of the calendar: a list
//! of fixed month/day holidays plus holidays anchored to Easter Sunday.
//! [`HolidayRules::holidays_for`] expands the rules into the concrete
//! [`HolidaySet`] of one year. Sets are always rebuilt per year; a set
//! resolved for 2024 says nothing about 2025.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::easter::easter_offset;
use crate::error::ValidationError;

/// A holiday that falls on the same month/day every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub name: String,
}

/// A movable holiday defined as a day offset from Easter Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasterHoliday {
    pub offset_days: i64,
    #[serde(default)]
    pub name: String,
}

impl FixedHoliday {
    fn new(month: u32, day: u32, name: &str) -> Self {
        Self {
            month,
            day,
            name: name.to_string(),
        }
    }
}

impl EasterHoliday {
    fn new(offset_days: i64, name: &str) -> Self {
        Self {
            offset_days,
            name: name.to_string(),
        }
    }
}

/// The set of rules that decides which dates are public holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRules {
    #[serde(default)]
    pub fixed: Vec<FixedHoliday>,
    #[serde(default)]
    pub easter: Vec<EasterHoliday>,
}

impl Default for HolidayRules {
    /// Eleven fixed holidays plus Easter Sunday and Easter Monday.
    fn default() -> Self {
        Self {
            fixed: vec![
                FixedHoliday::new(1, 1, "New Year's Day"),
                FixedHoliday::new(5, 1, "Labour Day"),
                FixedHoliday::new(5, 8, "Liberation Day"),
                FixedHoliday::new(7, 5, "Saints Cyril and Methodius Day"),
                FixedHoliday::new(7, 6, "Jan Hus Day"),
                FixedHoliday::new(9, 28, "Statehood Day"),
                FixedHoliday::new(10, 28, "Independence Day"),
                FixedHoliday::new(11, 17, "Freedom and Democracy Day"),
                FixedHoliday::new(12, 24, "Christmas Eve"),
                FixedHoliday::new(12, 25, "Christmas Day"),
                FixedHoliday::new(12, 26, "St. Stephen's Day"),
            ],
            easter: vec![
                EasterHoliday::new(0, "Easter Sunday"),
                EasterHoliday::new(1, "Easter Monday"),
            ],
        }
    }
}

impl HolidayRules {
    /// An empty rule set: only weekends are non-working.
    pub fn none() -> Self {
        Self {
            fixed: Vec::new(),
            easter: Vec::new(),
        }
    }

    /// Check that every fixed entry names a real calendar day.
    ///
    /// Feb 29 is accepted; it simply resolves to nothing in common years.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for holiday in &self.fixed {
            // 2000 is a leap year, so any month/day that can ever exist parses.
            if NaiveDate::from_ymd_opt(2000, holiday.month, holiday.day).is_none() {
                return Err(ValidationError::InvalidHoliday {
                    name: holiday.name.clone(),
                    message: format!("{}/{} is not a calendar day", holiday.month, holiday.day),
                });
            }
        }
        for holiday in &self.easter {
            if holiday.offset_days.abs() > 180 {
                return Err(ValidationError::InvalidHoliday {
                    name: holiday.name.clone(),
                    message: format!(
                        "Easter offset {} would leave the Easter year",
                        holiday.offset_days
                    ),
                });
            }
        }
        Ok(())
    }

    /// Resolve the holidays of `year`.
    pub fn holidays_for(&self, year: i32) -> HolidaySet {
        let mut dates = BTreeMap::new();
        for holiday in &self.fixed {
            if let Some(date) = NaiveDate::from_ymd_opt(year, holiday.month, holiday.day) {
                dates.entry(date).or_insert_with(|| holiday.name.clone());
            }
        }
        for holiday in &self.easter {
            if let Some(date) = easter_offset(year, holiday.offset_days) {
                if date.year() == year {
                    dates.entry(date).or_insert_with(|| holiday.name.clone());
                }
            }
        }
        HolidaySet { year, dates }
    }
}

/// Ordered holidays of a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidaySet {
    year: i32,
    dates: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Whether `date` is a holiday. Dates from other years never match.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && self.dates.contains_key(&date)
    }

    pub fn name_of(&self, date: NaiveDate) -> Option<&str> {
        self.dates.get(&date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.dates.iter().map(|(d, n)| (*d, n.as_str()))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.keys().copied()
    }
}
