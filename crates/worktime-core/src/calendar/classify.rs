use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::holidays::{HolidayRules, HolidaySet};

/// Classification of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Weekend,
    Holiday,
    Working,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classify `date` against the holidays of its year.
///
/// Weekend wins over holiday so that a holiday on a Saturday is counted once.
pub fn classify(date: NaiveDate, holidays: &HolidaySet) -> DayKind {
    if is_weekend(date) {
        DayKind::Weekend
    } else if holidays.contains(date) {
        DayKind::Holiday
    } else {
        DayKind::Working
    }
}

/// Day counts of a closed date interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    pub total: u32,
    pub working: u32,
    pub weekend: u32,
    pub holiday: u32,
}

impl DayCounts {
    fn record(&mut self, kind: DayKind) {
        self.total += 1;
        match kind {
            DayKind::Working => self.working += 1,
            DayKind::Weekend => self.weekend += 1,
            DayKind::Holiday => self.holiday += 1,
        }
    }
}

/// Classify every date in `start..=end` and count each kind.
///
/// Holidays are resolved separately for each year the interval touches.
/// An empty interval (`end < start`) yields zero counts.
pub fn count_days(rules: &HolidayRules, start: NaiveDate, end: NaiveDate) -> DayCounts {
    let mut counts = DayCounts::default();
    let mut holidays: Option<HolidaySet> = None;
    for date in start.iter_days().take_while(|d| *d <= end) {
        let set = match holidays.take() {
            Some(set) if set.year() == date.year() => set,
            _ => rules.holidays_for(date.year()),
        };
        counts.record(classify(date, &set));
        holidays = Some(set);
    }
    counts
}
