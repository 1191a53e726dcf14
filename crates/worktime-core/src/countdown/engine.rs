//! Remaining working hours from "now" to the end of the current day, week,
//! month, quarter and year.
//!
//! Unlike the availability calculator this looks forward from a point in
//! time, and it accounts for absence differently: the annual vacation plus
//! sick-leave allowance is spread over the period by the share of the year
//! that is left in it, scaled by 5/7 for the working part of a week. The
//! planner's buffer-day policy does not apply here.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::{classify, count_days, DayKind, HolidayRules};
use crate::error::ValidationError;

const WORKING_WEEK_FRACTION: f64 = 5.0 / 7.0;

/// Daily working-hour window, in whole local clock hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkingWindow {
    start_hour: u32,
    end_hour: u32,
}

impl Default for WorkingWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 16,
        }
    }
}

impl WorkingWindow {
    /// # Errors
    /// Returns [`ValidationError::InvalidWorkingWindow`] unless `start < end <= 24`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ValidationError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ValidationError::InvalidWorkingWindow {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Length of a full working day in hours.
    pub fn span_hours(&self) -> f64 {
        f64::from(self.end_hour - self.start_hour)
    }

    /// Hours left in the window at `now`: the full span before it opens,
    /// zero once it has closed.
    pub fn hours_left_at(&self, now: NaiveDateTime) -> f64 {
        let secs = now.time().num_seconds_from_midnight();
        let start = self.start_hour * 3600;
        let end = self.end_hour * 3600;
        if secs < start {
            self.span_hours()
        } else if secs >= end {
            0.0
        } else {
            f64::from(end - secs) / 3600.0
        }
    }
}

/// Remaining working hours at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub at: NaiveDateTime,
    pub today: DayKind,
    pub day_hours: f64,
    pub week_hours: f64,
    pub month_hours: f64,
    pub quarter_hours: f64,
    pub year_hours: f64,
}

/// The periods a snapshot reports on, beyond the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Last day (inclusive) of the period containing `date`.
    ///
    /// Weeks run Monday to Sunday.
    pub fn end_of(self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => {
                date + Duration::days(6 - i64::from(date.weekday().num_days_from_monday()))
            }
            Period::Month => last_day_of_month(date.year(), date.month()).unwrap_or(date),
            Period::Quarter => {
                let quarter_end_month = (date.month() - 1) / 3 * 3 + 3;
                last_day_of_month(date.year(), quarter_end_month).unwrap_or(date)
            }
            Period::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next.pred_opt()
}

fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

/// Live countdown calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    rules: HolidayRules,
    window: WorkingWindow,
    vacation_days: f64,
    sick_days: f64,
}

impl Default for Countdown {
    /// Default holidays, 8:00-16:00, 20 vacation days and 14 sick days a year.
    fn default() -> Self {
        Self::new(HolidayRules::default(), WorkingWindow::default(), 20.0, 14.0)
    }
}

impl Countdown {
    pub fn new(rules: HolidayRules, window: WorkingWindow, vacation_days: f64, sick_days: f64) -> Self {
        Self {
            rules,
            window,
            vacation_days,
            sick_days,
        }
    }

    pub fn window(&self) -> WorkingWindow {
        self.window
    }

    /// Annual vacation plus sick-leave days.
    pub fn annual_absence_days(&self) -> f64 {
        self.vacation_days + self.sick_days
    }

    /// Today's contribution: the clock time left in the window, or zero on
    /// weekends and holidays.
    pub fn today_hours(&self, now: NaiveDateTime) -> (DayKind, f64) {
        let date = now.date();
        let kind = classify(date, &self.rules.holidays_for(date.year()));
        let hours = match kind {
            DayKind::Working => self.window.hours_left_at(now),
            DayKind::Weekend | DayKind::Holiday => 0.0,
        };
        (kind, hours)
    }

    /// Remaining hours in `period`, after the absence allowance share.
    pub fn remaining_in(&self, period: Period, now: NaiveDateTime) -> f64 {
        let (_, today) = self.today_hours(now);
        self.remaining_with_today(period, now.date(), today)
    }

    fn remaining_with_today(&self, period: Period, today: NaiveDate, today_hours: f64) -> f64 {
        let end = period.end_of(today);
        let span = self.window.span_hours();

        let upcoming = match today.succ_opt() {
            Some(tomorrow) => count_days(&self.rules, tomorrow, end).working,
            None => 0,
        };
        let raw = today_hours + f64::from(upcoming) * span;

        let days_left = (end - today).num_days() + 1;
        let absence_days = self.annual_absence_days() * days_left as f64
            / days_in_year(today.year())
            * WORKING_WEEK_FRACTION;

        (raw - absence_days * span).max(0.0)
    }

    /// Compute every figure at `now`.
    pub fn snapshot_at(&self, now: NaiveDateTime) -> CountdownSnapshot {
        let date = now.date();
        let (today, day_hours) = self.today_hours(now);
        CountdownSnapshot {
            at: now,
            today,
            day_hours,
            week_hours: self.remaining_with_today(Period::Week, date, day_hours),
            month_hours: self.remaining_with_today(Period::Month, date, day_hours),
            quarter_hours: self.remaining_with_today(Period::Quarter, date, day_hours),
            year_hours: self.remaining_with_today(Period::Year, date, day_hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn window_rejects_inverted_or_overlong() {
        assert!(WorkingWindow::new(16, 8).is_err());
        assert!(WorkingWindow::new(8, 8).is_err());
        assert!(WorkingWindow::new(0, 25).is_err());
        assert!(WorkingWindow::new(0, 24).is_ok());
    }

    #[test]
    fn hours_left_in_window() {
        let window = WorkingWindow::default();
        assert_eq!(window.hours_left_at(at(2025, 8, 13, 7, 59)), 8.0);
        assert_eq!(window.hours_left_at(at(2025, 8, 13, 10, 30)), 5.5);
        assert_eq!(window.hours_left_at(at(2025, 8, 13, 16, 0)), 0.0);
        assert_eq!(window.hours_left_at(at(2025, 8, 13, 23, 0)), 0.0);
    }

    #[test]
    fn period_ends() {
        let wed = date(2025, 8, 13);
        assert_eq!(Period::Week.end_of(wed), date(2025, 8, 17));
        assert_eq!(Period::Week.end_of(date(2025, 8, 17)), date(2025, 8, 17));
        assert_eq!(Period::Month.end_of(wed), date(2025, 8, 31));
        assert_eq!(Period::Quarter.end_of(wed), date(2025, 9, 30));
        assert_eq!(Period::Quarter.end_of(date(2025, 12, 1)), date(2025, 12, 31));
        assert_eq!(Period::Year.end_of(wed), date(2025, 12, 31));
    }

    #[test]
    fn midweek_snapshot() {
        let snap = Countdown::default().snapshot_at(at(2025, 8, 13, 10, 30));
        assert_eq!(snap.today, DayKind::Working);
        assert_close(snap.day_hours, 5.5);
        // 5.5 + 2 days * 8h - 34 * 5/365 * 5/7 * 8h
        assert_close(snap.week_hours, 18.838551859099805);
        assert_close(snap.month_hours, 91.38649706457926);
        assert_close(snap.quarter_hours, 251.41780821917808);
        assert_close(snap.year_hours, 690.4471624266145);
    }

    #[test]
    fn weekend_has_no_day_hours_and_clamps_week() {
        let snap = Countdown::default().snapshot_at(at(2025, 8, 16, 12, 0));
        assert_eq!(snap.today, DayKind::Weekend);
        assert_eq!(snap.day_hours, 0.0);
        assert_eq!(snap.week_hours, 0.0);
        assert_close(snap.month_hours, 71.48336594911937);
    }

    #[test]
    fn holiday_has_no_day_hours() {
        // Easter Monday 2024, before the window opens.
        let snap = Countdown::default().snapshot_at(at(2024, 4, 1, 7, 0));
        assert_eq!(snap.today, DayKind::Holiday);
        assert_eq!(snap.day_hours, 0.0);
        assert_close(snap.week_hours, 28.284153005464482);
    }

    #[test]
    fn before_window_counts_full_day() {
        let snap = Countdown::default().snapshot_at(at(2025, 12, 31, 7, 0));
        assert_eq!(snap.day_hours, 8.0);
        // The week runs into 2026: Jan 1 is a holiday, Jan 2 a working day.
        assert_close(snap.week_hours, 13.338551859099805);
        assert_close(snap.year_hours, 7.467710371819961);
    }

    #[test]
    fn no_allowance_gives_raw_hours() {
        let countdown = Countdown::new(HolidayRules::default(), WorkingWindow::default(), 0.0, 0.0);
        let snap = countdown.snapshot_at(at(2025, 8, 13, 10, 30));
        assert_close(snap.week_hours, 21.5);
        assert_close(countdown.remaining_in(Period::Month, at(2025, 8, 13, 10, 30)), 5.5 + 12.0 * 8.0);
    }
}
