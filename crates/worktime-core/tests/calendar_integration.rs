//! Integration tests for the holiday calendar.

use chrono::{Datelike, NaiveDate};
use worktime_core::calendar::{easter_sunday, HolidayRules};

/// Western Easter Sunday (month, day) for every year from 1900 through 2100.
#[rustfmt::skip]
const REFERENCE_EASTER: [(u32, u32); 201] = [
    (4, 15), (4, 7), (3, 30), (4, 12), (4, 3), (4, 23), (4, 15), (3, 31), (4, 19), (4, 11),
    (3, 27), (4, 16), (4, 7), (3, 23), (4, 12), (4, 4), (4, 23), (4, 8), (3, 31), (4, 20),
    (4, 4), (3, 27), (4, 16), (4, 1), (4, 20), (4, 12), (4, 4), (4, 17), (4, 8), (3, 31),
    (4, 20), (4, 5), (3, 27), (4, 16), (4, 1), (4, 21), (4, 12), (3, 28), (4, 17), (4, 9),
    (3, 24), (4, 13), (4, 5), (4, 25), (4, 9), (4, 1), (4, 21), (4, 6), (3, 28), (4, 17),
    (4, 9), (3, 25), (4, 13), (4, 5), (4, 18), (4, 10), (4, 1), (4, 21), (4, 6), (3, 29),
    (4, 17), (4, 2), (4, 22), (4, 14), (3, 29), (4, 18), (4, 10), (3, 26), (4, 14), (4, 6),
    (3, 29), (4, 11), (4, 2), (4, 22), (4, 14), (3, 30), (4, 18), (4, 10), (3, 26), (4, 15),
    (4, 6), (4, 19), (4, 11), (4, 3), (4, 22), (4, 7), (3, 30), (4, 19), (4, 3), (3, 26),
    (4, 15), (3, 31), (4, 19), (4, 11), (4, 3), (4, 16), (4, 7), (3, 30), (4, 12), (4, 4),
    (4, 23), (4, 15), (3, 31), (4, 20), (4, 11), (3, 27), (4, 16), (4, 8), (3, 23), (4, 12),
    (4, 4), (4, 24), (4, 8), (3, 31), (4, 20), (4, 5), (3, 27), (4, 16), (4, 1), (4, 21),
    (4, 12), (4, 4), (4, 17), (4, 9), (3, 31), (4, 20), (4, 5), (3, 28), (4, 16), (4, 1),
    (4, 21), (4, 13), (3, 28), (4, 17), (4, 9), (3, 25), (4, 13), (4, 5), (4, 25), (4, 10),
    (4, 1), (4, 21), (4, 6), (3, 29), (4, 17), (4, 9), (3, 25), (4, 14), (4, 5), (4, 18),
    (4, 10), (4, 2), (4, 21), (4, 6), (3, 29), (4, 18), (4, 2), (4, 22), (4, 14), (3, 30),
    (4, 18), (4, 10), (3, 26), (4, 15), (4, 6), (3, 29), (4, 11), (4, 3), (4, 22), (4, 14),
    (3, 30), (4, 19), (4, 10), (3, 26), (4, 15), (4, 7), (4, 19), (4, 11), (4, 3), (4, 23),
    (4, 7), (3, 30), (4, 19), (4, 4), (3, 26), (4, 15), (3, 31), (4, 20), (4, 11), (4, 3),
    (4, 16), (4, 8), (3, 30), (4, 12), (4, 4), (4, 24), (4, 15), (3, 31), (4, 20), (4, 12),
    (3, 28),
];

#[test]
fn test_easter_matches_reference_for_every_year() {
    for (offset, &(month, day)) in REFERENCE_EASTER.iter().enumerate() {
        let year = 1900 + offset as i32;
        let expected = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        assert_eq!(easter_sunday(year), Some(expected), "Easter {year}");
    }
}

#[test]
fn test_holiday_set_2024_contains_easter_sunday_and_monday() {
    let set = HolidayRules::default().holidays_for(2024);
    assert!(set.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
    assert!(set.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    assert_eq!(set.name_of(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()), Some("Easter Monday"));
}

#[test]
fn test_every_default_holiday_set_has_thirteen_dates_in_its_year() {
    let rules = HolidayRules::default();
    for year in 1900..=2100 {
        let set = rules.holidays_for(year);
        assert_eq!(set.len(), 13, "year {year}");
        assert!(set.dates().all(|d| d.year() == year));
    }
}
