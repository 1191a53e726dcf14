//! Western (Gregorian) Easter computation.
//!
//! Uses the anonymous Gregorian algorithm (Gauss, as published by Meeus).
//! All arithmetic is integer; the result is exact for every Gregorian year.

use chrono::{Duration, NaiveDate};

/// Returns the date of Easter Sunday in the given Gregorian year.
///
/// Returns `None` only if the year lies outside chrono's representable range.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    let month = n / 31;
    let day = n % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Easter Sunday shifted by `offset_days` (Easter Monday is `+1`, Good Friday `-2`).
pub fn easter_offset(year: i32, offset_days: i64) -> Option<NaiveDate> {
    easter_sunday(year)?.checked_add_signed(Duration::days(offset_days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn easter_2024_falls_in_march() {
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_offset(2024, 1), Some(date(2024, 4, 1)));
    }

    #[test]
    fn extreme_dates() {
        // Earliest and latest possible Easter Sundays in the 20th/21st century.
        assert_eq!(easter_sunday(1913), Some(date(1913, 3, 23)));
        assert_eq!(easter_sunday(2008), Some(date(2008, 3, 23)));
        assert_eq!(easter_sunday(1943), Some(date(1943, 4, 25)));
        assert_eq!(easter_sunday(2038), Some(date(2038, 4, 25)));
    }

    #[test]
    fn century_boundaries() {
        assert_eq!(easter_sunday(1900), Some(date(1900, 4, 15)));
        assert_eq!(easter_sunday(2000), Some(date(2000, 4, 23)));
        assert_eq!(easter_sunday(2100), Some(date(2100, 3, 28)));
    }

    #[test]
    fn negative_offset_crosses_month() {
        // Good Friday 2024 is two days before Easter Sunday.
        assert_eq!(easter_offset(2024, -2), Some(date(2024, 3, 29)));
    }
}
