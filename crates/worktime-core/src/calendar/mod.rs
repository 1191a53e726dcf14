//! Holiday calendar: Easter computation, holiday rule sets and day classification.

mod classify;
mod easter;
mod holidays;

pub use classify::{classify, count_days, is_weekend, DayCounts, DayKind};
pub use easter::{easter_offset, easter_sunday};
pub use holidays::{EasterHoliday, FixedHoliday, HolidayRules, HolidaySet};
