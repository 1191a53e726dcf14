use clap::Args;
use serde::Serialize;
use worktime_core::availability::{MAX_YEAR, MIN_YEAR};
use worktime_core::{Config, ValidationError};

#[derive(Args)]
pub struct HolidaysArgs {
    /// Calendar year (1900-2100)
    #[arg(long)]
    pub year: i32,
    /// Print JSON instead of a list
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct HolidayEntry<'a> {
    date: chrono::NaiveDate,
    weekday: String,
    name: &'a str,
}

pub fn run(args: HolidaysArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&args.year) {
        return Err(ValidationError::YearOutOfRange {
            year: args.year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
        .into());
    }

    let config = Config::load_or_default();
    let set = config.calculator().holidays_for(args.year);
    let entries: Vec<HolidayEntry<'_>> = set
        .iter()
        .map(|(date, name)| HolidayEntry {
            date,
            weekday: date.format("%A").to_string(),
            name,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}  {:<9}  {}", entry.date, entry.weekday, entry.name);
        }
    }
    Ok(())
}
