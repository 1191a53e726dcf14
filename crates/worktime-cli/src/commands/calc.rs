use clap::Args;
use worktime_core::storage::{apply_stored_preference, SqlitePreferenceStore};
use worktime_core::{CalculationRequest, CalculationResult, Config};

#[derive(Args)]
pub struct CalcArgs {
    /// Calendar year (1900-2100)
    #[arg(long)]
    pub year: i32,
    /// Month (1-12); omit for the full year
    #[arg(long)]
    pub month: Option<u32>,
    /// Working hours per day (defaults to calculator.default_hours_per_day)
    #[arg(long)]
    pub hours: Option<f64>,
    /// Vacation days taken in the period (defaults to 0)
    #[arg(long)]
    pub vacation: Option<f64>,
    /// Explicit buffer days; omit to use the yearly default or its monthly share
    #[arg(long)]
    pub buffer: Option<f64>,
    /// Apply the stored preference of this user for the period; explicit
    /// --hours and --vacation still take precedence
    #[arg(long)]
    pub user: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CalcArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    let mut request = CalculationRequest {
        year: args.year,
        month: args.month,
        hours_per_day: config.calculator.default_hours_per_day,
        vacation_days: 0.0,
        buffer_days: args.buffer,
    };

    if let Some(user) = args.user.as_deref() {
        let store = SqlitePreferenceStore::open()?;
        if !apply_stored_preference(&store, user, &mut request)? {
            tracing::info!(user, period = %request.period_key(), "no stored preference");
        }
    }

    if let Some(hours) = args.hours {
        request.hours_per_day = hours;
    }
    if let Some(vacation) = args.vacation {
        request.vacation_days = vacation;
    }

    let result = config.calculator().compute(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_table(&result);
    }
    Ok(())
}

fn print_table(result: &CalculationResult) {
    println!("Period:                 {}", result.period);
    println!("Total days:             {}", result.total_days);
    println!("Working days:           {}", result.working_days);
    println!("Weekend days:           {}", result.weekend_days);
    println!("Holidays:               {}", result.holiday_days);
    println!("Vacation days:          {}", result.vacation_days);
    println!("Buffer days:            {:.1}", result.buffer_days);
    println!("Available working days: {:.1}", result.available_working_days);
    println!("Hours per day:          {}", result.hours_per_day);
    println!("Total working hours:    {}", result.total_working_hours);
}
