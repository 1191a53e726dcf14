use clap::Subcommand;
use worktime_core::availability::period_key;
use worktime_core::{
    CalculationRequest, PeriodPreference, PreferenceStore, SqlitePreferenceStore, ValidationError,
};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show the preference stored for one period
    Get {
        #[arg(long)]
        user: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Store hours per day and vacation days for one period
    Set {
        #[arg(long)]
        user: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
        /// Working hours per day
        #[arg(long)]
        hours: f64,
        /// Vacation days in the period
        #[arg(long, default_value = "0")]
        vacation: f64,
    },
    /// Remove the preference stored for one period
    Remove {
        #[arg(long)]
        user: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
    },
    /// List all preferences of a user as JSON
    List {
        #[arg(long)]
        user: String,
    },
}

pub fn run(action: PrefsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = SqlitePreferenceStore::open()?;

    match action {
        PrefsAction::Get { user, year, month } => {
            let key = checked_period_key(year, month)?;
            match store.get(&user, &key)? {
                Some(pref) => println!("{}", serde_json::to_string_pretty(&pref)?),
                None => return Err(format!("no preference for {user} in {key}").into()),
            }
        }
        PrefsAction::Set {
            user,
            year,
            month,
            hours,
            vacation,
        } => {
            // Same bounds as a calculation request, checked before storing.
            CalculationRequest {
                year,
                month,
                hours_per_day: hours,
                vacation_days: vacation,
                buffer_days: None,
            }
            .validate()?;
            let pref = PeriodPreference {
                working_hours: hours,
                vacation_days: vacation,
            };
            store.set(&user, &period_key(year, month), &pref)?;
            println!("ok");
        }
        PrefsAction::Remove { user, year, month } => {
            let key = checked_period_key(year, month)?;
            if store.remove(&user, &key)? {
                println!("removed");
            } else {
                println!("nothing stored for {user} in {key}");
            }
        }
        PrefsAction::List { user } => {
            let prefs = store.list(&user)?;
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        }
    }
    Ok(())
}

/// Period key for `year`/`month`, rejecting bounds a calculation would reject.
fn checked_period_key(year: i32, month: Option<u32>) -> Result<String, ValidationError> {
    let request = CalculationRequest {
        month,
        ..CalculationRequest::for_year(year)
    };
    request.validate()?;
    Ok(request.period_key())
}
