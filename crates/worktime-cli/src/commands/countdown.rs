use std::time::Duration;

use clap::Args;
use worktime_core::{Config, CountdownSnapshot, CountdownTicker, DayKind};

#[derive(Args)]
pub struct CountdownArgs {
    /// Keep refreshing instead of printing once
    #[arg(long)]
    pub watch: bool,
    /// Refresh interval in milliseconds (defaults to countdown.refresh_interval_ms)
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Stop watching after this many refreshes
    #[arg(long)]
    pub count: Option<u64>,
    /// Print JSON lines instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CountdownArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let countdown = config.countdown();

    if !args.watch {
        let snapshot = countdown.snapshot_at(chrono::Local::now().naive_local());
        print_snapshot(&snapshot, args.json)?;
        return Ok(());
    }

    let interval = Duration::from_millis(
        args.interval_ms
            .unwrap_or(config.countdown.refresh_interval_ms),
    );
    tracing::debug!(interval_ms = interval.as_millis() as u64, count = ?args.count, "watching countdown");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<CountdownSnapshot>();
        let handle = CountdownTicker::new(countdown)
            .with_interval(interval)
            .spawn(move |snapshot: CountdownSnapshot| {
                let _ = tx.send(snapshot);
            });

        let mut printed = 0u64;
        while let Some(snapshot) = rx.recv().await {
            print_snapshot(&snapshot, args.json)?;
            printed += 1;
            if args.count.is_some_and(|limit| printed >= limit) {
                break;
            }
        }
        handle.stop().await;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn print_snapshot(
    snapshot: &CountdownSnapshot,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    let today = match snapshot.today {
        DayKind::Working => "working day",
        DayKind::Weekend => "weekend",
        DayKind::Holiday => "holiday",
    };
    println!("{} ({today})", snapshot.at.format("%Y-%m-%d %H:%M:%S"));
    println!("  day:     {:>8.2} h", snapshot.day_hours);
    println!("  week:    {:>8.2} h", snapshot.week_hours);
    println!("  month:   {:>8.2} h", snapshot.month_hours);
    println!("  quarter: {:>8.2} h", snapshot.quarter_hours);
    println!("  year:    {:>8.2} h", snapshot.year_hours);
    Ok(())
}
