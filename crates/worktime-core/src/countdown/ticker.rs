//! Periodic countdown refresh.
//!
//! A [`CountdownTicker`] recomputes a [`CountdownSnapshot`] on a fixed
//! interval and hands each one to a [`CountdownSink`]. The task runs until
//! [`CountdownHandle::stop`] is called or the handle is dropped.
//!
//! ## Usage
//!
//! ```ignore
//! let handle = CountdownTicker::new(countdown).spawn(|snap| render(&snap));
//! // later:
//! handle.stop().await;
//! ```

use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::{Countdown, CountdownSnapshot};

/// Receives every recomputed snapshot.
pub trait CountdownSink: Send + 'static {
    fn publish(&mut self, snapshot: CountdownSnapshot);
}

impl<F> CountdownSink for F
where
    F: FnMut(CountdownSnapshot) + Send + 'static,
{
    fn publish(&mut self, snapshot: CountdownSnapshot) {
        (*self)(snapshot)
    }
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Builder for the periodic refresh task.
#[derive(Debug, Clone)]
pub struct CountdownTicker {
    countdown: Countdown,
    interval: Duration,
    clock: fn() -> NaiveDateTime,
}

impl CountdownTicker {
    /// Refresh once per second against the local clock.
    pub fn new(countdown: Countdown) -> Self {
        Self {
            countdown,
            interval: Duration::from_secs(1),
            clock: local_now,
        }
    }

    /// Zero intervals are raised to one millisecond.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Start ticking on the current tokio runtime.
    ///
    /// The first snapshot is published immediately.
    pub fn spawn<S: CountdownSink>(self, mut sink: S) -> CountdownHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let Self {
            countdown,
            interval,
            clock,
        } = self;

        tracing::info!(interval_ms = interval.as_millis() as u64, "countdown started");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = 0u64;
            loop {
                tokio::select! {
                    // Fires on stop() and when the handle is dropped.
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        sink.publish(countdown.snapshot_at(clock()));
                        ticks += 1;
                    }
                }
            }
            tracing::info!(ticks, "countdown stopped");
            ticks
        });

        CountdownHandle {
            stop_tx: Some(stop_tx),
            task,
        }
    }
}

/// Handle to a running ticker. Dropping it stops the ticker.
#[derive(Debug)]
pub struct CountdownHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<u64>,
}

impl CountdownHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop recomputing and wait for the task to exit.
    ///
    /// Returns the number of snapshots published.
    pub async fn stop(mut self) -> u64 {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        match (&mut self.task).await {
            Ok(ticks) => ticks,
            Err(e) => {
                tracing::warn!(error = %e, "countdown task ended abnormally");
                0
            }
        }
    }
}
