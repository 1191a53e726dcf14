//! Live countdown of remaining working hours.

mod engine;
mod ticker;

pub use engine::{Countdown, CountdownSnapshot, Period, WorkingWindow};
pub use ticker::{CountdownHandle, CountdownSink, CountdownTicker};
