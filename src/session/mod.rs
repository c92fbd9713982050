//! Timed quiz sessions.

mod countdown;
mod state;

pub use countdown::{Countdown, TICK_PERIOD};
pub use state::{format_time, Phase, ScoreBand, Session, DEFAULT_TIME_LIMIT_SECS, LOW_TIME_SECS};
