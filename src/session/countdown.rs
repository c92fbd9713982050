//! One-second countdown driver.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A running countdown task and the receiving end of its ticks.
///
/// Dropping the handle aborts the task and discards any undelivered ticks.
pub struct Countdown {
    task: JoinHandle<()>,
    ticks: mpsc::UnboundedReceiver<()>,
}

impl Countdown {
    /// Spawn the ticker on the current tokio runtime. The first tick fires one
    /// period after the call.
    pub fn start() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    fn with_period(period: Duration) -> Self {
        let (tx, ticks) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        debug!(period_ms = period.as_millis() as u64, "countdown started");
        Self { task, ticks }
    }

    /// Number of ticks delivered since the last call.
    pub fn take_elapsed(&mut self) -> u32 {
        let mut elapsed = 0;
        while self.ticks.try_recv().is_ok() {
            elapsed += 1;
        }
        elapsed
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
        debug!("countdown released");
    }
}
