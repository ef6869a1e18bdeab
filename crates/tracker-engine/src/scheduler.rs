//! Fixed-interval cycle scheduler.

use std::future::Future;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::info;
use tracker_core::error::{TrackerError, TrackerResult};

use crate::tracker::Tracker;

/// Longest supported interval between cycles: one year.
pub const MAX_INTERVAL_HOURS: u64 = 24 * 365;

/// Invokes [`Tracker::run_cycle`] on a fixed cadence.
///
/// Cycles never overlap: the next tick is only awaited once the current cycle
/// has finished, and a cycle that overruns the interval pushes the following
/// ticks back instead of bunching them up.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    run_immediately: bool,
}

impl Scheduler {
    /// Create a scheduler that runs a cycle right away and then every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            run_immediately: true,
        }
    }

    /// Create a scheduler with an interval in hours.
    ///
    /// Rejects zero and anything above [`MAX_INTERVAL_HOURS`].
    pub fn every_hours(hours: u64) -> TrackerResult<Self> {
        if !(1..=MAX_INTERVAL_HOURS).contains(&hours) {
            return Err(TrackerError::Config(format!(
                "interval must be between 1 and {} hours, got {}",
                MAX_INTERVAL_HOURS, hours
            )));
        }
        let secs = hours
            .checked_mul(3600)
            .ok_or_else(|| TrackerError::Config(format!("interval of {} hours overflows", hours)))?;
        Ok(Self::new(Duration::from_secs(secs)))
    }

    /// Wait one full interval before the first cycle.
    pub fn skip_initial(mut self) -> Self {
        self.run_immediately = false;
        self
    }

    /// Run cycles until `shutdown` resolves.
    ///
    /// A cycle already in progress when `shutdown` fires is allowed to finish.
    ///
    /// # Returns
    /// The number of cycles run
    pub async fn run<F>(&self, tracker: &Tracker, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let start = if self.run_immediately {
            Instant::now()
        } else {
            Instant::now() + self.interval
        };
        let mut ticker = time::interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Scheduled price tracking every {} for {}",
            format_interval(self.interval),
            tracker.product()
        );

        tokio::pin!(shutdown);
        let mut cycles = 0;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Scheduler stopping after {} cycles", cycles);
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = tracker.run_cycle().await;
                    cycles += 1;
                    info!(cycle = cycles, "Cycle complete: {}", outcome);
                }
            }
        }

        cycles
    }
}

fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs > 0 && secs % 3600 == 0 {
        let hours = secs / 3600;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        format!("{:?}", interval)
    }
}
