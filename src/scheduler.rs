//! Fixed-rate driver for [`FrameLoop`] (requires the `std` feature).
//!
//! Cycles never overlap: each runs to completion, then the scheduler sleeps
//! for whatever is left of the frame interval. A pose-estimator failure is
//! logged and the next tick retries; after more than
//! `max_consecutive_failures` failures in a row the error is returned.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::ConfigError;
use crate::estimator::{GestureEstimator, PoseEstimator};
use crate::frame::{CycleReport, FrameLoop};

/// Periodic scheduler for a [`FrameLoop`].
#[derive(Clone, Debug)]
pub struct Scheduler {
    interval: Duration,
    max_consecutive_failures: u32,
}

impl Scheduler {
    /// Scheduler using the loop's configured frame rate and failure budget.
    pub fn for_loop<P, G>(frame: &FrameLoop<P, G>) -> Result<Self, ConfigError>
    where
        P: PoseEstimator,
        G: GestureEstimator,
    {
        let config = frame.config();
        Ok(Self {
            interval: config.video.frame_interval()?,
            max_consecutive_failures: config.max_consecutive_failures,
        })
    }

    /// Scheduler with an explicit interval.
    pub fn with_interval(interval: Duration, max_consecutive_failures: u32) -> Self {
        Self {
            interval,
            max_consecutive_failures,
        }
    }

    /// Target time between cycle starts.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drive `frame` until `keep_running` returns `false`.
    ///
    /// `keep_running` sees every successful cycle's report together with the
    /// loop (for its display slots and debug panel). Returns the number of
    /// successful cycles.
    pub fn run<P, G, F>(&self, frame: &mut FrameLoop<P, G>, mut keep_running: F) -> Result<u64, P::Error>
    where
        P: PoseEstimator,
        P::Error: core::fmt::Display,
        G: GestureEstimator,
        F: FnMut(&CycleReport, &FrameLoop<P, G>) -> bool,
    {
        info!(interval_ms = self.interval.as_secs_f64() * 1000.0, "frame loop started");
        let mut completed = 0u64;
        let mut failures = 0u32;

        loop {
            let started = Instant::now();
            match frame.run_cycle() {
                Ok(report) => {
                    failures = 0;
                    completed += 1;
                    if !keep_running(&report, frame) {
                        info!(cycles = completed, "frame loop stopped");
                        return Ok(completed);
                    }
                }
                Err(err) => {
                    let give_up = self.record_failure(&mut failures);
                    warn!(%err, failures, "pose estimator failed");
                    if give_up {
                        return Err(err);
                    }
                }
            }
            if let Some(rest) = self.interval.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    /// Count one more failure in a row. Returns `true` once the budget is spent.
    fn record_failure(&self, failures: &mut u32) -> bool {
        *failures = failures.saturating_add(1);
        *failures > self.max_consecutive_failures
    }
}
