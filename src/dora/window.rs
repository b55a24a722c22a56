use chrono::{DateTime, Duration, Utc};

use crate::error::{DoraLensError, Result};
use crate::models::RunRecord;

pub const MIN_WINDOW_DAYS: u32 = 1;
pub const MAX_WINDOW_DAYS: u32 = 90;
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Retention window, in whole days back from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    days: u32,
}

impl TimeWindow {
    pub fn new(days: u32) -> Result<Self> {
        if !(MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(DoraLensError::Config(format!(
                "Time window must be between {MIN_WINDOW_DAYS} and {MAX_WINDOW_DAYS} days, got {days}"
            )));
        }

        Ok(Self { days })
    }

    pub fn days(self) -> u32 {
        self.days
    }

    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.days))
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Runs created strictly after `cutoff`, in their original order.
pub fn runs_after(runs: &[RunRecord], cutoff: DateTime<Utc>) -> Vec<RunRecord> {
    runs.iter()
        .filter(|run| run.created_at > cutoff)
        .cloned()
        .collect()
}
