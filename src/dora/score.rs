use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: f64 = 60.0;
const MINUTES_PER_DAY: f64 = 1_440.0;
const MINUTES_PER_WEEK: f64 = 10_080.0;

/// Points awarded per DORA dimension; each is one of 10, 15, 20 or 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub deployment_frequency: u32,
    pub lead_time: u32,
    pub change_failure_rate: u32,
    pub mttr: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.deployment_frequency + self.lead_time + self.change_failure_rate + self.mttr
    }
}

pub fn composite_score(
    deployments_per_day: f64,
    lead_time_minutes: f64,
    failure_rate: f64,
    mttr_minutes: f64,
) -> ScoreBreakdown {
    ScoreBreakdown {
        deployment_frequency: deployment_frequency_points(deployments_per_day),
        lead_time: elapsed_minutes_points(lead_time_minutes),
        change_failure_rate: failure_rate_points(failure_rate),
        mttr: elapsed_minutes_points(mttr_minutes),
    }
}

fn deployment_frequency_points(per_day: f64) -> u32 {
    if per_day > 1.0 {
        25
    } else if per_day > 0.14 {
        20
    } else if per_day > 0.03 {
        15
    } else {
        10
    }
}

fn elapsed_minutes_points(minutes: f64) -> u32 {
    if minutes < MINUTES_PER_HOUR {
        25
    } else if minutes < MINUTES_PER_DAY {
        20
    } else if minutes < MINUTES_PER_WEEK {
        15
    } else {
        10
    }
}

fn failure_rate_points(rate: f64) -> u32 {
    if rate < 5.0 {
        25
    } else if rate < 15.0 {
        20
    } else if rate < 30.0 {
        15
    } else {
        10
    }
}
