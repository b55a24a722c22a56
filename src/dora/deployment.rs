use crate::models::{Conclusion, RunRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeploymentFrequency {
    pub count: usize,
    pub per_day: f64,
}

pub fn deployment_frequency(runs: &[RunRecord], window_days: u32) -> DeploymentFrequency {
    let count = runs.len();

    #[allow(clippy::cast_precision_loss)]
    let per_day = if window_days == 0 {
        0.0
    } else {
        count as f64 / f64::from(window_days)
    };

    DeploymentFrequency { count, per_day }
}

/// Percentage of runs that concluded with `failure`, 0 for no runs.
pub fn change_failure_rate(runs: &[RunRecord]) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }

    let failures = runs
        .iter()
        .filter(|run| run.conclusion == Conclusion::Failure)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let rate = (failures as f64 / runs.len() as f64) * 100.0;
    rate
}
