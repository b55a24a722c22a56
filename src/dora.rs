//! DORA metrics engine.
//!
//! Everything here is a pure function of the run history, the pull request
//! history, the selected window and a "now" reference. Callers pass `now`
//! explicitly so repeated invocations over the same inputs agree.

mod aggregates;
mod deployment;
mod lead_time;
mod restore;
mod score;
mod window;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::debug;

use crate::insights::{DailyDeployments, KpiSnapshot, Rating, WeekdayHours};
use crate::models::{PullRequestRecord, RunRecord};

use score::composite_score;
pub use score::ScoreBreakdown;
pub use window::TimeWindow;

#[derive(Debug, Clone, PartialEq)]
pub struct DoraMetrics {
    pub kpis: KpiSnapshot,
    pub daily_deployments: Vec<DailyDeployments>,
    pub weekday_hour_heatmap: Vec<WeekdayHours>,
    pub conclusion_breakdown: IndexMap<String, usize>,
    pub filtered_runs: Vec<RunRecord>,
}

pub fn compute(
    runs: &[RunRecord],
    pull_requests: &[PullRequestRecord],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> DoraMetrics {
    let cutoff = window.cutoff(now);
    let filtered_runs = window::runs_after(runs, cutoff);

    let deployments = deployment::deployment_frequency(&filtered_runs, window.days());
    let change_failure_rate = deployment::change_failure_rate(&filtered_runs);

    let lead_times = lead_time::lead_time_samples(pull_requests, cutoff);
    // Incident boundaries may start before the window, so this scan sees
    // the whole history.
    let restore_times = restore::restore_samples(runs);

    let avg_lead_time_minutes = mean(&lead_times);
    let avg_mttr_minutes = mean(&restore_times);

    let breakdown = composite_score(
        deployments.per_day,
        avg_lead_time_minutes,
        change_failure_rate,
        avg_mttr_minutes,
    );

    debug!(
        "Computed DORA metrics: {} runs in window, {} lead time samples, {} restore samples, score {}",
        filtered_runs.len(),
        lead_times.len(),
        restore_times.len(),
        breakdown.total()
    );

    let kpis = KpiSnapshot {
        deployments: deployments.count,
        deployments_per_day: deployments.per_day,
        change_failure_rate,
        avg_lead_time_minutes,
        lead_time_samples: lead_times.len(),
        avg_mttr_minutes,
        restore_samples: restore_times.len(),
        score: breakdown.total(),
        score_breakdown: breakdown,
        rating: Rating::from_score(breakdown.total()),
    };

    DoraMetrics {
        kpis,
        daily_deployments: aggregates::daily_deployments(&filtered_runs),
        weekday_hour_heatmap: aggregates::weekday_hour_heatmap(&filtered_runs),
        conclusion_breakdown: aggregates::conclusion_breakdown(&filtered_runs),
        filtered_runs,
    }
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let avg = samples.iter().sum::<f64>() / samples.len() as f64;
    avg
}

/// Elapsed minutes between two instants, with sub-minute precision.
fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
    minutes
}


#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::fixtures::{now, pull_request, run_at, run_at_minute};
    use super::*;
    use crate::models::Conclusion;

    fn window(days: u32) -> TimeWindow {
        TimeWindow::new(days).unwrap()
    }

    #[test]
    fn test_compute_on_empty_input_is_degenerate_but_defined() {
        let metrics = compute(&[], &[], window(30), now());

        assert_eq!(metrics.kpis.deployments, 0);
        assert_eq!(metrics.kpis.deployments_per_day, 0.0);
        assert_eq!(metrics.kpis.change_failure_rate, 0.0);
        assert_eq!(metrics.kpis.avg_lead_time_minutes, 0.0);
        assert_eq!(metrics.kpis.avg_mttr_minutes, 0.0);
        // Zero lead time, failure rate and MTTR all land in the top bucket
        assert_eq!(metrics.kpis.score, 85);
        assert_eq!(metrics.kpis.rating, Rating::High);
        assert!(metrics.daily_deployments.is_empty());
        assert_eq!(metrics.weekday_hour_heatmap.len(), 7);
        assert!(metrics.filtered_runs.is_empty());
    }

    #[test]
    fn test_compute_combines_all_metrics() {
        let now = now();
        let runs = vec![
            run_at(now - Duration::hours(10), Conclusion::Failure),
            run_at(now - Duration::hours(9), Conclusion::Success),
            run_at(now - Duration::hours(5), Conclusion::Success),
            run_at(now - Duration::hours(1), Conclusion::Other("cancelled".into())),
        ];
        let prs = vec![pull_request(
            now - Duration::hours(3),
            Some(now - Duration::hours(2)),
        )];

        let metrics = compute(&runs, &prs, window(2), now);

        assert_eq!(metrics.kpis.deployments, 4);
        assert_eq!(metrics.kpis.deployments_per_day, 2.0);
        assert_eq!(metrics.kpis.change_failure_rate, 25.0);
        assert_eq!(metrics.kpis.avg_lead_time_minutes, 60.0);
        assert_eq!(metrics.kpis.avg_mttr_minutes, 60.0);
        // 25 + 20 + 15 + 20
        assert_eq!(metrics.kpis.score, 80);
        assert_eq!(metrics.kpis.rating, Rating::High);
        assert_eq!(metrics.conclusion_breakdown.get("success"), Some(&2));
    }

    #[test]
    fn test_mttr_uses_history_outside_window() {
        let now = now();
        // Incident opened 5 days ago, restored inside a 1 day window
        let runs = vec![
            run_at(now - Duration::days(5), Conclusion::Failure),
            run_at(now - Duration::hours(2), Conclusion::Success),
        ];

        let metrics = compute(&runs, &[], window(1), now);

        assert_eq!(metrics.kpis.deployments, 1);
        assert_eq!(metrics.kpis.change_failure_rate, 0.0);
        assert_eq!(metrics.kpis.restore_samples, 1);
        assert_eq!(
            metrics.kpis.avg_mttr_minutes,
            minutes_between(now - Duration::days(5), now - Duration::hours(2))
        );
    }

    #[test]
    fn test_compute_is_idempotent() {
        let runs = vec![
            run_at_minute(0, Conclusion::Failure),
            run_at_minute(7, Conclusion::Success),
            run_at_minute(60, Conclusion::Missing),
        ];
        let prs = vec![pull_request(now() - Duration::days(2), Some(now() - Duration::days(1)))];

        let first = compute(&runs, &prs, window(30), now());
        let second = compute(&runs, &prs, window(30), now());

        assert_eq!(first, second);
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }
}
