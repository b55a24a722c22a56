use chrono::{DateTime, NaiveDate, Utc, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dora::{DoraMetrics, ScoreBreakdown, TimeWindow};
use crate::models::RunRecord;

#[derive(Debug, Serialize, Deserialize)]
pub struct DoraReport {
    pub provider: String,
    pub repository: String,
    pub collected_at: DateTime<Utc>,
    pub window_days: u32,
    pub kpis: KpiSnapshot,
    pub daily_deployments: Vec<DailyDeployments>,
    pub weekday_hour_heatmap: Vec<WeekdayHours>,
    pub conclusion_breakdown: IndexMap<String, usize>,
    pub runs: Vec<RunRecord>,
}

impl DoraReport {
    pub fn new(
        provider: &str,
        repository: String,
        window: TimeWindow,
        collected_at: DateTime<Utc>,
        metrics: DoraMetrics,
    ) -> Self {
        Self {
            provider: provider.to_string(),
            repository,
            collected_at,
            window_days: window.days(),
            kpis: metrics.kpis,
            daily_deployments: metrics.daily_deployments,
            weekday_hour_heatmap: metrics.weekday_hour_heatmap,
            conclusion_breakdown: metrics.conclusion_breakdown,
            runs: metrics.filtered_runs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub deployments: usize,
    pub deployments_per_day: f64,
    pub change_failure_rate: f64,
    pub avg_lead_time_minutes: f64,
    pub lead_time_samples: usize,
    pub avg_mttr_minutes: f64,
    pub restore_samples: usize,
    pub score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Elite,
    High,
    Medium,
    Low,
}

impl Rating {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Elite,
            75..=89 => Self::High,
            60..=74 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDeployments {
    pub date: NaiveDate,
    pub deployments: usize,
}

/// One row of the weekday × hour heat map; `hours[h]` counts runs started
/// during hour `h` (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayHours {
    pub weekday: Weekday,
    pub hours: [usize; 24],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_boundaries() {
        assert_eq!(Rating::from_score(100), Rating::Elite);
        assert_eq!(Rating::from_score(90), Rating::Elite);
        assert_eq!(Rating::from_score(89), Rating::High);
        assert_eq!(Rating::from_score(75), Rating::High);
        assert_eq!(Rating::from_score(74), Rating::Medium);
        assert_eq!(Rating::from_score(60), Rating::Medium);
        assert_eq!(Rating::from_score(59), Rating::Low);
        assert_eq!(Rating::from_score(40), Rating::Low);
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::Elite.to_string(), "Elite");
        assert_eq!(Rating::Low.to_string(), "Low");
    }
}
