use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use indexmap::IndexMap;

use crate::insights::{DailyDeployments, WeekdayHours};
use crate::models::RunRecord;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn daily_deployments(runs: &[RunRecord]) -> Vec<DailyDeployments> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for run in runs {
        *per_day.entry(run.created_at.date_naive()).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .map(|(date, deployments)| DailyDeployments { date, deployments })
        .collect()
}

/// Seven rows, Monday first, with every hour present even when empty.
pub fn weekday_hour_heatmap(runs: &[RunRecord]) -> Vec<WeekdayHours> {
    let mut grid = [[0usize; 24]; 7];

    for run in runs {
        let day = run.created_at.weekday().num_days_from_monday() as usize;
        let hour = run.created_at.hour() as usize;
        grid[day][hour] += 1;
    }

    WEEKDAYS
        .iter()
        .zip(grid)
        .map(|(&weekday, hours)| WeekdayHours { weekday, hours })
        .collect()
}

/// Run count per conclusion label, most frequent first.
pub fn conclusion_breakdown(runs: &[RunRecord]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for run in runs {
        *counts.entry(run.conclusion.label().to_string()).or_insert(0) += 1;
    }

    counts.sort_by(|label_a, count_a, label_b, count_b| {
        count_b.cmp(count_a).then_with(|| label_a.cmp(label_b))
    });
    counts
}
