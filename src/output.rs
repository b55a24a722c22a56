pub mod csv;
pub mod dashboard;

use crate::error::Result;
use crate::insights::DoraReport;

pub fn to_json(report: &DoraReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, TimeZone, Utc};

    use crate::dora::{self, TimeWindow};
    use crate::insights::DoraReport;
    use crate::models::{Conclusion, PullRequestRecord, RunRecord};

    pub fn report() -> DoraReport {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let run = |id: u64, hours_ago: i64, conclusion: Conclusion| RunRecord {
            id,
            name: "Deploy, prod".to_string(),
            created_at: now - Duration::hours(hours_ago),
            conclusion,
            status: "completed".to_string(),
            actor: "octocat".to_string(),
            branch: "main".to_string(),
        };
        let runs = vec![
            run(3, 2, Conclusion::Success),
            run(2, 26, Conclusion::Failure),
            run(1, 27, Conclusion::Success),
        ];
        let prs = vec![PullRequestRecord {
            number: 1,
            created_at: now - Duration::hours(5),
            merged_at: Some(now - Duration::hours(4)),
            base_branch: "main".to_string(),
        }];

        let window = TimeWindow::new(7).unwrap();
        let metrics = dora::compute(&runs, &prs, window, now);
        DoraReport::new("GitHub", "octo/hello".to_string(), window, now, metrics)
    }
}
