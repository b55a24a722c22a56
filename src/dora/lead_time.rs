use chrono::{DateTime, Utc};

use super::minutes_between;
use crate::models::PullRequestRecord;

/// Creation-to-merge minutes for every pull request merged after `cutoff`.
///
/// This is merge time, not time to production: the history carries no
/// link between a merge and the deployment that shipped it.
pub fn lead_time_samples(pull_requests: &[PullRequestRecord], cutoff: DateTime<Utc>) -> Vec<f64> {
    pull_requests
        .iter()
        .filter_map(|pr| {
            let merged_at = pr.merged_at.filter(|merged_at| *merged_at > cutoff)?;
            Some(minutes_between(pr.created_at, merged_at))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::dora::fixtures::{now, pull_request};

    #[test]
    fn test_unmerged_pull_requests_are_skipped() {
        let cutoff = now() - Duration::days(30);
        let prs = vec![pull_request(now() - Duration::days(2), None)];

        assert!(lead_time_samples(&prs, cutoff).is_empty());
    }

    #[test]
    fn test_merge_before_cutoff_is_skipped_even_if_created_inside() {
        let cutoff = now() - Duration::days(7);
        let prs = vec![
            // Merged at the cutoff exactly: not strictly after
            pull_request(cutoff - Duration::hours(1), Some(cutoff)),
            pull_request(cutoff - Duration::days(3), Some(cutoff - Duration::days(1))),
        ];

        assert!(lead_time_samples(&prs, cutoff).is_empty());
    }

    #[test]
    fn test_creation_before_cutoff_still_counts_when_merged_inside() {
        let cutoff = now() - Duration::days(7);
        let created = cutoff - Duration::days(1);
        let merged = cutoff + Duration::hours(2);
        let prs = vec![pull_request(created, Some(merged))];

        assert_eq!(lead_time_samples(&prs, cutoff), vec![26.0 * 60.0]);
    }

    #[test]
    fn test_samples_keep_fractional_minutes() {
        let cutoff = now() - Duration::days(1);
        let created = now() - Duration::minutes(10);
        let merged = created + Duration::seconds(90);
        let prs = vec![pull_request(created, Some(merged))];

        assert_eq!(lead_time_samples(&prs, cutoff), vec![1.5]);
    }
}
