use chrono::{DateTime, Utc};

use super::minutes_between;
use crate::models::{Conclusion, RunRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IncidentState {
    Stable,
    Incident { started_at: DateTime<Utc> },
}

/// Minutes from the first failing run of each incident to the next
/// successful run, scanning the history in creation order.
///
/// Repeated failures do not restart the clock. An incident still open at
/// the end of the history contributes nothing.
pub fn restore_samples(runs: &[RunRecord]) -> Vec<f64> {
    let mut ordered: Vec<&RunRecord> = runs.iter().collect();
    ordered.sort_by_key(|run| run.created_at);

    let (_, samples) = ordered.into_iter().fold(
        (IncidentState::Stable, Vec::new()),
        |(state, mut samples), run| {
            let next = match (state, &run.conclusion) {
                (IncidentState::Stable, Conclusion::Failure) => IncidentState::Incident {
                    started_at: run.created_at,
                },
                (IncidentState::Incident { started_at }, Conclusion::Success) => {
                    samples.push(minutes_between(started_at, run.created_at));
                    IncidentState::Stable
                }
                (state, _) => state,
            };
            (next, samples)
        },
    );

    samples
}
