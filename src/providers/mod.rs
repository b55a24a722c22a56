pub mod github;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::dora::{self, TimeWindow};
use crate::error::{DoraLensError, Result};
use crate::insights::DoraReport;
use crate::models::History;

#[async_trait]
pub trait Provider: Send {
    fn name(&self) -> &'static str;

    fn repository(&self) -> String;

    /// Raw run and pull request history, possibly served from a cache.
    async fn fetch_history(&mut self, now: DateTime<Utc>) -> Result<History>;

    async fn collect_report(&mut self, window: TimeWindow, now: DateTime<Utc>) -> Result<DoraReport> {
        info!(
            "Collecting DORA metrics for {} over the last {} days",
            self.repository(),
            window.days()
        );

        let history = self.fetch_history(now).await?;

        if history.runs.is_empty() {
            warn!("No workflow runs found for {}", self.repository());
            return Err(DoraLensError::NoData);
        }

        let metrics = dora::compute(&history.runs, &history.pull_requests, window, now);

        Ok(DoraReport::new(
            self.name(),
            self.repository(),
            window,
            now,
            metrics,
        ))
    }
}
