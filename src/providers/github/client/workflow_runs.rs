use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Deserialize;

use super::core::{GitHubClient, PAGE_SIZE};
use crate::error::{DoraLensError, Result};
use crate::models::{Conclusion, RunRecord};

#[derive(Debug, Deserialize)]
struct WorkflowRunsPage {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRunDto>,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRunDto {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub actor: Option<ActorDto>,
    #[serde(default)]
    pub head_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActorDto {
    pub login: String,
}

impl From<WorkflowRunDto> for RunRecord {
    fn from(dto: WorkflowRunDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_default(),
            created_at: dto.created_at,
            conclusion: Conclusion::from(dto.conclusion),
            status: dto.status.unwrap_or_default(),
            actor: dto.actor.map(|actor| actor.login).unwrap_or_default(),
            branch: dto.head_branch.unwrap_or_default(),
        }
    }
}

impl GitHubClient {
    /// Fetch the most recent page of workflow runs.
    ///
    /// A non-success status yields an empty list; only transport and
    /// decoding failures are errors.
    pub async fn fetch_workflow_runs(&self, owner: &str, repo: &str) -> Result<Vec<RunRecord>> {
        let url = self
            .repo_url(owner, repo)?
            .join("actions/runs")
            .map_err(|e| DoraLensError::Config(format!("Invalid workflow runs URL: {e}")))?;

        let request = self
            .client
            .get(url)
            .query(&[("per_page", PAGE_SIZE), ("page", 1)]);
        let response = self.auth_request(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Workflow runs request for {owner}/{repo} returned {status}");
            return Ok(Vec::new());
        }

        let page = response.json::<WorkflowRunsPage>().await?;
        info!("Fetched {} workflow runs", page.workflow_runs.len());

        Ok(page.workflow_runs.into_iter().map(RunRecord::from).collect())
    }
}
