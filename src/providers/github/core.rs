use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};

use super::cache::TtlCache;
use super::client::GitHubClient;
use crate::auth::Token;
use crate::error::Result;
use crate::models::History;
use crate::providers::Provider;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub struct GitHubProvider {
    client: GitHubClient,
    owner: String,
    repo: String,
    base_branch: String,
    cache: TtlCache<History>,
}

impl GitHubProvider {
    pub fn new(
        base_url: &str,
        owner: String,
        repo: String,
        base_branch: String,
        token: Option<Token>,
    ) -> Result<Self> {
        let client = GitHubClient::new(base_url, token)?;

        Ok(Self {
            client,
            owner,
            repo,
            base_branch,
            cache: TtlCache::default(),
        })
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    async fn fetch_history(&mut self, now: DateTime<Utc>) -> Result<History> {
        if let Some(history) = self.cache.get(now) {
            debug!("Serving cached history for {}", self.repository());
            return Ok(history.clone());
        }

        info!("Fetching history for {}", self.repository());
        let (runs, pull_requests) = futures::try_join!(
            self.client.fetch_workflow_runs(&self.owner, &self.repo),
            self.client
                .fetch_closed_pull_requests(&self.owner, &self.repo, &self.base_branch),
        )?;

        let history = History {
            runs,
            pull_requests,
        };
        Ok(self.cache.insert(history, now).clone())
    }
}
