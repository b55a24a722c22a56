use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Deserialize;

use super::core::{GitHubClient, PAGE_SIZE};
use crate::error::{DoraLensError, Result};
use crate::models::PullRequestRecord;

#[derive(Debug, Deserialize)]
pub struct PullRequestDto {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    pub base: BaseRefDto,
}

#[derive(Debug, Deserialize)]
pub struct BaseRefDto {
    #[serde(rename = "ref")]
    pub ref_: String,
}

impl From<PullRequestDto> for PullRequestRecord {
    fn from(dto: PullRequestDto) -> Self {
        Self {
            number: dto.number,
            created_at: dto.created_at,
            merged_at: dto.merged_at,
            base_branch: dto.base.ref_,
        }
    }
}

impl GitHubClient {
    /// Fetch the most recent page of closed pull requests targeting `base`.
    pub async fn fetch_closed_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
    ) -> Result<Vec<PullRequestRecord>> {
        let url = self
            .repo_url(owner, repo)?
            .join("pulls")
            .map_err(|e| DoraLensError::Config(format!("Invalid pulls URL: {e}")))?;

        let per_page = PAGE_SIZE.to_string();
        let request = self.client.get(url).query(&[
            ("state", "closed"),
            ("base", base),
            ("per_page", per_page.as_str()),
        ]);
        let response = self.auth_request(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Pull requests request for {owner}/{repo} returned {status}");
            return Ok(Vec::new());
        }

        let pull_requests = response.json::<Vec<PullRequestDto>>().await?;
        info!(
            "Fetched {} closed pull requests into {base}",
            pull_requests.len()
        );

        Ok(pull_requests
            .into_iter()
            .map(PullRequestRecord::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    #[tokio::test]
    async fn test_fetch_closed_pull_requests_maps_records() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/hello/pulls")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".into(), "closed".into()),
                Matcher::UrlEncoded("base".into(), "main".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {
                        "number": 7,
                        "created_at": "2024-01-01T10:00:00Z",
                        "merged_at": "2024-01-01T11:30:00Z",
                        "base": { "ref": "main" }
                    },
                    {
                        "number": 8,
                        "created_at": "2024-01-02T10:00:00Z",
                        "merged_at": null,
                        "base": { "ref": "main" }
                    }
                ]"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let prs = client
            .fetch_closed_pull_requests("octo", "hello", "main")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(prs.len(), 2);
        assert_eq!(prs[0].number, 7);
        assert!(prs[0].merged_at.is_some());
        assert_eq!(prs[1].merged_at, None);
        assert_eq!(prs[1].base_branch, "main");
    }

    #[tokio::test]
    async fn test_non_success_status_yields_empty_pull_requests() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octo/hello/pulls")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let prs = client
            .fetch_closed_pull_requests("octo", "hello", "main")
            .await
            .unwrap();

        assert!(prs.is_empty());
    }
}
