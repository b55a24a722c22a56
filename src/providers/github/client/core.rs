use reqwest::Client;
use url::Url;

use crate::auth::Token;
use crate::error::{DoraLensError, Result};

pub const PAGE_SIZE: u32 = 100;

pub struct GitHubClient {
    pub client: Client,
    pub api_url: Url,
    pub token: Option<Token>,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("DoraLens/0.1.0")
            .build()
            .map_err(|e| DoraLensError::Config(format!("Failed to create HTTP client: {e}")))?;

        let mut api_url = Url::parse(base_url)
            .map_err(|e| DoraLensError::Config(format!("Invalid base URL: {e}")))?;

        // Url::join drops the last path segment unless it ends with a slash
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    pub fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) if !token.is_empty() => request.bearer_auth(token.as_str()),
            _ => request,
        }
    }

    pub fn repo_url(&self, owner: &str, repo: &str) -> Result<Url> {
        self.api_url
            .join(&format!("repos/{owner}/{repo}/"))
            .map_err(|e| DoraLensError::Config(format!("Invalid repository URL: {e}")))
    }
}
