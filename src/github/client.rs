//! `reqwest`-backed implementation of [`GitHubApi`].

use super::{GitHubApi, GitHubError, PageRequest};
use crate::config::{Credentials, GitHubConfig};
use crate::models::{Contributor, OrgMembership, Repository};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Authenticated GitHub REST client.
pub struct GitHubClient {
    http_client: reqwest::Client,
    api_url: String,
    credentials: Credentials,
}

impl GitHubClient {
    /// Build a client for the configured API base URL.
    pub fn new(config: &GitHubConfig, credentials: Credentials) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|source| GitHubError::Transport {
                url: config.api_url.clone(),
                source,
            })?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Absolute URL for an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// GET a URL and return the body of a successful response.
    async fn get_text(&self, url: &str) -> Result<String, GitHubError> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.token))
            .send()
            .await
            .map_err(|source| GitHubError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| GitHubError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(GitHubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    /// GET a collection endpoint.
    ///
    /// GitHub answers `204 No Content` for the contributors of an empty
    /// repository; an empty body decodes as an empty batch.
    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, GitHubError> {
        let body = self.get_text(url).await?;
        if body.trim().is_empty() {
            debug!("{}: empty body, treating as an empty page", url);
            return Ok(Vec::new());
        }
        serde_json::from_str(&body).map_err(|source| GitHubError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn organization(&self, org: &str) -> Result<String, GitHubError> {
        self.get_text(&self.endpoint(&format!("orgs/{}", org))).await
    }

    async fn org_repos(
        &self,
        org: &str,
        page: PageRequest,
    ) -> Result<Vec<Repository>, GitHubError> {
        let url = self.endpoint(&format!("orgs/{}/repos?{}", org, page.query()));
        self.get_list(&url).await
    }

    async fn contributors(
        &self,
        org: &str,
        repo: &str,
        page: PageRequest,
    ) -> Result<Vec<Contributor>, GitHubError> {
        let url = self.endpoint(&format!(
            "repos/{}/{}/contributors?{}",
            org,
            repo,
            page.query()
        ));
        self.get_list(&url).await
    }

    async fn memberships(
        &self,
        organizations_url: &str,
    ) -> Result<Vec<OrgMembership>, GitHubError> {
        self.get_list(organizations_url).await
    }
}
