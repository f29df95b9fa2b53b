//! GitHub REST API access.
//!
//! The dashboard talks to GitHub only through the [`GitHubApi`] trait, so
//! handlers and the aggregation code can be exercised against a test double.

pub mod client;
#[cfg(test)]
pub mod fake;
pub mod pager;

pub use client::GitHubClient;
pub use pager::{PageLimits, PageOutcome, PageRequest, Paginator};

use crate::models::{Contributor, OrgMembership, Repository};
use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to the GitHub API. Never retried.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// GitHub answered with a non-success status.
    #[error("GitHub API error {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only view of the GitHub endpoints the dashboard needs.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Raw body of `GET /orgs/{org}`.
    async fn organization(&self, org: &str) -> Result<String, GitHubError>;

    /// One page of `GET /orgs/{org}/repos`.
    async fn org_repos(&self, org: &str, page: PageRequest)
        -> Result<Vec<Repository>, GitHubError>;

    /// One page of `GET /repos/{org}/{repo}/contributors`.
    async fn contributors(
        &self,
        org: &str,
        repo: &str,
        page: PageRequest,
    ) -> Result<Vec<Contributor>, GitHubError>;

    /// Organizations listed at a contributor's `organizations_url`.
    async fn memberships(&self, organizations_url: &str)
        -> Result<Vec<OrgMembership>, GitHubError>;
}
