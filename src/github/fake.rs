//! In-memory [`GitHubApi`] used by tests. Records every call it serves.

use super::{GitHubApi, GitHubError, PageRequest};
use crate::models::{Contributor, OrgMembership, Repository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeGitHub {
    orgs: HashMap<String, String>,
    repos: HashMap<String, Vec<Repository>>,
    contributors: HashMap<(String, String), Vec<Contributor>>,
    memberships: HashMap<String, Vec<OrgMembership>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(mut self, org: &str, body: &str) -> Self {
        self.orgs.insert(org.to_string(), body.to_string());
        self
    }

    pub fn with_repos(mut self, org: &str, repos: Vec<Repository>) -> Self {
        self.repos.insert(org.to_string(), repos);
        self
    }

    /// Register contributors for `org/repo` as `(login, contributions)` pairs.
    pub fn with_contributors(mut self, org: &str, repo: &str, entries: &[(&str, u64)]) -> Self {
        let list = entries
            .iter()
            .map(|(login, contributions)| Contributor {
                login: login.to_string(),
                contributions: *contributions,
                organizations_url: Self::orgs_url(login),
            })
            .collect();
        self.contributors
            .insert((org.to_string(), repo.to_string()), list);
        self
    }

    /// Register the organizations a user belongs to.
    pub fn with_memberships(mut self, login: &str, orgs: &[&str]) -> Self {
        let list = orgs
            .iter()
            .map(|o| OrgMembership {
                login: o.to_string(),
            })
            .collect();
        self.memberships.insert(Self::orgs_url(login), list);
        self
    }

    pub fn orgs_url(login: &str) -> String {
        format!("https://api.github.test/users/{}/orgs", login)
    }

    /// Every call served so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose description starts with `prefix`.
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
        let start = (page.page as usize - 1) * page.per_page as usize;
        items
            .iter()
            .skip(start)
            .take(page.per_page as usize)
            .cloned()
            .collect()
    }

    fn not_found(url: String) -> GitHubError {
        GitHubError::Status {
            url,
            status: 404,
            body: r#"{"message":"Not Found"}"#.to_string(),
        }
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn organization(&self, org: &str) -> Result<String, GitHubError> {
        self.log(format!("org {}", org));
        self.orgs
            .get(org)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("orgs/{}", org)))
    }

    async fn org_repos(
        &self,
        org: &str,
        page: PageRequest,
    ) -> Result<Vec<Repository>, GitHubError> {
        self.log(format!("repos {} page {}", org, page.page));
        let repos = self
            .repos
            .get(org)
            .ok_or_else(|| Self::not_found(format!("orgs/{}/repos", org)))?;
        Ok(Self::page_of(repos, page))
    }

    async fn contributors(
        &self,
        org: &str,
        repo: &str,
        page: PageRequest,
    ) -> Result<Vec<Contributor>, GitHubError> {
        self.log(format!("contributors {}/{} page {}", org, repo, page.page));
        let list = self
            .contributors
            .get(&(org.to_string(), repo.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Ok(Self::page_of(list, page))
    }

    async fn memberships(
        &self,
        organizations_url: &str,
    ) -> Result<Vec<OrgMembership>, GitHubError> {
        self.log(format!("memberships {}", organizations_url));
        Ok(self
            .memberships
            .get(organizations_url)
            .cloned()
            .unwrap_or_default())
    }
}
