//! Internal/external classification of contributors.

use crate::github::{GitHubApi, GitHubError};
use crate::models::Contributor;
use std::collections::HashMap;
use tracing::debug;

/// Decides whether contributors belong to one organization.
///
/// Answers are cached by login for the lifetime of the classifier, so each
/// login costs at most one membership request.
pub struct ContributorClassifier<'a> {
    api: &'a dyn GitHubApi,
    org: &'a str,
    cache: HashMap<String, bool>,
}

impl<'a> ContributorClassifier<'a> {
    pub fn new(api: &'a dyn GitHubApi, org: &'a str) -> Self {
        Self {
            api,
            org,
            cache: HashMap::new(),
        }
    }

    /// Whether `contributor` is a member of the target organization.
    ///
    /// Organization logins are compared exactly (case-sensitive).
    pub async fn is_internal(&mut self, contributor: &Contributor) -> Result<bool, GitHubError> {
        if let Some(&cached) = self.cache.get(&contributor.login) {
            return Ok(cached);
        }

        let memberships = self.api.memberships(&contributor.organizations_url).await?;
        let is_internal = memberships.iter().any(|m| m.login == self.org);

        debug!(
            "Checking is_internal for {}, got: {}",
            contributor.login, is_internal
        );
        self.cache.insert(contributor.login.clone(), is_internal);

        Ok(is_internal)
    }

    /// Number of logins classified so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
