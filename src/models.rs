//! Data models for the dashboard.
//!
//! This module contains the records decoded from the GitHub REST API and
//! the aggregated structures rendered by the report layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A contributor entry from `/repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Account login.
    pub login: String,
    /// Number of commits credited to this account.
    pub contributions: u64,
    /// Endpoint listing the account's public organization memberships.
    pub organizations_url: String,
}

/// One entry of a user's organization list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMembership {
    /// Organization login.
    pub login: String,
}

/// A repository entry from `/orgs/{org}/repos`.
///
/// Only the fields the dashboard reads are typed; everything else the API
/// returned is kept in `extra` so the JSON listing can pass it through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Repository {
    /// Creates a repository record with no extra fields.
    #[cfg(test)]
    pub fn new(name: &str, forks: u64, stars: u64) -> Self {
        Self {
            name: name.to_string(),
            forks_count: Some(forks),
            stargazers_count: Some(stars),
            extra: serde_json::Map::new(),
        }
    }
}

/// One row of the repository dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRow {
    pub name: String,
    pub forks: Option<u64>,
    pub stars: Option<u64>,
    pub contributors: u64,
    /// The contributor listing hit the page cap, so `contributors` is a floor.
    pub contributors_capped: bool,
}

/// Repository rows of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoListing {
    pub rows: Vec<RepoRow>,
    /// The repository list itself hit the page cap.
    pub list_capped: bool,
}

impl RepoListing {
    /// Names of repositories whose contributor count may be too low.
    pub fn capped_rows(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.contributors_capped)
            .map(|row| row.name.as_str())
            .collect()
    }

    /// Whether every listing behind the table ended on a short page.
    pub fn is_complete(&self) -> bool {
        !self.list_capped && self.rows.iter().all(|row| !row.contributors_capped)
    }
}

/// Column of the repository dashboard used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Forks,
    Stars,
    Contributors,
}

impl SortColumn {
    /// All columns in display order.
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Name,
        SortColumn::Forks,
        SortColumn::Stars,
        SortColumn::Contributors,
    ];
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortColumn::Name => write!(f, "Name"),
            SortColumn::Forks => write!(f, "Forks"),
            SortColumn::Stars => write!(f, "Stars"),
            SortColumn::Contributors => write!(f, "Contributors"),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortColumn::Name),
            "forks" => Ok(SortColumn::Forks),
            "stars" => Ok(SortColumn::Stars),
            "contributors" => Ok(SortColumn::Contributors),
            other => Err(format!(
                "unknown sort column '{}', expected one of Name, Forks, Stars, Contributors",
                other
            )),
        }
    }
}

/// Login to contribution count.
pub type FrequencyMap = HashMap<String, u64>;

/// Result of aggregating contributors across an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributorReport {
    /// Contributors who are members of the organization.
    pub internal: FrequencyMap,
    /// Contributors who are not.
    pub external: FrequencyMap,
    /// Repositories whose contributor listing hit the page cap.
    pub capped_repos: Vec<String>,
    /// The organization's repository list hit the page cap, so some
    /// repositories were never visited.
    pub repo_list_capped: bool,
}

impl ContributorReport {
    /// Whether every listing ended on a confirmed short page.
    pub fn is_complete(&self) -> bool {
        self.capped_repos.is_empty() && !self.repo_list_capped
    }

    /// Records a contributor's count, replacing any earlier value.
    ///
    /// The count is not summed with what an earlier repository reported;
    /// the map keeps only the most recently observed value.
    pub fn record(&mut self, login: &str, contributions: u64, is_internal: bool) {
        let (target, other) = if is_internal {
            (&mut self.internal, &mut self.external)
        } else {
            (&mut self.external, &mut self.internal)
        };
        other.remove(login);
        target.insert(login.to_string(), contributions);
    }
}
