//! Organization-wide contributor and repository statistics.
//!
//! Every request is issued sequentially: repository, then page, then
//! contributor, then the contributor's membership check.

use super::classifier::ContributorClassifier;
use crate::github::{GitHubApi, GitHubError, PageLimits, PageOutcome, Paginator};
use crate::models::{ContributorReport, RepoListing, RepoRow, Repository};
use tracing::{debug, info, warn};

/// Every repository of `org`, across all pages, and how the listing ended.
pub async fn list_repositories(
    api: &dyn GitHubApi,
    org: &str,
    limits: PageLimits,
) -> Result<(Vec<Repository>, PageOutcome), GitHubError> {
    let pager = Paginator::new(format!("repos of {}", org), limits, move |page| {
        api.org_repos(org, page)
    });
    pager.collect_all().await
}

/// List the repositories of `org` and aggregate their contributors.
pub async fn organization_contributors(
    api: &dyn GitHubApi,
    org: &str,
    limits: PageLimits,
) -> Result<ContributorReport, GitHubError> {
    let (repos, outcome) = list_repositories(api, org, limits).await?;
    let names: Vec<String> = repos.into_iter().map(|repo| repo.name).collect();

    let mut report = aggregate_contributors(api, org, &names, limits).await?;
    report.repo_list_capped = outcome == PageOutcome::Capped;
    Ok(report)
}

/// Classify and tally the contributors of every repository in `repos`.
///
/// A login seen more than once keeps the count from its latest sighting;
/// counts are not summed across repositories.
pub async fn aggregate_contributors(
    api: &dyn GitHubApi,
    org: &str,
    repos: &[String],
    limits: PageLimits,
) -> Result<ContributorReport, GitHubError> {
    let mut classifier = ContributorClassifier::new(api, org);
    let mut report = ContributorReport::default();

    for repo in repos {
        let label = format!("contributors of {}/{}", org, repo);
        let mut pager = Paginator::new(label, limits, move |page| {
            api.contributors(org, repo, page)
        });

        while let Some(batch) = pager.next_batch().await? {
            for contributor in batch {
                let is_internal = classifier.is_internal(&contributor).await?;
                report.record(&contributor.login, contributor.contributions, is_internal);
            }
        }

        debug!("{}/{}: {} contributor pages", org, repo, pager.requests());
        if pager.outcome() == Some(PageOutcome::Capped) {
            report.capped_repos.push(repo.clone());
        }
    }

    info!(
        "{}: {} internal and {} external contributors across {} repositories ({} logins checked)",
        org,
        report.internal.len(),
        report.external.len(),
        repos.len(),
        classifier.cached()
    );

    Ok(report)
}

/// Number of contributors listed for `org/repo`, and how the listing ended.
pub async fn count_contributors(
    api: &dyn GitHubApi,
    org: &str,
    repo: &str,
    limits: PageLimits,
) -> Result<(u64, PageOutcome), GitHubError> {
    let label = format!("contributors of {}/{}", org, repo);
    let pager = Paginator::new(label, limits, move |page| {
        api.contributors(org, repo, page)
    });
    let (contributors, outcome) = pager.collect_all().await?;

    if outcome == PageOutcome::Capped {
        warn!(
            "{}/{}: contributor count {} may be incomplete",
            org,
            repo,
            contributors.len()
        );
    }

    Ok((contributors.len() as u64, outcome))
}

/// One dashboard row per repository, with its contributor count.
pub async fn repo_rows(
    api: &dyn GitHubApi,
    org: &str,
    limits: PageLimits,
) -> Result<RepoListing, GitHubError> {
    let (repos, outcome) = list_repositories(api, org, limits).await?;
    let mut rows = Vec::with_capacity(repos.len());

    for repo in repos {
        let (contributors, counted) = count_contributors(api, org, &repo.name, limits).await?;
        rows.push(RepoRow {
            name: repo.name,
            forks: repo.forks_count,
            stars: repo.stargazers_count,
            contributors,
            contributors_capped: counted == PageOutcome::Capped,
        });
    }

    Ok(RepoListing {
        rows,
        list_capped: outcome == PageOutcome::Capped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeGitHub;

    fn repos(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn small_pages() -> PageLimits {
        PageLimits {
            per_page: 2,
            max_pages: 100,
        }
    }

    #[tokio::test]
    async fn test_splits_internal_and_external() {
        let api = FakeGitHub::new()
            .with_contributors("acme", "r1", &[("bob", 10)])
            .with_contributors("acme", "r2", &[("carol", 7)])
            .with_memberships("bob", &["acme"])
            .with_memberships("carol", &["elsewhere"]);

        let report =
            aggregate_contributors(&api, "acme", &repos(&["r1", "r2"]), PageLimits::default())
                .await
                .unwrap();

        assert_eq!(report.internal.len(), 1);
        assert_eq!(report.internal.get("bob"), Some(&10));
        assert_eq!(report.external.len(), 1);
        assert_eq!(report.external.get("carol"), Some(&7));
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_later_repository_overwrites_count() {
        let api = FakeGitHub::new()
            .with_contributors("acme", "a", &[("alice", 5)])
            .with_contributors("acme", "b", &[("alice", 3)])
            .with_memberships("alice", &["acme"]);

        let report =
            aggregate_contributors(&api, "acme", &repos(&["a", "b"]), PageLimits::default())
                .await
                .unwrap();

        assert_eq!(report.internal.get("alice"), Some(&3));
    }

    #[tokio::test]
    async fn test_membership_checked_once_across_repositories() {
        let api = FakeGitHub::new()
            .with_contributors("acme", "a", &[("alice", 5), ("bob", 1)])
            .with_contributors("acme", "b", &[("alice", 3)])
            .with_contributors("acme", "c", &[("alice", 9), ("bob", 2)]);

        aggregate_contributors(&api, "acme", &repos(&["a", "b", "c"]), PageLimits::default())
            .await
            .unwrap();

        assert_eq!(api.count_calls("memberships"), 2);
    }

    #[tokio::test]
    async fn test_no_repositories_gives_empty_maps() {
        let api = FakeGitHub::new();

        let report = aggregate_contributors(&api, "acme", &[], PageLimits::default())
            .await
            .unwrap();

        assert!(report.internal.is_empty());
        assert!(report.external.is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_requests_follow_nested_order() {
        let api = FakeGitHub::new()
            .with_contributors("acme", "r1", &[("x", 1), ("y", 1), ("z", 1)])
            .with_memberships("x", &["acme"]);

        aggregate_contributors(&api, "acme", &repos(&["r1"]), small_pages())
            .await
            .unwrap();

        let x_url = FakeGitHub::orgs_url("x");
        let y_url = FakeGitHub::orgs_url("y");
        let z_url = FakeGitHub::orgs_url("z");
        assert_eq!(
            api.calls(),
            vec![
                "contributors acme/r1 page 1".to_string(),
                format!("memberships {}", x_url),
                format!("memberships {}", y_url),
                "contributors acme/r1 page 2".to_string(),
                format!("memberships {}", z_url),
            ]
        );
    }

    #[tokio::test]
    async fn test_capped_repository_is_reported() {
        let entries: Vec<(String, u64)> = (0..10).map(|i| (format!("user{}", i), 1)).collect();
        let borrowed: Vec<(&str, u64)> = entries.iter().map(|(l, c)| (l.as_str(), *c)).collect();
        let api = FakeGitHub::new().with_contributors("acme", "big", &borrowed);
        let limits = PageLimits {
            per_page: 2,
            max_pages: 2,
        };

        let report = aggregate_contributors(&api, "acme", &repos(&["big"]), limits)
            .await
            .unwrap();

        assert_eq!(report.external.len(), 4);
        assert_eq!(report.capped_repos, vec!["big".to_string()]);
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_count_contributors_exact_multiple() {
        let api = FakeGitHub::new().with_contributors(
            "acme",
            "r1",
            &[("a", 1), ("b", 2), ("c", 3), ("d", 4)],
        );

        let (count, outcome) = count_contributors(&api, "acme", "r1", small_pages())
            .await
            .unwrap();

        assert_eq!(count, 4);
        assert_eq!(outcome, PageOutcome::Exhausted);
        assert_eq!(api.count_calls("contributors"), 3);
    }

    #[tokio::test]
    async fn test_repo_rows() {
        let api = FakeGitHub::new()
            .with_repos(
                "acme",
                vec![Repository::new("r1", 3, 10), Repository::new("r2", 0, 1)],
            )
            .with_contributors("acme", "r1", &[("bob", 10), ("carol", 2)]);

        let listing = repo_rows(&api, "acme", PageLimits::default()).await.unwrap();
        let rows = &listing.rows;

        assert!(listing.is_complete());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "r1");
        assert_eq!(rows[0].forks, Some(3));
        assert_eq!(rows[0].stars, Some(10));
        assert_eq!(rows[0].contributors, 2);
        assert_eq!(rows[1].contributors, 0);
    }

    fn two_pages_of_two() -> PageLimits {
        PageLimits {
            per_page: 2,
            max_pages: 2,
        }
    }

    fn five_repos() -> Vec<Repository> {
        ["r1", "r2", "r3", "r4", "r5"]
            .iter()
            .map(|name| Repository::new(name, 0, 0))
            .collect()
    }

    #[tokio::test]
    async fn test_capped_repository_list_marks_report_incomplete() {
        let api = FakeGitHub::new()
            .with_repos("acme", five_repos())
            .with_contributors("acme", "r1", &[("bob", 1)]);

        let report = organization_contributors(&api, "acme", two_pages_of_two())
            .await
            .unwrap();

        assert!(report.repo_list_capped);
        assert!(report.capped_repos.is_empty());
        assert!(!report.is_complete());
        assert_eq!(api.count_calls("repos acme"), 2);
        assert_eq!(api.count_calls("contributors acme/r5"), 0);
    }

    #[tokio::test]
    async fn test_organization_contributors_complete_listing() {
        let api = FakeGitHub::new()
            .with_repos("acme", vec![Repository::new("r1", 0, 0)])
            .with_contributors("acme", "r1", &[("bob", 4)]);

        let report = organization_contributors(&api, "acme", two_pages_of_two())
            .await
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(report.external.get("bob"), Some(&4));
    }

    #[tokio::test]
    async fn test_repo_rows_flag_capped_counts_and_list() {
        let api = FakeGitHub::new()
            .with_repos("acme", five_repos())
            .with_contributors(
                "acme",
                "r1",
                &[("a", 1), ("b", 1), ("c", 1), ("d", 1), ("e", 1)],
            )
            .with_contributors("acme", "r2", &[("a", 1)]);

        let listing = repo_rows(&api, "acme", two_pages_of_two()).await.unwrap();

        assert!(listing.list_capped);
        assert_eq!(listing.rows.len(), 4);
        assert_eq!(listing.rows[0].contributors, 4);
        assert!(listing.rows[0].contributors_capped);
        assert!(!listing.rows[1].contributors_capped);
        assert_eq!(listing.capped_rows(), vec!["r1"]);
    }

    #[tokio::test]
    async fn test_list_repositories_unknown_org_fails() {
        let api = FakeGitHub::new();

        let err = list_repositories(&api, "ghost", PageLimits::default())
            .await
            .unwrap_err();

        assert!(matches!(err, GitHubError::Status { status: 404, .. }));
    }
}
