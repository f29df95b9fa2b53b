//! Page-number pagination over GitHub collection endpoints.
//!
//! GitHub list endpoints take `page` and `per_page` query parameters. A page
//! shorter than `per_page` is the last one. The pager also stops after a
//! fixed number of pages and reports that the end was never confirmed.

use super::GitHubError;
use std::future::Future;
use tracing::{debug, warn};

/// Query parameters for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Query string fragment, e.g. `per_page=100&page=2`.
    pub fn query(&self) -> String {
        format!("per_page={}&page={}", self.per_page, self.page)
    }
}

/// Page size and page cap applied to every collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub per_page: u32,
    pub max_pages: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_pages: 100,
        }
    }
}

/// How a drained pager ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// A short page confirmed the end of the collection.
    Exhausted,
    /// The page cap was reached before a short page was seen.
    Capped,
}

/// Lazily fetches successive pages through `fetch`.
///
/// Each call to [`Paginator::next_batch`] issues at most one request. Once
/// the pager has finished it only returns `None`; it cannot be restarted.
pub struct Paginator<F> {
    label: String,
    fetch: F,
    next_page: u32,
    per_page: u32,
    max_pages: u32,
    requests: u32,
    collected: usize,
    outcome: Option<PageOutcome>,
}

impl<F> Paginator<F> {
    /// Create a pager. `label` names the collection in log output.
    pub fn new(label: impl Into<String>, limits: PageLimits, fetch: F) -> Self {
        Self {
            label: label.into(),
            fetch,
            next_page: 1,
            per_page: limits.per_page.max(1),
            max_pages: limits.max_pages.max(1),
            requests: 0,
            collected: 0,
            outcome: None,
        }
    }

    /// Terminal state, or `None` while more pages may follow.
    pub fn outcome(&self) -> Option<PageOutcome> {
        self.outcome
    }

    /// Number of requests issued so far.
    pub fn requests(&self) -> u32 {
        self.requests
    }
}

impl<F, Fut, T> Paginator<F>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>, GitHubError>>,
{
    /// Fetch the next page, or `Ok(None)` once the pager has finished.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<T>>, GitHubError> {
        if self.outcome.is_some() {
            return Ok(None);
        }

        let request = PageRequest {
            page: self.next_page,
            per_page: self.per_page,
        };
        self.requests += 1;
        let batch = (self.fetch)(request).await?;
        self.collected += batch.len();

        debug!(
            "{}: page {} returned {} records",
            self.label,
            request.page,
            batch.len()
        );

        if batch.len() < self.per_page as usize {
            self.outcome = Some(PageOutcome::Exhausted);
        } else if self.next_page >= self.max_pages {
            warn!(
                "{}: stopped after {} pages without reaching the end, count: {}",
                self.label, self.max_pages, self.collected
            );
            self.outcome = Some(PageOutcome::Capped);
        } else {
            self.next_page += 1;
        }

        Ok(Some(batch))
    }

    /// Drain every remaining page into one vector.
    pub async fn collect_all(mut self) -> Result<(Vec<T>, PageOutcome), GitHubError> {
        let mut items = Vec::new();
        while let Some(batch) = self.next_batch().await? {
            items.extend(batch);
        }
        let outcome = self.outcome.unwrap_or(PageOutcome::Exhausted);
        Ok((items, outcome))
    }
}
