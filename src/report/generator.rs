//! HTML dashboard generation.
//!
//! Aggregated statistics are turned into [`Table`]s and rendered through a
//! single embedded `tera` template.

use crate::models::{ContributorReport, FrequencyMap, RepoListing, RepoRow, SortColumn};
use chrono::Utc;
use serde::Serialize;
use std::cmp::Ordering;
use tera::{Context, Tera};

const HOME_TEMPLATE: &str = "home.html";

/// Login shown when a contributor table would otherwise be empty.
pub const PLACEHOLDER_LOGIN: &str = "na";

const REPO_LIST_NOTICE: &str =
    "The repository list was truncated at the page limit. Some repositories are missing.";

/// A titled HTML table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub class: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything the page template needs.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub tables: Vec<Table>,
    /// Warnings shown above the tables.
    pub notices: Vec<String>,
}

/// Build a `Login` / `Total Contributions` table.
///
/// Rows are ordered by contributions, highest first, then by login
/// descending. An empty map yields a single placeholder row.
pub fn frequency_table(title: &str, class: &str, counts: &FrequencyMap) -> Table {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| b.0.cmp(a.0)));

    let mut rows: Vec<Vec<String>> = entries
        .into_iter()
        .map(|(login, count)| vec![login.clone(), count.to_string()])
        .collect();

    if rows.is_empty() {
        rows.push(vec![PLACEHOLDER_LOGIN.to_string(), "0".to_string()]);
    }

    Table {
        title: title.to_string(),
        class: class.to_string(),
        columns: vec!["Login".to_string(), "Total Contributions".to_string()],
        rows,
    }
}

/// Sort repository rows descending by `by`, then by name descending.
///
/// Rows without a fork or star count sort after every row that has one.
pub fn sort_repo_rows(rows: &mut [RepoRow], by: SortColumn) {
    rows.sort_by(|a, b| compare_rows(b, a, by).then_with(|| b.name.cmp(&a.name)));
}

fn compare_rows(a: &RepoRow, b: &RepoRow, by: SortColumn) -> Ordering {
    match by {
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Forks => a.forks.cmp(&b.forks),
        SortColumn::Stars => a.stars.cmp(&b.stars),
        SortColumn::Contributors => a.contributors.cmp(&b.contributors),
    }
}

/// Build the repository dashboard table.
pub fn repo_table(rows: &[RepoRow]) -> Table {
    let optional = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_default();

    Table {
        title: String::new(),
        class: "data".to_string(),
        columns: SortColumn::ALL.iter().map(|c| c.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    optional(row.forks),
                    optional(row.stars),
                    row.contributors.to_string(),
                ]
            })
            .collect(),
    }
}

/// Page with the internal and external contributor tables of `org`.
pub fn contributor_page(org: &str, report: &ContributorReport) -> Page {
    let mut notices = Vec::new();
    if report.repo_list_capped {
        notices.push(REPO_LIST_NOTICE.to_string());
    }
    if !report.capped_repos.is_empty() {
        notices.push(format!(
            "Contributor lists were truncated for: {}. Counts may be incomplete.",
            report.capped_repos.join(", ")
        ));
    }

    Page {
        title: format!("Top Contributors for {}", org),
        tables: vec![
            frequency_table("Top Internal", "in_data", &report.internal),
            frequency_table("Top External", "ex_data", &report.external),
        ],
        notices,
    }
}

/// Page with the repository table of `org`, sorted by `by`.
pub fn repo_page(org: &str, listing: RepoListing, by: SortColumn) -> Page {
    let mut notices = Vec::new();
    if !listing.is_complete() {
        if listing.list_capped {
            notices.push(REPO_LIST_NOTICE.to_string());
        }
        let capped = listing.capped_rows();
        if !capped.is_empty() {
            notices.push(format!(
                "Contributor counts are lower bounds for: {}.",
                capped.join(", ")
            ));
        }
    }

    let mut rows = listing.rows;
    sort_repo_rows(&mut rows, by);

    Page {
        title: format!("Repos for {}", org),
        tables: vec![repo_table(&rows)],
        notices,
    }
}

/// Renders [`Page`]s to HTML.
pub struct HtmlGenerator {
    tera: Tera,
}

impl HtmlGenerator {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(HOME_TEMPLATE, include_str!("templates/home.html"))?;
        Ok(Self { tera })
    }

    pub fn render(&self, page: &Page) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("page_title", &page.title);
        context.insert("tables", &page.tables);
        context.insert("notices", &page.notices);
        context.insert(
            "generated_date",
            &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );

        self.tera.render(HOME_TEMPLATE, &context)
    }
}
