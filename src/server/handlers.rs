//! Dashboard endpoint handlers.

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use tracing::info;

use super::AppState;
use crate::analysis::{list_repositories, organization_contributors, repo_rows};
use crate::error::AppError;
use crate::github::PageOutcome;
use crate::models::SortColumn;
use crate::report::{contributor_page, repo_page};

/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "orgpulse"
    }))
}

/// GET /getorg/{org}
///
/// Pass GitHub's organization document through unchanged.
pub async fn get_org(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let org = path.into_inner();
    let body = state.api.organization(&org).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Set on `/getrepos` responses whose listing stopped at the page cap.
pub const TRUNCATED_HEADER: &str = "x-orgpulse-truncated";

/// GET /getrepos/{org}
pub async fn get_repos(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let org = path.into_inner();
    let (repos, outcome) = list_repositories(state.api.as_ref(), &org, state.limits).await?;

    let mut response = HttpResponse::Ok();
    if outcome == PageOutcome::Capped {
        response.insert_header((TRUNCATED_HEADER, "true"));
    }
    Ok(response.json(repos))
}

/// GET /topcontrib/{org}
///
/// Internal and external contributor tables across every repository of
/// the organization.
pub async fn top_contributors(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let org = path.into_inner();
    info!("Aggregating contributors for {}", org);

    let report = organization_contributors(state.api.as_ref(), &org, state.limits).await?;
    let html = state.html.render(&contributor_page(&org, &report))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

/// GET /showrepos/{org}/{by}
///
/// Repository table sorted by `by` (Name, Forks, Stars or Contributors).
pub async fn show_repos(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (org, by) = path.into_inner();
    let column: SortColumn = by.parse().map_err(AppError::Validation)?;
    info!("Listing repositories for {} by {}", org, column);

    let listing = repo_rows(state.api.as_ref(), &org, state.limits).await?;
    let html = state.html.render(&repo_page(&org, listing, column))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
