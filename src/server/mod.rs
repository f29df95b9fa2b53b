//! HTTP dashboard server.

pub mod handlers;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;
use crate::github::{GitHubApi, PageLimits};
use crate::report::HtmlGenerator;

/// Application state shared across handlers.
///
/// Read-only once the server is running; per-request aggregation state
/// lives inside the handlers.
pub struct AppState {
    pub api: Arc<dyn GitHubApi>,
    pub limits: PageLimits,
    pub html: HtmlGenerator,
}

/// Register every dashboard route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/getorg/{org}", web::get().to(handlers::get_org))
        .route("/getrepos/{org}", web::get().to(handlers::get_repos))
        .route("/topcontrib/{org}", web::get().to(handlers::top_contributors))
        .route("/showrepos/{org}/{by}", web::get().to(handlers::show_repos));
}

/// Bind and serve until the process is stopped.
pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let app_state = web::Data::new(state);
    let server_addr = format!("{}:{}", config.host, config.port);

    info!("Starting dashboard on http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await
    .context("Dashboard server stopped with an error")
}
