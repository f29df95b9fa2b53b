//! OrgPulse - GitHub organization dashboard
//!
//! A small web server that queries the GitHub REST API and renders an
//! organization's repositories and contributors as HTML tables.
//!
//! Exit codes:
//!   0 - Clean shutdown
//!   1 - Startup error (missing credentials, bad config, bind failure)

mod analysis;
mod cli;
mod config;
mod error;
mod github;
mod models;
mod report;
mod server;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, Credentials};
use github::GitHubClient;
use report::HtmlGenerator;
use server::AppState;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

#[actix_web::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args)?;

    info!("OrgPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_server(args).await {
        error!("Startup failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .orgpulse.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  .orgpulse.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .orgpulse.toml")?;

    println!("✅ Created .orgpulse.toml with default settings.");
    println!("   Edit it to change the bind address, API URL, and paging limits.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) -> Result<()> {
    let level = args.log_level();

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish()
        .try_init()
        .context("Failed to set tracing subscriber")
}

/// Load settings and credentials, then serve the dashboard.
async fn run_server(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let credentials = Credentials::from_env()?;
    info!("Authenticating to {} as {}", config.github.api_url, credentials.user);

    let client = GitHubClient::new(&config.github, credentials)
        .context("Failed to create GitHub client")?;
    let html = HtmlGenerator::new().context("Failed to load page templates")?;

    let state = AppState {
        api: Arc::new(client),
        limits: config.github.page_limits(),
        html,
    };

    server::run(&config.server, state).await
}

/// Load configuration from file or use defaults.
///
/// A config file that exists but cannot be read or parsed is a startup error.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Ok(Config::load(config_path)?);
    }

    // Try default location
    match Config::load_default()? {
        Some(config) => {
            info!("Loaded default config from .orgpulse.toml");
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
