//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// OrgPulse - GitHub organization dashboard
///
/// Serves HTML tables of an organization's repositories and its internal
/// and external contributors. Credentials are read from ORGPULSE_USER and
/// ORGPULSE_TOKEN.
///
/// Examples:
///   orgpulse
///   orgpulse --port 8080 --verbose
///   orgpulse --config ./dashboard.toml
///   orgpulse --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .orgpulse.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind the dashboard to
    #[arg(long, value_name = "HOST", env = "ORGPULSE_HOST")]
    pub host: Option<String>,

    /// Port to bind the dashboard to
    #[arg(short, long, value_name = "PORT", env = "ORGPULSE_PORT")]
    pub port: Option<u16>,

    /// GitHub REST API base URL
    ///
    /// Point this at a GitHub Enterprise instance, e.g.
    /// https://github.example.com/api/v3
    #[arg(long, value_name = "URL", env = "ORGPULSE_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .orgpulse.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(ref api_url) = self.api_url {
            if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.port == Some(0) {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
