//! CLI command definitions and dispatch.

pub mod avatars;
pub mod config;
pub mod raw;
pub mod refresh;
pub mod show;
pub mod status;

use clap::{Parser, Subcommand};

use profilehub_core::error::AppError;

use crate::client::ApiClient;
use crate::output::OutputFormat;

/// ProfileHub: cached social and presence profile for one identity
#[derive(Debug, Parser)]
#[command(name = "profilehub", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the ProfileHub server
    #[arg(long, env = "PROFILEHUB_API_URL", default_value = "http://127.0.0.1:25566")]
    pub api_url: String,

    /// Path to configuration file (config commands only)
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize the cached profile
    Show,
    /// Print the cached snapshot exactly as the server returns it
    Raw,
    /// List avatar URLs from both sources
    Avatars,
    /// Trigger a manual refresh and show the result
    Refresh(refresh::RefreshArgs),
    /// Show server liveness and refresh state
    Status,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Show => show::execute(&self.client()?, self.format).await,
            Commands::Raw => raw::execute(&self.client()?).await,
            Commands::Avatars => avatars::execute(&self.client()?, self.format).await,
            Commands::Refresh(args) => refresh::execute(args, &self.client()?, self.format).await,
            Commands::Status => status::execute(&self.client()?, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }

    fn client(&self) -> Result<ApiClient, AppError> {
        ApiClient::new(&self.api_url)
    }
}
