//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use profilehub_core::config::AppConfig;
use profilehub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate configuration file
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = mask_secrets(AppConfig::load_file(config_path)?);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => println!("{config:#?}"),
            }
        }
        ConfigCommand::Validate => match AppConfig::load_file(config_path).and_then(validate) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                output::print_kv("Store", &config.refresh.store_path);
                output::print_kv("Check schedule", &config.refresh.check_schedule);
                output::print_kv(
                    "Manual refresh",
                    if config.server.refresh_token.is_some() { "enabled" } else { "disabled" },
                );
                if config.sources.presence.bot_token.is_none() {
                    output::print_warning("No presence bot token: presence will stay degraded");
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(out_path, default_config).await?;

            output::print_success(&format!("Default config written to '{out_path}'"));
        }
    }

    Ok(())
}

/// Semantic checks the deserializer cannot express.
fn validate(config: AppConfig) -> Result<AppConfig, AppError> {
    if config.refresh.staleness_threshold_hours == 0 {
        return Err(AppError::validation(
            "refresh.staleness_threshold_hours must be greater than zero",
        ));
    }
    config.refresh.staleness_threshold()?;
    if config.sources.request_timeout_seconds == 0 {
        return Err(AppError::validation(
            "sources.request_timeout_seconds must be greater than zero",
        ));
    }
    if config.refresh.store_path.trim().is_empty() {
        return Err(AppError::validation("refresh.store_path must not be empty"));
    }
    Ok(config)
}

fn mask(secret: &mut Option<String>) {
    if secret.is_some() {
        *secret = Some("****".to_string());
    }
}

fn mask_secrets(mut config: AppConfig) -> AppConfig {
    mask(&mut config.server.refresh_token);
    mask(&mut config.sources.presence.bot_token);
    config
}
