//! Configuration CLI commands.

use clap::{Args, Subcommand};

use carebridge_core::error::AppError;

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
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv("api.base_url", &config.api.base_url);
                    output::print_kv(
                        "api.request_timeout",
                        &format!("{}s", config.api.request_timeout_seconds),
                    );
                    output::print_kv("api.user_agent", &config.api.user_agent);
                    output::print_kv("auth.token_file", &config.auth.token_file);
                    output::print_kv(
                        "notifications.poll",
                        &format!("{}s", config.notifications.poll_interval_seconds),
                    );
                    output::print_kv(
                        "notifications.show_read",
                        &config.notifications.show_read_default.to_string(),
                    );
                    output::print_kv("logging.level", &config.logging.level);
                    output::print_kv("logging.format", &config.logging.format);
                }
            }
        }
        ConfigCommand::Validate => {
            let config = super::load_config(config_path)?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Backend", &config.api.base_url);
        }
    }

    Ok(())
}
