//! CLI for the urlpub build notifier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use urlpub_core::config;

use commands::{run_check, run_completions, run_config_path, run_notify, NotifyArgs};

/// Top-level CLI for urlpub.
#[derive(Debug, Parser)]
#[command(name = "urlpub")]
#[command(about = "urlpub: POST to a URL after a build and record the HTTP status", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/urlpub/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Notify the publish URL and record HTTP_STATUS_ACTION. Exits 0 whatever the HTTP outcome.
    Notify {
        /// URL to POST to. Defaults to `publish_url` from the config file.
        url: Option<String>,

        /// KEY=VALUE file to merge HTTP_STATUS_ACTION into (created if missing).
        #[arg(long, value_name = "PATH")]
        env_file: Option<PathBuf>,

        /// Total request timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Connect timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        connect_timeout: Option<u64>,

        /// Print the result as JSON on stdout; build log lines go to stderr.
        #[arg(long)]
        json: bool,
    },

    /// Check that a URL is acceptable as a publish URL.
    Check {
        /// URL to validate.
        url: String,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the path of the config file.
    ConfigPath,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Notify {
                url,
                env_file,
                timeout,
                connect_timeout,
                json,
            } => {
                let cfg = match &cli.config {
                    Some(path) => config::load_from(path)?,
                    None => config::load_or_init()?,
                };
                tracing::debug!("loaded config: {:?}", cfg);
                let args = NotifyArgs {
                    url,
                    env_file,
                    timeout,
                    connect_timeout,
                    json,
                };
                run_notify(&cfg, &args)?;
            }
            CliCommand::Check { url } => run_check(&url)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::ConfigPath => run_config_path(cli.config.as_deref())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
