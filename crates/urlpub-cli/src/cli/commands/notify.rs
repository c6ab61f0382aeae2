//! `urlpub notify` – run the post-build notification step.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use urlpub_core::config::UrlPublisherConfig;
use urlpub_core::env::BuildEnvironment;
use urlpub_core::notify::NotificationResult;
use urlpub_core::step::NotifyStep;

/// Options of the `notify` subcommand.
#[derive(Debug, Clone, Default)]
pub struct NotifyArgs {
    pub url: Option<String>,
    pub env_file: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub connect_timeout: Option<u64>,
    pub json: bool,
}

/// Applies command-line overrides on top of the loaded config.
fn effective_config(cfg: &UrlPublisherConfig, args: &NotifyArgs) -> UrlPublisherConfig {
    let mut cfg = cfg.clone();
    if let Some(secs) = args.timeout {
        cfg.timeout_secs = secs;
    }
    if let Some(secs) = args.connect_timeout {
        cfg.connect_timeout_secs = secs;
    }
    cfg
}

/// Returns Err only for configuration or env-file problems. The HTTP outcome,
/// including transport failures, never makes this fail.
pub fn run_notify(cfg: &UrlPublisherConfig, args: &NotifyArgs) -> Result<()> {
    let cfg = effective_config(cfg, args);
    let step = NotifyStep::from_config(&cfg, args.url.as_deref())
        .context("no usable publish URL (pass one or set publish_url in the config file)")?;

    let mut env = match &args.env_file {
        Some(path) => BuildEnvironment::load(path)?,
        None => BuildEnvironment::new(),
    };

    let result = if args.json {
        let result = step.perform(&mut env, &mut io::stderr().lock());
        print_json(&result)?;
        result
    } else {
        step.perform(&mut env, &mut io::stdout().lock())
    };

    if let Some(path) = &args.env_file {
        if result.environment_contribution().is_some() {
            env.save(path)?;
        }
    }

    tracing::info!(
        url = step.request().target_url(),
        status = ?result.status_code(),
        succeeded = result.succeeded(),
        "notify step finished"
    );
    Ok(())
}

fn print_json(result: &NotificationResult) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, result)?;
    writeln!(out)?;
    Ok(())
}
