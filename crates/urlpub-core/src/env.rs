//! Build-scoped environment variables and the contribution a notify call makes.
//!
//! The environment can be persisted as a `KEY=VALUE` file so later build
//! steps (shell scripts, other tools) can source it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Variable set to the HTTP status of the notification.
pub const HTTP_STATUS_ACTION: &str = "HTTP_STATUS_ACTION";

/// One variable handed to the build host to merge into its environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentContribution {
    pub key: String,
    pub value: String,
}

impl EnvironmentContribution {
    pub fn http_status(status_code: u32) -> Self {
        Self {
            key: HTTP_STATUS_ACTION.to_string(),
            value: status_code.to_string(),
        }
    }
}

/// Environment variables visible to later build steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnvironment {
    vars: BTreeMap<String, String>,
}

impl BuildEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Insert the contribution, replacing any previous value for its key.
    pub fn merge(&mut self, contribution: EnvironmentContribution) {
        self.vars.insert(contribution.key, contribution.value);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped.
    /// Keys are trimmed; values are kept verbatim after the first `=`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut env = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let head = line.trim_start();
            if head.trim_end().is_empty() || head.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .with_context(|| format!("line {}: expected KEY=VALUE", idx + 1))?;
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("line {}: empty variable name", idx + 1);
            }
            env.set(key, value);
        }
        Ok(env)
    }

    /// Read an environment file. A missing file is an empty environment.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read env file {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("invalid env file {}", path.display()))
    }

    /// Write the environment as sorted `KEY=VALUE` lines.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_string())
            .with_context(|| format!("failed to write env file {}", path.display()))?;
        tracing::debug!("wrote {} variable(s) to {}", self.len(), path.display());
        Ok(())
    }
}

impl std::fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, v) in &self.vars {
            writeln!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}
