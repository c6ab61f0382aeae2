//! Post-build step: notify the configured URL, log the outcome, and record
//! `HTTP_STATUS_ACTION` in the build environment.
//!
//! The step never fails the build. Every run is reported as complete whatever
//! the HTTP outcome, including transport failures.

use std::io::Write;

use crate::config::UrlPublisherConfig;
use crate::env::BuildEnvironment;
use crate::notify::{NotificationRequest, NotificationResult, NotifyOptions};
use crate::validate::UrlError;

#[derive(Debug, Clone)]
pub struct NotifyStep {
    request: NotificationRequest,
    options: NotifyOptions,
}

impl NotifyStep {
    pub fn new(request: NotificationRequest, options: NotifyOptions) -> Self {
        Self { request, options }
    }

    /// Build the step from config, with `url_override` taking precedence over
    /// `publish_url`. No URL at all is reported as [`UrlError::Empty`].
    pub fn from_config(
        cfg: &UrlPublisherConfig,
        url_override: Option<&str>,
    ) -> Result<Self, UrlError> {
        let url = url_override
            .or(cfg.publish_url.as_deref())
            .ok_or(UrlError::Empty)?;
        Ok(Self::new(NotificationRequest::new(url)?, cfg.notify_options()))
    }

    pub fn request(&self) -> &NotificationRequest {
        &self.request
    }

    pub fn options(&self) -> &NotifyOptions {
        &self.options
    }

    /// Run the notification, write its lines to `log` and merge the status
    /// into `env` when one was obtained.
    ///
    /// Build log write errors are reported as diagnostics only.
    pub fn perform<W: Write>(&self, env: &mut BuildEnvironment, log: &mut W) -> NotificationResult {
        let result = self.request.send(&self.options);

        for line in result.log_lines() {
            if let Err(e) = writeln!(log, "{}", line) {
                tracing::warn!("failed to write build log line: {}", e);
                break;
            }
        }
        if let Err(e) = log.flush() {
            tracing::warn!("failed to flush build log: {}", e);
        }

        if let Some(contribution) = result.environment_contribution() {
            tracing::info!("{}={}", contribution.key, contribution.value);
            env.merge(contribution);
        }

        result
    }
}
