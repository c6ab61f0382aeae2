//! Outcome of a single notification and the build log lines it produces.

use serde::Serialize;

use super::error::TransportFailure;
use crate::env::EnvironmentContribution;

/// Statuses that count as a successful trigger.
pub fn is_success_status(code: u32) -> bool {
    matches!(code, 200 | 302)
}

/// What came back from the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Delivery {
    /// The server answered; any status, including 4xx/5xx.
    Responded { status_code: u32 },
    /// No status was obtained.
    TransportFailure(TransportFailure),
}

/// Result of one notify call. Built once, then reported or merged by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResult {
    target_url: String,
    #[serde(flatten)]
    delivery: Delivery,
    succeeded: bool,
    log_lines: Vec<String>,
}

impl NotificationResult {
    pub fn new(target_url: &str, delivery: Delivery) -> Self {
        let (succeeded, log_lines) = match &delivery {
            Delivery::Responded { status_code } => {
                let ok = is_success_status(*status_code);
                (
                    ok,
                    vec![
                        triggered_line(target_url, ok),
                        status_line(target_url, *status_code),
                    ],
                )
            }
            Delivery::TransportFailure(f) => {
                (false, vec![failure_line(target_url, &f.message)])
            }
        };
        Self {
            target_url: target_url.to_string(),
            delivery,
            succeeded,
            log_lines,
        }
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// HTTP status, or `None` when the request never completed.
    pub fn status_code(&self) -> Option<u32> {
        match self.delivery {
            Delivery::Responded { status_code } => Some(status_code),
            Delivery::TransportFailure(_) => None,
        }
    }

    /// True iff the status was 200 or 302.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Build log lines, in the order they must be written.
    pub fn log_lines(&self) -> &[String] {
        &self.log_lines
    }

    pub fn failure(&self) -> Option<&TransportFailure> {
        match &self.delivery {
            Delivery::TransportFailure(f) => Some(f),
            Delivery::Responded { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }

    /// `HTTP_STATUS_ACTION=<status>` when a status was obtained.
    pub fn environment_contribution(&self) -> Option<EnvironmentContribution> {
        self.status_code().map(EnvironmentContribution::http_status)
    }
}

fn triggered_line(target_url: &str, succeeded: bool) -> String {
    let outcome = if succeeded {
        "Successfully!"
    } else {
        "But Not Successfully!"
    };
    format!("Triggered URL {} {}", target_url, outcome)
}

fn status_line(target_url: &str, status_code: u32) -> String {
    format!("Status Code for URL {} is {}", target_url, status_code)
}

fn failure_line(target_url: &str, message: &str) -> String {
    format!(
        "Failed to trigger the suggested URL -> {}: {}",
        target_url, message
    )
}
