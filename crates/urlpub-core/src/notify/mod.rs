//! The notification call: one POST with an empty body, status classified.
//!
//! Uses the curl crate (libcurl) in the calling thread. The easy handle is
//! owned by `post_empty` and dropped on every return path, and connection
//! reuse is disabled, so no socket outlives the call.

mod error;
mod result;

pub use error::{classify_curl_error, FailureKind, TransportFailure};
pub use result::{is_success_status, Delivery, NotificationResult};

use std::time::Duration;

use crate::validate::{validate_publish_url, UrlError};

/// Transfer limits for a notify call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyOptions {
    pub connect_timeout: Duration,
    /// Whole request, connect included.
    pub timeout: Duration,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl NotifyOptions {
    /// Zero means "no limit" to libcurl; replace it with the default limit.
    pub fn bounded(&self) -> Self {
        let defaults = Self::default();
        Self {
            connect_timeout: if self.connect_timeout.is_zero() {
                defaults.connect_timeout
            } else {
                self.connect_timeout
            },
            timeout: if self.timeout.is_zero() {
                defaults.timeout
            } else {
                self.timeout
            },
        }
    }
}

/// A validated target for one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    target_url: String,
}

impl NotificationRequest {
    /// Validates `target_url` (see [`validate_publish_url`]) and keeps it as
    /// written, minus surrounding whitespace, so log lines echo the user's URL.
    pub fn new(target_url: &str) -> Result<Self, UrlError> {
        validate_publish_url(target_url)?;
        Ok(Self {
            target_url: target_url.trim().to_string(),
        })
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn send(&self, opts: &NotifyOptions) -> NotificationResult {
        notify_with(&self.target_url, opts)
    }
}

/// POSTs to `target_url` with default timeouts.
pub fn notify(target_url: &str) -> NotificationResult {
    notify_with(target_url, &NotifyOptions::default())
}

/// POSTs to `target_url` and classifies the outcome.
///
/// Never fails: transport errors are folded into the result. The URL is not
/// re-validated here; whatever libcurl rejects becomes a `TransportFailure`.
pub fn notify_with(target_url: &str, opts: &NotifyOptions) -> NotificationResult {
    let delivery = match post_empty(target_url, opts) {
        Ok(status_code) => Delivery::Responded { status_code },
        Err(e) => Delivery::TransportFailure(TransportFailure::from(e)),
    };

    match &delivery {
        Delivery::Responded { status_code } => tracing::debug!(
            url = target_url,
            status = *status_code,
            success = is_success_status(*status_code),
            "notify completed"
        ),
        Delivery::TransportFailure(f) => tracing::warn!(
            url = target_url,
            kind = ?f.kind,
            "notify failed: {}",
            f.message
        ),
    }

    NotificationResult::new(target_url, delivery)
}

/// Sends the POST and returns the response code.
///
/// Once a status line has arrived the outcome is that status, even if reading
/// the body fails afterwards.
fn post_empty(url: &str, opts: &NotifyOptions) -> Result<u32, curl::Error> {
    let opts = opts.bounded();
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.post(true)?;
    easy.post_fields_copy(&[])?; // Content-Length: 0
    easy.follow_location(false)?;
    easy.forbid_reuse(true)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    let performed = {
        let mut transfer = easy.transfer();
        // Response body is not used.
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()
    };

    match performed {
        Ok(()) => easy.response_code(),
        Err(e) => match easy.response_code() {
            Ok(code) if code != 0 => {
                tracing::debug!(url, status = code, "response body incomplete: {}", e);
                Ok(code)
            }
            _ => Err(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_keeps_trimmed_url() {
        let req = NotificationRequest::new("  http://example.test/hook ").unwrap();
        assert_eq!(req.target_url(), "http://example.test/hook");
    }

    #[test]
    fn request_rejects_invalid_url() {
        assert_eq!(NotificationRequest::new(""), Err(UrlError::Empty));
        assert!(NotificationRequest::new("ftp://example.test").is_err());
    }

    #[test]
    fn default_options() {
        let opts = NotifyOptions::default();
        assert_eq!(opts.connect_timeout, Duration::from_secs(15));
        assert_eq!(opts.timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_timeouts_fall_back_to_defaults() {
        let opts = NotifyOptions {
            connect_timeout: Duration::ZERO,
            timeout: Duration::ZERO,
        };
        assert_eq!(opts.bounded(), NotifyOptions::default());

        let custom = NotifyOptions {
            connect_timeout: Duration::from_secs(2),
            timeout: Duration::ZERO,
        };
        let bounded = custom.bounded();
        assert_eq!(bounded.connect_timeout, Duration::from_secs(2));
        assert_eq!(bounded.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unsupported_scheme_is_transport_failure() {
        let r = notify_with("gopher-nope://example.test/", &NotifyOptions::default());
        assert_eq!(r.status_code(), None);
        assert!(!r.succeeded());
        assert!(r.error_message().is_some_and(|m| !m.is_empty()));
        assert_eq!(r.log_lines().len(), 1);
        assert!(r.log_lines()[0]
            .starts_with("Failed to trigger the suggested URL -> gopher-nope://example.test/: "));
    }
}
