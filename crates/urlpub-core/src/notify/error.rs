//! Transport failure raised by the HTTP client and its classification.

use serde::Serialize;

/// Broad category of a transport failure, derived from the curl error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Connection,
    Resolve,
    Tls,
    MalformedUrl,
    Other,
}

/// The request never produced an HTTP status.
///
/// Covers connection refused, DNS failure, timeouts, TLS errors and targets
/// the client refuses to parse. Carried as a value in the notify result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct TransportFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<curl::Error> for TransportFailure {
    fn from(e: curl::Error) -> Self {
        Self::new(classify_curl_error(&e), e.to_string())
    }
}

/// Classify a curl error into a failure kind.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return FailureKind::Resolve;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return FailureKind::MalformedUrl;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cacert()
    {
        return FailureKind::Tls;
    }
    if e.is_couldnt_connect()
        || e.is_got_nothing()
        || e.is_send_error()
        || e.is_recv_error()
        || e.is_read_error()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}
