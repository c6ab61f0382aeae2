//! Checks for the configured publish URL.
//!
//! Runs in the configuration layer, before any request is attempted.

use url::Url;

/// Why a publish URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("publish URL is empty")]
    Empty,
    #[error("publish URL is not a valid URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("publish URL must use http or https, not {0:?}")]
    UnsupportedScheme(String),
}

/// Validates user input for the publish URL and returns the parsed form.
///
/// Surrounding whitespace is ignored. Only absolute `http`/`https` URLs pass.
pub fn validate_publish_url(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }
    let parsed = Url::parse(trimmed)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(UrlError::UnsupportedScheme(other.to_string())),
    }
}
