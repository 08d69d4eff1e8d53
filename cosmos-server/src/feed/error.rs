//! Price feed error types.

/// Maximum number of characters of a response body kept in an error.
pub const MAX_BODY_CHARS: usize = 100;

/// Errors that can occur when fetching the price feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Client could not be configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl FeedError {
    /// Build an API error, keeping at most [`MAX_BODY_CHARS`] of the body.
    pub fn api(status: u16, body: &str) -> Self {
        FeedError::Api {
            status,
            message: truncate_chars(body, MAX_BODY_CHARS),
        }
    }
}

/// Truncate on a character boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
