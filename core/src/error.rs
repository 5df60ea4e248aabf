//! Error types for the shortener client.
//!
//! # Design
//! Rate limiting and bad credentials get dedicated unit variants because
//! callers react to them differently (back off, or fix the token). Every other
//! error envelope lands in `Api` with the raw `status_txt`. Transport failures
//! are boxed as-is so the original error stays reachable through `source()`.

use thiserror::Error;

/// Boxed transport error, kept untouched for downcasting.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ShortenerClient`.
#[derive(Debug, Error)]
pub enum ShortenError {
    /// The long URL was empty. Raised before any request is built.
    #[error("the URL is empty")]
    EmptyInput,

    /// The API answered `INVALID_LOGIN`.
    #[error("invalid or missing access token")]
    Auth,

    /// The API answered `RATE_LIMIT_EXCEEDED`.
    #[error("rate limit exceeded")]
    RateLimit,

    /// Any other non-2xx envelope; carries the raw `status_txt`.
    #[error("API error: {0}")]
    Api(String),

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response was classified as successful but had no `data.url` string.
    #[error("response has no data.url field")]
    MissingShortUrl,

    /// The client was configured with an empty access token.
    #[error("access token must not be empty")]
    MissingAccessToken,

    /// The transport failed to complete the request.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

impl ShortenError {
    /// True when the failure was reported by the remote API in its envelope.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Auth | Self::RateLimit | Self::Api(_))
    }

    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}
