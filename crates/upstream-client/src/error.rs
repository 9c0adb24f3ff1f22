//! Error types for the upstream clients.

use thiserror::Error;


/// Client error types.
///
/// Validation failures are raised before any request leaves the process.
/// Everything else describes a failed exchange with an upstream service.
#[derive(Debug, Error)]
pub enum Error {
    /// Request rejected locally.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Asset class outside of equity/option.
    #[error("Unsupported asset class: {0}")]
    UnsupportedAssetClass(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream error ({status}): {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the upstream.
        body: String,
    },

    /// Upstream answered successfully but without a field we need.
    #[error("Upstream response missing field: {0}")]
    MissingField(&'static str),

    /// Upstream request exceeded its timeout.
    #[error("Upstream request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Credential could not be encoded as a header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else {
            Error::Http(err)
        }
    }
}

impl Error {
    /// Returns true for failures raised before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::UnsupportedAssetClass(_))
    }

    /// Returns true for failures of an upstream exchange, timeouts included.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Upstream { .. }
                | Error::MissingField(_)
                | Error::Timeout(_)
                | Error::Http(_)
                | Error::Json(_)
        )
    }

    /// Returns true if the upstream call timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    /// Upstream HTTP status, when the upstream answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
