//! Relay error types.

use thiserror::Error;

/// Message returned when `/login/` is called without a token.
pub const LOGIN_TOKEN_REQUIRED: &str = "Token is required";
/// Message returned when `/cameras/` or `/recordings/` is called without a token.
pub const TOKEN_REQUIRED: &str = "Token is required for this action";
/// Message returned when `/recordings/` is called without a camera id.
pub const CAMERA_ID_REQUIRED: &str = "Camera ID is required for this action";

/// Errors that stop a relay call before or while talking to upstream.
///
/// A non-200 upstream status is not an error: it is relayed as-is.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Required field absent, null or empty.
    #[error("{0}")]
    MissingField(&'static str),

    /// Camera id that would not stay a single path segment.
    #[error("Camera ID is invalid")]
    InvalidCameraId,

    /// Token that cannot be carried in an HTTP header.
    #[error("Token contains invalid characters")]
    InvalidToken,

    /// Body present but not a JSON object of the expected shape.
    #[error("Request body must be a JSON object")]
    MalformedBody,

    /// Transport or decoding failure on the upstream call.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Base URL rejected while building the upstream client.
    #[error("invalid upstream base URL '{0}'")]
    InvalidBaseUrl(String),

    /// HTTP client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failures talking to the upstream camera API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream service unavailable")]
    Unavailable(#[source] reqwest::Error),

    #[error("Upstream service timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("Upstream returned an invalid response")]
    InvalidBody(#[source] serde_json::Error),
}

impl UpstreamError {
    /// Classify a reqwest transport error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Unavailable(err)
        }
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
