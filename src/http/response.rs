//! Response handling.
//!
//! # Responsibilities
//! - Copy upstream status and body to the caller unchanged
//! - Map relay errors to `{"error": "<message>"}` with the right status
//!
//! # Design Decisions
//! - Upstream body bytes are sent as received, never re-serialized
//! - Transport failures surface as 502, upstream timeouts as 504

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::relay::{RelayError, UpstreamError, UpstreamResponse};

/// Error payload returned by the relay itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl RelayError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingField(_)
            | RelayError::InvalidCameraId
            | RelayError::InvalidToken
            | RelayError::MalformedBody => StatusCode::BAD_REQUEST,
            RelayError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            RelayError::InvalidBaseUrl(_) | RelayError::Client(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.body,
        )
            .into_response()
    }
}
