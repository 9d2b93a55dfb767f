//! The three relay endpoints.
//!
//! Each handler parses its body, checks required fields, and forwards one GET
//! upstream. Rejections never reach upstream.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::error::{RelayError, RelayResult, LOGIN_TOKEN_REQUIRED, TOKEN_REQUIRED};
use crate::relay::request::{parse_body, RecordingsRequest, TokenRequest};
use crate::relay::upstream::Endpoint;

/// `POST /login/` → `GET /v1/me/`
pub async fn login(State(state): State<AppState>, body: Bytes) -> RelayResult<Response> {
    let start = Instant::now();
    let token = parse_body::<TokenRequest>(&body)
        .and_then(|request| request.require_token(LOGIN_TOKEN_REQUIRED).map(str::to_owned))
        .map_err(|e| rejected("authenticate-identity", e, start))?;

    relay(&state, Endpoint::Me, &token, start).await
}

/// `POST /cameras/` → `GET /v1/shared-cameras/`
pub async fn cameras(State(state): State<AppState>, body: Bytes) -> RelayResult<Response> {
    let start = Instant::now();
    let token = parse_body::<TokenRequest>(&body)
        .and_then(|request| request.require_token(TOKEN_REQUIRED).map(str::to_owned))
        .map_err(|e| rejected("list-cameras", e, start))?;

    relay(&state, Endpoint::SharedCameras, &token, start).await
}

/// `POST /recordings/` → `GET /v1/shared-cameras/{camId}/recording/`
pub async fn recordings(State(state): State<AppState>, body: Bytes) -> RelayResult<Response> {
    let start = Instant::now();
    let (token, cam_id) = parse_body::<RecordingsRequest>(&body)
        .and_then(|request| {
            let (token, cam_id) = request.require_fields()?;
            Ok((token.to_owned(), cam_id.to_owned()))
        })
        .map_err(|e| rejected("list-recordings", e, start))?;

    relay(&state, Endpoint::Recordings(cam_id), &token, start).await
}

fn rejected(operation: &'static str, err: RelayError, start: Instant) -> RelayError {
    tracing::debug!(operation, reason = %err, "Rejected before dispatch");
    metrics::record_relay(operation, err.status().as_u16(), start);
    err
}

/// Shared outbound-call helper: one upstream GET, result relayed verbatim.
async fn relay(
    state: &AppState,
    endpoint: Endpoint,
    token: &str,
    start: Instant,
) -> RelayResult<Response> {
    let operation = endpoint.operation();

    match state.upstream.fetch(&endpoint, token).await {
        Ok(upstream) => {
            if upstream.status.is_success() {
                tracing::debug!(operation, status = %upstream.status, elapsed = ?start.elapsed(), "Relayed");
            } else {
                tracing::info!(operation, status = %upstream.status, elapsed = ?start.elapsed(), "Upstream returned error status");
            }
            metrics::record_relay(operation, upstream.status.as_u16(), start);
            Ok(upstream.into_response())
        }
        Err(e) => {
            tracing::warn!(operation, error = %e, source = ?std::error::Error::source(&e), "Upstream call failed");
            metrics::record_relay(operation, e.status().as_u16(), start);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::RelayConfig;
    use crate::http::HttpServer;

    fn router() -> Router {
        let mut config = RelayConfig::default();
        // Nothing listens here; validation tests must never get this far.
        config.upstream.base_url = "http://127.0.0.1:9/".into();
        HttpServer::new(config).unwrap().router()
    }

    async fn post(uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_login_requires_token() {
        for body in ["", "{}", r#"{"token": ""}"#] {
            let (status, json) = post("/login/", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, json!({"error": "Token is required"}));
        }
    }

    #[tokio::test]
    async fn test_cameras_requires_token() {
        let (status, json) = post("/cameras/", r#"{"token": null}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Token is required for this action"}));
    }

    #[tokio::test]
    async fn test_recordings_requires_token_then_cam_id() {
        let (status, json) = post("/recordings/", r#"{"camId": "42"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Token is required for this action"}));

        let (status, json) = post("/recordings/", r#"{"token": "abc", "camId": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Camera ID is required for this action"}));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, json) = post("/cameras/", "token=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Request body must be a JSON object"}));
    }
}
