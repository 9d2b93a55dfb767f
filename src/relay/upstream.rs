//! Outbound calls to the camera-management API.
//!
//! # Responsibilities
//! - Map each relay operation to its upstream path
//! - Attach the `<scheme> <token>` Authorization header
//! - Issue exactly one GET per call and hand back status + raw JSON body
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` shared by all requests
//! - The body is checked to be JSON but never re-encoded
//! - Camera ids are pushed as a single percent-encoded path segment

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use serde::de::IgnoredAny;
use url::Url;

use crate::config::UpstreamConfig;
use crate::relay::error::{RelayError, RelayResult, UpstreamError};

/// Upstream resource targeted by a relay operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /v1/me/`
    Me,
    /// `GET /v1/shared-cameras/`
    SharedCameras,
    /// `GET /v1/shared-cameras/{id}/recording/`
    Recordings(String),
}

impl Endpoint {
    /// Operation name used in logs and metrics.
    pub fn operation(&self) -> &'static str {
        match self {
            Endpoint::Me => "authenticate-identity",
            Endpoint::SharedCameras => "list-cameras",
            Endpoint::Recordings(_) => "list-recordings",
        }
    }

    /// Resolve against `base`, keeping any path the base already carries.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        // Bases that cannot carry a path are rejected by UpstreamClient::from_config.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match self {
                Endpoint::Me => segments.extend(["v1", "me", ""]),
                Endpoint::SharedCameras => segments.extend(["v1", "shared-cameras", ""]),
                Endpoint::Recordings(cam_id) => {
                    segments.extend(["v1", "shared-cameras", cam_id.as_str(), "recording", ""])
                }
            };
        }
        url
    }
}

/// Status and body exactly as upstream sent them.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Client for the upstream camera API.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Url,
    auth_scheme: String,
}

impl UpstreamClient {
    /// Build the shared client from configuration.
    pub fn from_config(config: &UpstreamConfig) -> RelayResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| RelayError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(RelayError::Client)?;

        Ok(Self {
            client,
            base_url,
            auth_scheme: config.auth_scheme.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Authorization header value for `token`.
    pub fn authorization(&self, token: &str) -> RelayResult<HeaderValue> {
        let mut value = HeaderValue::try_from(format!("{} {}", self.auth_scheme, token))
            .map_err(|_| RelayError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Issue one GET for `endpoint` on behalf of `token`.
    ///
    /// Any upstream status is returned as `Ok`; only transport failures and
    /// non-JSON bodies are errors.
    pub async fn fetch(&self, endpoint: &Endpoint, token: &str) -> RelayResult<UpstreamResponse> {
        let authorization = self.authorization(token)?;
        let url = endpoint.url(&self.base_url);

        tracing::debug!(
            operation = endpoint.operation(),
            url = %url,
            "Dispatching upstream request"
        );

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(UpstreamError::from_transport)?;

        serde_json::from_slice::<IgnoredAny>(&body).map_err(UpstreamError::InvalidBody)?;

        Ok(UpstreamResponse { status, body })
    }
}
