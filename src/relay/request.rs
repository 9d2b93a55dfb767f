//! Typed request bodies for the relay endpoints.
//!
//! Bodies are parsed leniently: an empty body counts as `{}` and unknown keys
//! are ignored. Presence checks run after parsing, before any upstream call.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::relay::error::{RelayError, RelayResult, CAMERA_ID_REQUIRED, TOKEN_REQUIRED};

/// Body of `/login/` and `/cameras/`.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

impl TokenRequest {
    /// Return the token, or `MissingField(message)` if absent or empty.
    pub fn require_token(&self, message: &'static str) -> RelayResult<&str> {
        present(self.token.as_deref(), message)
    }
}

/// Body of `/recordings/`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordingsRequest {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default, rename = "camId", deserialize_with = "string_or_integer")]
    pub cam_id: Option<String>,
}

impl RecordingsRequest {
    /// Return `(token, cam_id)`. The token is checked first.
    pub fn require_fields(&self) -> RelayResult<(&str, &str)> {
        let token = present(self.token.as_deref(), TOKEN_REQUIRED)?;
        let cam_id = present(self.cam_id.as_deref(), CAMERA_ID_REQUIRED)?;
        if matches!(cam_id, "." | "..") {
            return Err(RelayError::InvalidCameraId);
        }
        Ok((token, cam_id))
    }
}

fn present<'a>(field: Option<&'a str>, message: &'static str) -> RelayResult<&'a str> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RelayError::MissingField(message)),
    }
}

/// Parse a request body into `T`. Anything but an empty body or a JSON
/// object is rejected.
pub fn parse_body<T>(body: &[u8]) -> RelayResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::MalformedBody)?;
    if !value.is_object() {
        return Err(RelayError::MalformedBody);
    }
    T::deserialize(value).map_err(|_| RelayError::MalformedBody)
}

// Camera ids arrive as strings from the web client but are numeric upstream.
fn string_or_integer<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(n) => n.to_string(),
    }))
}
