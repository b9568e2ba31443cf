//! Backend request/response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content type assumed when the backend omits one.
pub const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/wav";

/// Message used when a rejected generation carries no `detail`.
pub const GENERATION_FAILED: &str = "Generation failed";

/// Message used when the clone endpoint rejects a request.
pub const CLONE_FAILED: &str = "Failed to clone voice";

/// Errors that can occur when communicating with the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Body of `POST /tts/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
    pub voice_id: String,
}

impl GenerateRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
        }
    }
}

/// Accepted shapes of the `GET /tts/voices` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VoicesResponse {
    Bare(Vec<String>),
    Wrapped { voices: Vec<String> },
}

impl VoicesResponse {
    pub fn into_voices(self) -> Vec<String> {
        match self {
            VoicesResponse::Bare(voices) | VoicesResponse::Wrapped { voices } => voices,
        }
    }

    /// Parse a raw body, yielding an empty list for any unrecognized shape.
    pub fn parse_lenient(body: &[u8]) -> Vec<String> {
        serde_json::from_slice::<VoicesResponse>(body)
            .map(VoicesResponse::into_voices)
            .unwrap_or_default()
    }
}

/// Error body returned alongside a non-success status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extract a human readable message from a raw error body.
    ///
    /// String details are used verbatim; structured details (such as
    /// validation error lists) are rendered as JSON. Anything else falls
    /// back to [`GENERATION_FAILED`].
    pub fn message_from(body: &[u8]) -> String {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail);

        match detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s,
            Some(serde_json::Value::Null) | None => GENERATION_FAILED.to_string(),
            Some(serde_json::Value::String(_)) => GENERATION_FAILED.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl HealthStatus {
    /// Whether the model has finished loading.
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

/// Binary audio payload returned by a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Build a clip tagged with [`DEFAULT_AUDIO_CONTENT_TYPE`].
    pub fn wav(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DEFAULT_AUDIO_CONTENT_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_serializes_voice_id() {
        let request = GenerateRequest::new("Hi", "Liam");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Hi", "voice_id": "Liam"}));
    }

    #[test]
    fn test_voices_bare_and_wrapped_are_identical() {
        let bare = VoicesResponse::parse_lenient(br#"["Emma", "Liam"]"#);
        let wrapped = VoicesResponse::parse_lenient(br#"{"voices": ["Emma", "Liam"]}"#);
        assert_eq!(bare, vec!["Emma".to_string(), "Liam".to_string()]);
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_voices_unrecognized_shapes_are_empty() {
        assert!(VoicesResponse::parse_lenient(br#"{"names": ["Emma"]}"#).is_empty());
        assert!(VoicesResponse::parse_lenient(br#"{"voices": null}"#).is_empty());
        assert!(VoicesResponse::parse_lenient(br#"[1, 2, 3]"#).is_empty());
        assert!(VoicesResponse::parse_lenient(b"not json").is_empty());
        assert!(VoicesResponse::parse_lenient(b"").is_empty());
    }

    #[test]
    fn test_error_body_uses_detail() {
        let message = ErrorBody::message_from(br#"{"detail": "voice not found"}"#);
        assert_eq!(message, "voice not found");
    }

    #[test]
    fn test_error_body_falls_back_without_detail() {
        assert_eq!(ErrorBody::message_from(br#"{}"#), GENERATION_FAILED);
        assert_eq!(ErrorBody::message_from(br#"{"detail": ""}"#), GENERATION_FAILED);
        assert_eq!(ErrorBody::message_from(b"Internal Server Error"), GENERATION_FAILED);
    }

    #[test]
    fn test_error_body_renders_structured_detail() {
        let message = ErrorBody::message_from(br#"{"detail": [{"msg": "field required"}]}"#);
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_health_status_deserialize() {
        let ready: HealthStatus =
            serde_json::from_str(r#"{"status": "ready", "device": "cuda"}"#).unwrap();
        assert!(ready.is_ready());
        assert_eq!(ready.device.as_deref(), Some("cuda"));

        let loading: HealthStatus = serde_json::from_str(r#"{"status": "loading"}"#).unwrap();
        assert!(!loading.is_ready());
        assert_eq!(loading.device, None);
    }
}
