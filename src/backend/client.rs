//! HTTP client for backend communication.

use reqwest::blocking::{Client, Response, multipart};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::audio::ReferenceAudio;

use super::Backend;
use super::types::{
    AudioClip, BackendError, CLONE_FAILED, DEFAULT_AUDIO_CONTENT_TYPE, ErrorBody,
    GenerateRequest, HealthStatus, VoicesResponse,
};

/// HTTP-based backend client.
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Create a new HTTP backend client for `base_url`.
    ///
    /// Requests carry no timeout; a slow synthesis simply keeps the call
    /// waiting.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn fetch_voices(&self) -> Result<Vec<String>, BackendError> {
        let response = self
            .client
            .get(self.url("/tts/voices"))
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(VoicesResponse::parse_lenient(&body))
    }

    /// Read a successful response into an [`AudioClip`].
    fn read_audio(response: Response) -> Result<AudioClip, BackendError> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_AUDIO_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(AudioClip::new(bytes.to_vec(), content_type))
    }
}

impl Backend for HttpBackend {
    fn list_voices(&self) -> Vec<String> {
        match self.fetch_voices() {
            Ok(voices) => {
                debug!(count = voices.len(), "Fetched preset voices");
                voices
            }
            Err(e) => {
                warn!("Error fetching voices: {e}");
                Vec::new()
            }
        }
    }

    fn generate_from_preset(&self, text: &str, voice_id: &str) -> Result<AudioClip, BackendError> {
        let request = GenerateRequest::new(text, voice_id);
        debug!(voice_id, chars = text.len(), "Requesting preset generation");

        let response = self
            .client
            .post(self.url("/tts/generate"))
            .json(&request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.bytes().unwrap_or_default();
            let message = ErrorBody::message_from(&body);
            warn!(%status, "Preset generation rejected: {message}");
            return Err(BackendError::Rejected(message));
        }

        Self::read_audio(response)
    }

    fn clone_from_sample(
        &self,
        reference: &ReferenceAudio,
        text: &str,
    ) -> Result<AudioClip, BackendError> {
        debug!(file = %reference.name, bytes = reference.bytes.len(), "Requesting voice clone");

        let file_part = multipart::Part::bytes(reference.bytes.clone())
            .file_name(reference.name.clone())
            .mime_str(&reference.content_type)
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let form = multipart::Form::new()
            .part("reference_audio", file_part)
            .text("text", text.to_string());

        let response = self
            .client
            .post(self.url("/tts/clone"))
            .multipart(form)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Error cloning voice");
            return Err(BackendError::Rejected(CLONE_FAILED.to_string()));
        }

        Self::read_audio(response)
    }

    fn health(&self) -> Result<HealthStatus, BackendError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
