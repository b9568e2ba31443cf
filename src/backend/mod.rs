//! Backend communication with the Chatterbox TTS server.
//!
//! Provides the [`Backend`] trait and its HTTP implementation for the
//! three TTS endpoints (list voices, generate from preset, clone from
//! sample) plus the readiness probe.

mod client;
mod types;

pub use client::HttpBackend;
pub use types::{
    AudioClip, BackendError, CLONE_FAILED, DEFAULT_AUDIO_CONTENT_TYPE, ErrorBody,
    GENERATION_FAILED, GenerateRequest, HealthStatus, VoicesResponse,
};

use crate::audio::ReferenceAudio;

/// Default backend address (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Trait for TTS backend communication.
///
/// This trait abstracts the HTTP communication with the TTS server,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// List preset voice identifiers.
    ///
    /// Never fails: transport errors and unexpected bodies yield an empty
    /// list.
    fn list_voices(&self) -> Vec<String>;

    /// Synthesize `text` with the preset voice `voice_id`.
    fn generate_from_preset(&self, text: &str, voice_id: &str) -> Result<AudioClip, BackendError>;

    /// Synthesize `text` in the voice of an uploaded reference sample.
    fn clone_from_sample(
        &self,
        reference: &ReferenceAudio,
        text: &str,
    ) -> Result<AudioClip, BackendError>;

    /// Check backend readiness.
    fn health(&self) -> Result<HealthStatus, BackendError>;
}

/// Create a backend for the given base address.
pub fn create_backend(base_url: &str) -> Result<HttpBackend, BackendError> {
    HttpBackend::new(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_backend_list_voices() {
        let mut mock = MockBackend::new();

        mock.expect_list_voices()
            .times(1)
            .returning(|| vec!["Emma".to_string(), "Liam".to_string()]);

        let voices = mock.list_voices();
        assert_eq!(voices, vec!["Emma", "Liam"]);
    }

    #[test]
    fn test_mock_backend_generate_rejected() {
        let mut mock = MockBackend::new();

        mock.expect_generate_from_preset()
            .withf(|text, voice| text == "Hi" && voice == "Liam")
            .times(1)
            .returning(|_, _| Err(BackendError::Rejected("voice not found".to_string())));

        let result = mock.generate_from_preset("Hi", "Liam");
        let err = result.unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));
        assert_eq!(err.to_string(), "voice not found");
    }

    #[test]
    fn test_mock_backend_clone() {
        let mut mock = MockBackend::new();

        mock.expect_clone_from_sample()
            .withf(|reference, text| reference.name == "me.wav" && text == "Hello")
            .times(1)
            .returning(|_, _| Ok(AudioClip::wav(b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec())));

        let reference = ReferenceAudio::new("me.wav", "audio/wav", b"RIFF".to_vec());
        let clip = mock.clone_from_sample(&reference, "Hello").unwrap();
        assert!(clip.bytes.starts_with(b"RIFF"));
        assert_eq!(clip.content_type, "audio/wav");
    }

    #[test]
    fn test_create_backend_trims_trailing_slash() {
        let backend = create_backend("http://localhost:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_create_backend_default_url() {
        let backend = create_backend(DEFAULT_API_URL).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
    }
}
