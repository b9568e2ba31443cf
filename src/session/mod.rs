//! Interactive TTS session.
//!
//! [`Session`] holds the whole client state (input text, mode, voice list
//! and selection, reference sample, loading flags, current audio and
//! playback flag) and exposes one method per user operation.

mod controller;
mod state;

use thiserror::Error;

use crate::audio::AudioError;
use crate::backend::BackendError;
use crate::playback::PlaybackError;

pub use controller::Session;
pub use state::{DEFAULT_TEXT, Mode, SessionState};

/// Errors surfaced to the user by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please enter some text")]
    EmptyText,

    #[error("Please select a voice")]
    NoVoiceSelected,

    #[error("Please upload a voice sample")]
    NoReferenceFile,

    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    #[error("A generation is already in progress")]
    Busy,

    #[error("No audio generated yet")]
    NoAudio,

    #[error("Failed to generate audio: {0}")]
    GenerationFailed(#[from] BackendError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

impl SessionError {
    /// Whether the error was raised before any backend call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SessionError::EmptyText
                | SessionError::NoVoiceSelected
                | SessionError::NoReferenceFile
                | SessionError::UnknownVoice(_)
        )
    }
}
