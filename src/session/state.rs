//! Session state held for the lifetime of one interactive session.

use std::fmt;

use crate::audio::{AudioHandle, ReferenceAudio};

/// Sample sentence the input text starts with.
pub const DEFAULT_TEXT: &str = "Hello! This is a test for the chatterbox text to speech model.";

/// Which generation path `generate` takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Synthesize with a backend preset voice.
    #[default]
    Preset,
    /// Synthesize in the voice of an uploaded sample.
    Clone,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Preset => "preset",
            Mode::Clone => "clone",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "preset" => Some(Mode::Preset),
            "clone" => Some(Mode::Clone),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the session tracks.
///
/// Fields are only mutated through [`super::Session`], which keeps the
/// audio handle and the playback flag in step.
#[derive(Debug)]
pub struct SessionState {
    pub(super) text: String,
    pub(super) mode: Mode,
    pub(super) voices: Vec<String>,
    pub(super) selected_voice: Option<String>,
    pub(super) reference: Option<ReferenceAudio>,
    pub(super) loading_voices: bool,
    pub(super) generating: bool,
    pub(super) audio: Option<AudioHandle>,
    pub(super) playing: bool,
}

impl SessionState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: Mode::default(),
            voices: Vec::new(),
            selected_voice: None,
            reference: None,
            loading_voices: false,
            generating: false,
            audio: None,
            playing: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn voices(&self) -> &[String] {
        &self.voices
    }

    pub fn selected_voice(&self) -> Option<&str> {
        self.selected_voice.as_deref()
    }

    pub fn reference(&self) -> Option<&ReferenceAudio> {
        self.reference.as_ref()
    }

    pub fn is_loading_voices(&self) -> bool {
        self.loading_voices
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn audio(&self) -> Option<&AudioHandle> {
        self.audio.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT)
    }
}
