//! Session controller: one entry point per user operation.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::audio::{AudioHandle, ReferenceAudio};
use crate::backend::{AudioClip, Backend};
use crate::playback::{Player, PlayerFactory};

use super::SessionError;
use super::state::{Mode, SessionState};

/// Drives the backend on behalf of one user and owns every piece of
/// session state, including the current generated-audio handle.
pub struct Session<B: Backend> {
    backend: B,
    players: Box<dyn PlayerFactory>,
    player: Option<Box<dyn Player>>,
    state: SessionState,
}

impl<B: Backend> Session<B> {
    /// Create a session whose input text starts as `text`.
    pub fn new(backend: B, players: Box<dyn PlayerFactory>, text: impl Into<String>) -> Self {
        Self {
            backend,
            players,
            player: None,
            state: SessionState::new(text),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Refresh the preset voice list and select its first entry.
    ///
    /// Backend failures surface only as an empty list; the previous
    /// selection is kept in that case.
    pub fn load_voices(&mut self) -> &[String] {
        self.state.loading_voices = true;

        let voices = self.backend.list_voices();
        if voices.is_empty() {
            warn!("No voices found. Please check backend.");
        } else {
            debug!(count = voices.len(), "Loaded voices");
        }

        if let Some(first) = voices.first() {
            self.state.selected_voice = Some(first.clone());
        }
        self.state.voices = voices;
        self.state.loading_voices = false;

        &self.state.voices
    }

    /// Replace the input text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.text = text.into();
    }

    /// Switch between preset and clone mode. Text, reference file and
    /// current audio are left untouched.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
    }

    /// Select a preset voice from the loaded list.
    pub fn select_voice(&mut self, voice_id: &str) -> Result<(), SessionError> {
        if !self.state.voices.iter().any(|v| v == voice_id) {
            return Err(SessionError::UnknownVoice(voice_id.to_string()));
        }
        self.state.selected_voice = Some(voice_id.to_string());
        Ok(())
    }

    /// Replace the reference sample with the file at `path`.
    ///
    /// On a load error the previous selection is kept.
    pub fn select_file(&mut self, path: &Path) -> Result<&ReferenceAudio, SessionError> {
        let reference = ReferenceAudio::load(path)?;
        debug!(
            file = %reference.name,
            content_type = %reference.content_type,
            "Selected reference audio"
        );
        Ok(self.state.reference.insert(reference))
    }

    /// Drop the reference sample (a cancelled selection).
    pub fn clear_file(&mut self) {
        self.state.reference = None;
    }

    /// Generate speech for the current text in the active mode.
    ///
    /// Any previous audio is released before the request is issued. The
    /// generation flag is cleared on every exit path once set.
    pub fn generate(&mut self) -> Result<&AudioHandle, SessionError> {
        if self.state.generating {
            return Err(SessionError::Busy);
        }
        if self.state.text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }

        self.replace_audio(None);
        self.state.generating = true;

        let result = self
            .request_audio()
            .and_then(|clip| AudioHandle::create(clip).map_err(SessionError::from));

        self.state.generating = false;

        match result {
            Ok(handle) => {
                info!(bytes = handle.len(), mode = %self.state.mode, "Generated audio");
                self.replace_audio(Some(handle));
                self.state.audio.as_ref().ok_or(SessionError::NoAudio)
            }
            Err(e) => {
                warn!("{e}");
                Err(e)
            }
        }
    }

    fn request_audio(&self) -> Result<AudioClip, SessionError> {
        let text = self.state.text.as_str();

        let clip = match self.state.mode {
            Mode::Preset => {
                let voice_id = self
                    .state
                    .selected_voice
                    .as_deref()
                    .ok_or(SessionError::NoVoiceSelected)?;
                self.backend.generate_from_preset(text, voice_id)?
            }
            Mode::Clone => {
                let reference = self
                    .state
                    .reference
                    .as_ref()
                    .ok_or(SessionError::NoReferenceFile)?;
                self.backend.clone_from_sample(reference, text)?
            }
        };

        Ok(clip)
    }

    /// Install `handle` as the current audio.
    ///
    /// The old player is stopped and dropped, the old handle released and
    /// the playback flag reset.
    fn replace_audio(&mut self, handle: Option<AudioHandle>) {
        if let Some(mut player) = self.player.take()
            && self.state.playing
            && let Err(e) = player.pause()
        {
            warn!("Failed to stop playback: {e}");
        }
        self.state.playing = false;

        if let Some(old) = std::mem::replace(&mut self.state.audio, handle)
            && let Err(e) = old.release()
        {
            warn!("Failed to release audio handle: {e}");
        }
    }

    /// Check for end of playback, resetting the playback flag when the
    /// player has finished. Returns the current flag.
    pub fn poll_playback(&mut self) -> bool {
        if self.state.playing
            && let Some(player) = self.player.as_mut()
            && player.is_finished()
        {
            debug!("Playback finished");
            self.state.playing = false;
        }
        self.state.playing
    }

    /// Toggle between play and pause. A no-op without audio.
    ///
    /// Returns the playback flag after the toggle.
    pub fn toggle_playback(&mut self) -> Result<bool, SessionError> {
        if self.state.audio.is_none() {
            return Ok(false);
        }

        self.poll_playback();

        if self.player.is_none() {
            let audio = self.state.audio.as_ref().ok_or(SessionError::NoAudio)?;
            self.player = Some(self.players.open(audio)?);
        }
        let Some(player) = self.player.as_mut() else {
            return Ok(false);
        };

        if self.state.playing {
            player.pause()?;
            self.state.playing = false;
        } else {
            player.play()?;
            self.state.playing = true;
        }

        Ok(self.state.playing)
    }

    /// Save the current audio to `target` (the download operation).
    pub fn download(&self, target: &Path) -> Result<u64, SessionError> {
        let audio = self.state.audio.as_ref().ok_or(SessionError::NoAudio)?;
        let written = audio.save_to(target)?;
        info!(path = %target.display(), bytes = written, "Saved audio");
        Ok(written)
    }
}

impl<B: Backend> Drop for Session<B> {
    fn drop(&mut self) {
        self.replace_audio(None);
    }
}
