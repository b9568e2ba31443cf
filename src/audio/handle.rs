//! Locally owned handles to generated audio.

use std::io::{Cursor, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::backend::AudioClip;

use super::AudioError;
use super::reference::extension_for;

/// Format details of a WAV payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f32,
}

impl AudioInfo {
    /// Inspect `bytes` as WAV. Returns `None` for other formats.
    pub fn probe(bytes: &[u8]) -> Option<Self> {
        let reader = hound::WavReader::new(Cursor::new(bytes)).ok()?;
        let spec = reader.spec();
        if spec.sample_rate == 0 {
            return None;
        }

        Some(Self {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            duration_secs: reader.duration() as f32 / spec.sample_rate as f32,
        })
    }
}

/// A generated audio payload backed by a private temporary file.
///
/// The file path is usable as a playback source or download origin for as
/// long as the handle lives. Dropping the handle deletes the file.
#[derive(Debug)]
pub struct AudioHandle {
    file: NamedTempFile,
    content_type: String,
    len: usize,
    info: Option<AudioInfo>,
    created_at: DateTime<Utc>,
}

impl AudioHandle {
    /// Spill a clip to disk and wrap it in a handle.
    pub fn create(clip: AudioClip) -> Result<Self, AudioError> {
        let mut file = tempfile::Builder::new()
            .prefix("chatterbox-")
            .suffix(extension_for(&clip.content_type))
            .tempfile()?;

        file.write_all(&clip.bytes)?;
        file.flush()?;

        let handle = Self {
            content_type: clip.content_type,
            len: clip.bytes.len(),
            info: AudioInfo::probe(&clip.bytes),
            created_at: Utc::now(),
            file,
        };

        debug!(path = %handle.path().display(), bytes = handle.len, "Created audio handle");
        Ok(handle)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn info(&self) -> Option<AudioInfo> {
        self.info
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy the audio to `target` (the download operation).
    pub fn save_to(&self, target: &Path) -> Result<u64, AudioError> {
        let written = std::fs::copy(self.path(), target).map_err(|source| AudioError::Save {
            path: target.to_path_buf(),
            source,
        })?;
        Ok(written)
    }

    /// Release the backing file now rather than on drop.
    pub fn release(self) -> Result<(), AudioError> {
        debug!(path = %self.path().display(), "Releasing audio handle");
        self.file.close()?;
        Ok(())
    }
}
