//! Reference audio samples uploaded for voice cloning.

use std::path::Path;

use super::AudioError;

/// Extensions accepted as reference audio, with their content types.
const AUDIO_TYPES: &[(&str, &str)] = &[
    ("wav", "audio/wav"),
    ("mp3", "audio/mpeg"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("m4a", "audio/mp4"),
    ("webm", "audio/webm"),
];

/// A user-selected audio sample held in memory for one clone request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceAudio {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ReferenceAudio {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Load a reference sample from disk.
    ///
    /// The content type is derived from the file extension; files that are
    /// not recognizably audio are rejected.
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        if !path.is_file() {
            return Err(AudioError::FileNotFound(path.to_path_buf()));
        }

        let content_type = content_type_for(path)
            .ok_or_else(|| AudioError::NotAudio(path.to_path_buf()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("reference.wav")
            .to_string();

        let bytes = std::fs::read(path)?;

        Ok(Self::new(name, content_type, bytes))
    }
}

/// Content type for an audio file path, if the extension is known.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    AUDIO_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
}

/// File extension (with leading dot) for an audio content type.
pub fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "audio/mpeg" | "audio/mp3" => ".mp3",
        "audio/flac" => ".flac",
        "audio/ogg" => ".ogg",
        "audio/mp4" => ".m4a",
        "audio/webm" => ".webm",
        _ => ".wav",
    }
}
