//! Audio resources: uploaded reference samples and generated-audio
//! handles.

mod handle;
mod reference;

use std::path::PathBuf;

use thiserror::Error;

pub use handle::{AudioHandle, AudioInfo};
pub use reference::{ReferenceAudio, content_type_for, extension_for};

/// Errors that can occur while handling local audio files.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not an audio file: {0}. Supports WAV & MP3")]
    NotAudio(PathBuf),

    #[error("Failed to save audio to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AudioClip;
    use std::path::Path;
    use tempfile::TempDir;

    fn wav_bytes(sample_rate: u32, samples: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for _ in 0..samples {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    // ===========================================
    // ReferenceAudio tests
    // ===========================================

    #[test]
    fn test_reference_load_wav() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("me.wav");
        std::fs::write(&path, b"RIFF fake").unwrap();

        let reference = ReferenceAudio::load(&path).unwrap();
        assert_eq!(reference.name, "me.wav");
        assert_eq!(reference.content_type, "audio/wav");
        assert_eq!(reference.bytes, b"RIFF fake");
    }

    #[test]
    fn test_reference_load_mp3_uppercase_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.MP3");
        std::fs::write(&path, b"ID3").unwrap();

        let reference = ReferenceAudio::load(&path).unwrap();
        assert_eq!(reference.content_type, "audio/mpeg");
    }

    #[test]
    fn test_reference_load_missing_file() {
        let result = ReferenceAudio::load(Path::new("/nonexistent/me.wav"));
        assert!(matches!(result.unwrap_err(), AudioError::FileNotFound(_)));
    }

    #[test]
    fn test_reference_load_rejects_non_audio() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let result = ReferenceAudio::load(&path);
        assert!(matches!(result.unwrap_err(), AudioError::NotAudio(_)));
    }

    #[test]
    fn test_extension_for_content_types() {
        assert_eq!(extension_for("audio/wav"), ".wav");
        assert_eq!(extension_for("audio/mpeg"), ".mp3");
        assert_eq!(extension_for("audio/ogg; codecs=opus"), ".ogg");
        assert_eq!(extension_for("application/octet-stream"), ".wav");
    }

    // ===========================================
    // AudioHandle tests
    // ===========================================

    #[test]
    fn test_handle_probes_wav_info() {
        let handle = AudioHandle::create(AudioClip::wav(wav_bytes(24_000, 12_000))).unwrap();

        let info = handle.info().unwrap();
        assert_eq!(info.sample_rate, 24_000);
        assert_eq!(info.channels, 1);
        assert!((info.duration_secs - 0.5).abs() < f32::EPSILON);
        assert_eq!(handle.content_type(), "audio/wav");
        assert!(handle.path().to_string_lossy().ends_with(".wav"));
    }

    #[test]
    fn test_handle_non_wav_has_no_info() {
        let clip = AudioClip::new(b"ID3data".to_vec(), "audio/mpeg");
        let handle = AudioHandle::create(clip).unwrap();
        assert!(handle.info().is_none());
        assert_eq!(handle.len(), 7);
        assert!(handle.path().to_string_lossy().ends_with(".mp3"));
    }

    #[test]
    fn test_handle_save_to_copies_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("chatterbox-output.wav");
        let bytes = wav_bytes(16_000, 160);

        let handle = AudioHandle::create(AudioClip::wav(bytes.clone())).unwrap();
        let written = handle.save_to(&target).unwrap();

        assert_eq!(written as usize, bytes.len());
        assert_eq!(std::fs::read(&target).unwrap(), bytes);
    }

    #[test]
    fn test_handle_save_to_missing_directory() {
        let handle = AudioHandle::create(AudioClip::wav(b"RIFF".to_vec())).unwrap();
        let result = handle.save_to(Path::new("/nonexistent/dir/out.wav"));
        assert!(matches!(result.unwrap_err(), AudioError::Save { .. }));
    }

    #[test]
    fn test_handle_drop_deletes_file() {
        let handle = AudioHandle::create(AudioClip::wav(b"RIFF".to_vec())).unwrap();
        let path = handle.path().to_path_buf();
        assert!(path.exists());

        drop(handle);
        assert!(!path.exists());
    }

    #[test]
    fn test_handle_release_deletes_file() {
        let handle = AudioHandle::create(AudioClip::wav(b"RIFF".to_vec())).unwrap();
        let path = handle.path().to_path_buf();

        handle.release().unwrap();
        assert!(!path.exists());
    }
}
