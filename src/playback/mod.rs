//! Audio playback for generated clips.
//!
//! A [`PlayerFactory`] binds a [`Player`] to one [`AudioHandle`]. The
//! session creates the player lazily on the first play request and drops
//! it whenever the handle is replaced.

mod command;
#[cfg(feature = "playback")]
mod rodio_player;

use thiserror::Error;

use crate::audio::AudioHandle;

pub use command::{CommandPlayer, CommandPlayerFactory, default_program};
#[cfg(feature = "playback")]
pub use rodio_player::{RodioPlayer, RodioPlayerFactory};

/// Errors that can occur during playback.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to start player '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A player bound to a single audio source.
#[cfg_attr(test, mockall::automock)]
pub trait Player {
    /// Start or resume playback.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback.
    fn pause(&mut self) -> Result<(), PlaybackError>;

    /// Whether playback started and has since reached the end.
    fn is_finished(&mut self) -> bool;
}

/// Creates players for audio handles.
#[cfg_attr(test, mockall::automock)]
pub trait PlayerFactory {
    fn open(&self, handle: &AudioHandle) -> Result<Box<dyn Player>, PlaybackError>;
}

/// The player factory for this build: rodio when no program was
/// requested, otherwise an external command.
#[cfg(feature = "playback")]
pub fn default_factory(program: Option<&str>) -> Box<dyn PlayerFactory> {
    match program {
        Some(program) => Box::new(CommandPlayerFactory::new(program)),
        None => Box::new(RodioPlayerFactory),
    }
}

/// The player factory for this build: an external command, falling back
/// to the platform player.
#[cfg(not(feature = "playback"))]
pub fn default_factory(program: Option<&str>) -> Box<dyn PlayerFactory> {
    Box::new(CommandPlayerFactory::new(program.unwrap_or(default_program())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AudioClip;

    fn handle() -> AudioHandle {
        AudioHandle::create(AudioClip::wav(b"RIFF".to_vec())).unwrap()
    }

    #[test]
    fn test_command_player_missing_program() {
        let handle = handle();
        let mut player = CommandPlayer::new("chatterbox-no-such-player", handle.path());

        let result = player.play();
        assert!(matches!(result.unwrap_err(), PlaybackError::Spawn { .. }));
        assert!(!player.is_finished());
    }

    #[test]
    fn test_command_player_not_finished_before_play() {
        let handle = handle();
        let mut player = CommandPlayer::new("true", handle.path());
        assert!(!player.is_finished());
        assert!(player.pause().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_player_reports_completion() {
        let handle = handle();
        let mut player = CommandPlayer::new("true", handle.path());
        player.play().unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !player.is_finished() {
            assert!(std::time::Instant::now() < deadline, "player never finished");
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        // Completion is reported once.
        assert!(!player.is_finished());
    }

    #[test]
    fn test_command_factory_uses_program() {
        let factory = CommandPlayerFactory::new("mpv");
        assert_eq!(factory.program(), "mpv");
        assert!(factory.open(&handle()).is_ok());
    }

    #[test]
    fn test_default_program_is_platform_player() {
        let program = default_program();
        assert!(program == "afplay" || program == "aplay");
    }
}
