//! Playback through an external command-line audio player.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

use crate::audio::AudioHandle;

use super::{PlaybackError, Player, PlayerFactory};

/// Player program used when none is configured.
pub fn default_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "aplay"
    }
}

/// Plays one audio file by spawning an external program.
///
/// External players cannot be suspended portably, so pausing stops the
/// child and the next `play` starts again from the beginning.
pub struct CommandPlayer {
    program: String,
    path: PathBuf,
    child: Option<Child>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, path: &Path) -> Self {
        Self {
            program: program.into(),
            path: path.to_path_buf(),
            child: None,
        }
    }

    fn stop_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!("Player already exited: {e}");
            }
            let _ = child.wait();
        }
    }
}

impl Player for CommandPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.stop_child();

        let child = Command::new(&self.program)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PlaybackError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!(program = %self.program, pid = child.id(), "Started playback");
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.stop_child();
        Ok(())
    }

    fn is_finished(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    warn!(program = %self.program, %status, "Player exited with failure");
                }
                self.child = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to poll player: {e}");
                self.child = None;
                true
            }
        }
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        self.stop_child();
    }
}

/// Builds [`CommandPlayer`]s for a configured program.
#[derive(Debug, Clone)]
pub struct CommandPlayerFactory {
    program: String,
}

impl CommandPlayerFactory {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandPlayerFactory {
    fn default() -> Self {
        Self::new(default_program())
    }
}

impl PlayerFactory for CommandPlayerFactory {
    fn open(&self, handle: &AudioHandle) -> Result<Box<dyn Player>, PlaybackError> {
        Ok(Box::new(CommandPlayer::new(self.program.clone(), handle.path())))
    }
}
