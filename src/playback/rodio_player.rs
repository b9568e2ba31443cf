//! In-process playback with rodio.
//!
//! rodio's `OutputStream` is `!Send`, so a `RodioPlayer` must stay on the
//! thread that opened it.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::audio::AudioHandle;

use super::{PlaybackError, Player, PlayerFactory};

pub struct RodioPlayer {
    path: PathBuf,
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    sink: Sink,
    started: bool,
}

impl RodioPlayer {
    pub fn open(path: &Path) -> Result<Self, PlaybackError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::Unavailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Unavailable(e.to_string()))?;
        sink.pause();

        let player = Self {
            path: path.to_path_buf(),
            _stream: stream,
            _handle: handle,
            sink,
            started: false,
        };
        player.enqueue()?;
        Ok(player)
    }

    fn enqueue(&self) -> Result<(), PlaybackError> {
        let file = File::open(&self.path)?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode(e.to_string()))?;
        self.sink.append(source);
        Ok(())
    }
}

impl Player for RodioPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        // A finished sink has nothing queued; start the clip over.
        if self.started && self.sink.empty() {
            self.enqueue()?;
        }
        self.started = true;
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.sink.pause();
        Ok(())
    }

    fn is_finished(&mut self) -> bool {
        self.started && self.sink.empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RodioPlayerFactory;

impl PlayerFactory for RodioPlayerFactory {
    fn open(&self, handle: &AudioHandle) -> Result<Box<dyn Player>, PlaybackError> {
        Ok(Box::new(RodioPlayer::open(handle.path())?))
    }
}
