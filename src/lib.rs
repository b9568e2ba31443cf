//! chatterbox-cli: terminal client for the Chatterbox TTS backend.
//!
//! This crate talks to a text-to-speech server over HTTP to synthesize
//! speech with preset voices or to clone a voice from a reference sample,
//! then plays back or saves the returned audio.

pub mod audio;
pub mod backend;
pub mod cli;
pub mod config;
pub mod playback;
pub mod session;
