//! Interactive session shell.

use std::path::PathBuf;

use anyhow::Result;
use chatterbox_cli::backend::HttpBackend;
use chatterbox_cli::cli::{SHELL_HELP, ShellCommand};
use chatterbox_cli::config::ClientConfig;
use chatterbox_cli::playback::default_factory;
use chatterbox_cli::session::{Mode, Session};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub struct InteractiveShell {
    session: Session<HttpBackend>,
    default_output: PathBuf,
}

impl InteractiveShell {
    pub fn new(config: &ClientConfig, backend: HttpBackend) -> Self {
        let session = Session::new(
            backend,
            default_factory(config.player.as_deref()),
            config.default_text.clone(),
        );

        Self {
            session,
            default_output: config.output.clone(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        println!("Chatterbox TTS/Voice Cloning ({})", self.session.backend().base_url());
        println!("Type 'help' for commands, 'quit' to exit");
        self.load_voices();

        loop {
            self.session.poll_playback();

            let prompt = format!("{}> ", self.session.state().mode());
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            if !line.trim().is_empty() {
                let _ = rl.add_history_entry(line.as_str());
            }

            match ShellCommand::parse(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.dispatch(command),
                Err(e) => eprintln!("{e}"),
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::Text(text) => self.session.set_text(text),
            ShellCommand::Mode(mode) => {
                self.session.switch_mode(mode);
                println!("Mode: {mode}");
            }
            ShellCommand::Voices => self.load_voices(),
            ShellCommand::Voice(voice) => match self.session.select_voice(&voice) {
                Ok(()) => println!("Selected voice: {voice}"),
                Err(e) => eprintln!("{e}"),
            },
            ShellCommand::File(Some(path)) => match self.session.select_file(&path) {
                Ok(reference) => println!("Reference audio: {}", reference.name),
                Err(e) => eprintln!("{e}"),
            },
            ShellCommand::File(None) => {
                self.session.clear_file();
                println!("Reference audio cleared");
            }
            ShellCommand::Generate => self.generate(),
            ShellCommand::Play => match self.session.toggle_playback() {
                Ok(true) => println!("Playing"),
                Ok(false) if self.session.state().audio().is_none() => {
                    println!("Nothing to play yet")
                }
                Ok(false) => println!("Paused"),
                Err(e) => eprintln!("{e}"),
            },
            ShellCommand::Save(path) => {
                let target = path.unwrap_or_else(|| self.default_output.clone());
                match self.session.download(&target) {
                    Ok(bytes) => println!("Audio saved to: {} ({bytes} bytes)", target.display()),
                    Err(e) => eprintln!("{e}"),
                }
            }
            ShellCommand::Status => self.print_status(),
            ShellCommand::Help => println!("{SHELL_HELP}"),
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
    }

    fn load_voices(&mut self) {
        println!("Loading library...");
        let voices = self.session.load_voices();
        if voices.is_empty() {
            println!("No voices found. Please check backend.");
        } else {
            println!("Voices: {}", voices.join(", "));
        }
    }

    fn generate(&mut self) {
        println!("PROCESSING...");
        match self.session.generate() {
            Ok(handle) => {
                print!("Audio ready ({} bytes", handle.len());
                if let Some(info) = handle.info() {
                    print!(", {:.2}s", info.duration_secs);
                }
                println!("). Type 'play' to listen or 'save' to download");
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    fn print_status(&mut self) {
        let playing = self.session.poll_playback();
        let state = self.session.state();

        println!("Mode: {}", state.mode());
        println!("Text: {}", state.text());
        match state.mode() {
            Mode::Preset => {
                for voice in state.voices() {
                    let marker = if Some(voice.as_str()) == state.selected_voice() {
                        "*"
                    } else {
                        " "
                    };
                    println!("  {marker} {voice}");
                }
            }
            Mode::Clone => match state.reference() {
                Some(reference) => println!("Reference audio: {}", reference.name),
                None => println!("Reference audio: (none)"),
            },
        }
        match state.audio() {
            Some(audio) => {
                println!(
                    "Audio: {} bytes, {} (generated {})",
                    audio.len(),
                    audio.content_type(),
                    audio.created_at().format("%H:%M:%S")
                );
                println!("  {}", if playing { "Playing" } else { "Stopped" });
            }
            None => println!("Audio: (none)"),
        }
    }
}
