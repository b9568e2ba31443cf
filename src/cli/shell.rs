//! Commands accepted by the interactive shell.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::Mode;

/// Help text printed by the `help` command.
pub const SHELL_HELP: &str = "\
Commands:
  text <TEXT>            Replace the input text
  mode preset|clone      Switch generation mode
  voices | refresh       Reload the preset voice list
  voice <ID>             Select a preset voice
  file [PATH]            Select a reference sample (no path clears it)
  generate | g           Generate speech
  play | p               Play or pause the generated audio
  save [PATH]            Save the generated audio
  status                 Show the session state
  help                   Show this help
  quit | exit            Leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Text(String),
    Mode(Mode),
    Voices,
    Voice(String),
    File(Option<PathBuf>),
    Generate,
    Play,
    Save(Option<PathBuf>),
    Status,
    Help,
    Quit,
    /// A blank line.
    Empty,
}

/// Errors that can occur when parsing a shell line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellParseError {
    #[error("Unknown command: {0}. Type 'help' for commands")]
    UnknownCommand(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid mode: {0}. Expected 'preset' or 'clone'")]
    InvalidMode(String),
}

impl ShellCommand {
    /// Parse one line of shell input.
    ///
    /// The first word selects the command; the rest of the line (trimmed)
    /// is its argument, so `text` keeps inner whitespace intact.
    pub fn parse(line: &str) -> Result<Self, ShellParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ShellCommand::Empty);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        match word.to_ascii_lowercase().as_str() {
            "text" => arg
                .map(|t| ShellCommand::Text(t.to_string()))
                .ok_or(ShellParseError::MissingArgument("text")),
            "mode" => {
                let value = arg.ok_or(ShellParseError::MissingArgument("mode"))?;
                Mode::parse(value)
                    .map(ShellCommand::Mode)
                    .ok_or_else(|| ShellParseError::InvalidMode(value.to_string()))
            }
            "voices" | "refresh" => Ok(ShellCommand::Voices),
            "voice" => arg
                .map(|v| ShellCommand::Voice(v.to_string()))
                .ok_or(ShellParseError::MissingArgument("voice")),
            "file" => Ok(ShellCommand::File(arg.map(PathBuf::from))),
            "generate" | "g" => Ok(ShellCommand::Generate),
            "play" | "pause" | "p" => Ok(ShellCommand::Play),
            "save" => Ok(ShellCommand::Save(arg.map(PathBuf::from))),
            "status" => Ok(ShellCommand::Status),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(ShellParseError::UnknownCommand(other.to_string())),
        }
    }
}
