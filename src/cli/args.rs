//! CLI argument definitions and parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Text-to-speech and voice cloning client.
#[derive(Parser, Debug)]
#[command(name = "chatterbox")]
#[command(about = "Text-to-speech and voice cloning client for the Chatterbox backend")]
#[command(version)]
pub struct Args {
    /// Backend base address (default http://localhost:8000)
    #[arg(long, env = "CHATTERBOX_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// The subcommand to run; an interactive shell when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Shell)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List preset voices
    Voices,

    /// Generate speech with a preset voice
    Generate {
        /// Preset voice (defaults to the first voice the backend lists)
        #[arg(long)]
        voice: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate speech in the voice of a reference sample
    Clone {
        /// Reference audio file (WAV or MP3)
        #[arg(short, long)]
        reference: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check backend readiness
    Health,

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },

    /// Interactive session (the default)
    Shell,
}

/// Options shared by the generating subcommands.
#[derive(clap::Args, Debug, Clone, PartialEq, Default)]
pub struct OutputArgs {
    /// Text to synthesize (defaults to the configured sample sentence)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Output audio file (defaults to the configured output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Play the result after saving it
    #[arg(long)]
    pub play: bool,
}
