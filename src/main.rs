//! chatterbox CLI entry point.

mod interactive;

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chatterbox_cli::backend::{Backend, HttpBackend, create_backend};
use chatterbox_cli::cli::{Args, Command, OutputArgs};
use chatterbox_cli::config::{ClientConfig, ConfigStore};
use chatterbox_cli::playback::default_factory;
use chatterbox_cli::session::{Mode, Session};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::interactive::InteractiveShell;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let store = match &args.config {
        Some(path) => ConfigStore::with_path(path.clone()),
        None => ConfigStore::new(),
    };
    let config = store
        .load()
        .with_context(|| format!("Failed to load config: {}", store.path().display()))?
        .with_api_url(args.api_url.as_deref())
        .context("Invalid backend address")?;

    info!(api_url = %config.api_url, "Using backend");

    let command = args.command();
    if let Command::Config { init } = command {
        return show_config(&store, &config, init);
    }

    let backend = create_backend(&config.api_url).context("Failed to create HTTP client")?;

    match command {
        Command::Voices => list_voices(&backend),
        Command::Health => health(&backend),
        Command::Generate { voice, output } => {
            generate_preset(&config, backend, voice.as_deref(), &output)
        }
        Command::Clone { reference, output } => {
            generate_clone(&config, backend, &reference, &output)
        }
        Command::Shell => InteractiveShell::new(&config, backend).run(),
        Command::Config { .. } => Ok(()),
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::fmt;

    let default_directive = if verbose {
        "chatterbox_cli=debug,chatterbox=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
        .with(filter)
        .init();
}

fn show_config(store: &ConfigStore, config: &ClientConfig, init: bool) -> Result<()> {
    if init {
        store
            .save(config)
            .with_context(|| format!("Failed to write config: {}", store.path().display()))?;
        println!("Config written to: {}", store.path().display());
    } else {
        println!("Config file: {}", store.path().display());
    }

    println!("  API URL: {}", config.api_url);
    println!("  Default text: {}", config.default_text);
    println!("  Output: {}", config.output.display());
    match &config.player {
        Some(player) => println!("  Player: {player}"),
        None => println!("  Player: (build default)"),
    }

    Ok(())
}

fn list_voices(backend: &HttpBackend) -> Result<()> {
    let voices = backend.list_voices();

    if voices.is_empty() {
        println!("No voices found. Please check backend.");
        return Ok(());
    }

    println!("Available voices:");
    for voice in voices {
        println!("  {voice}");
    }

    Ok(())
}

fn health(backend: &HttpBackend) -> Result<()> {
    let status = backend
        .health()
        .with_context(|| format!("Backend at {} is unreachable", backend.base_url()))?;

    if status.is_ready() {
        println!("ONLINE");
    } else {
        println!("Backend status: {}", status.status);
    }
    if let Some(device) = &status.device {
        println!("  Device: {device}");
    }

    Ok(())
}

fn new_session(
    config: &ClientConfig,
    backend: HttpBackend,
    output: &OutputArgs,
) -> Session<HttpBackend> {
    let text = output.text.clone().unwrap_or_else(|| config.default_text.clone());
    Session::new(backend, default_factory(config.player.as_deref()), text)
}

fn generate_preset(
    config: &ClientConfig,
    backend: HttpBackend,
    voice: Option<&str>,
    output: &OutputArgs,
) -> Result<()> {
    let mut session = new_session(config, backend, output);

    if session.load_voices().is_empty() {
        bail!("No voices found. Please check backend.");
    }
    if let Some(voice) = voice {
        session.select_voice(voice).with_context(|| {
            format!("Available voices: {}", session.state().voices().join(", "))
        })?;
    }

    if let Some(voice) = session.state().selected_voice() {
        println!("Using voice: {voice}");
    }
    finish_generation(config, &mut session, output)
}

fn generate_clone(
    config: &ClientConfig,
    backend: HttpBackend,
    reference: &Path,
    output: &OutputArgs,
) -> Result<()> {
    let mut session = new_session(config, backend, output);
    session.switch_mode(Mode::Clone);

    let sample = session
        .select_file(reference)
        .context("Failed to load reference audio")?;
    println!("Cloning voice from: {} ({} bytes)", sample.name, sample.bytes.len());

    finish_generation(config, &mut session, output)
}

fn finish_generation(
    config: &ClientConfig,
    session: &mut Session<HttpBackend>,
    output: &OutputArgs,
) -> Result<()> {
    println!("Generating speech...");
    let handle = session.generate()?;
    if let Some(info) = handle.info() {
        println!("  Duration: {:.2}s ({} Hz)", info.duration_secs, info.sample_rate);
    }

    let target = output.output.as_deref().unwrap_or(&config.output);
    let written = session.download(target)?;
    println!("Audio saved to: {}", target.display());
    println!("  Size: {written} bytes");

    if output.play {
        session.toggle_playback()?;
        while session.poll_playback() {
            thread::sleep(Duration::from_millis(100));
        }
    }

    Ok(())
}
