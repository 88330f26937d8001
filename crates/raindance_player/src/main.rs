// SPDX-License-Identifier: MIT OR Apache-2.0
//! Raindance scenario player.
//!
//! Drives a sequencer track with a deterministic fixed-step clock and logs
//! every cue callback:
//! - Built-in reference scenario, or a RON scenario file
//! - Overlap report before playback
//! - Per-cue summary after the last tick
//!
//! ## Usage
//!
//! ```text
//! raindance_player [SCENARIO.ron]
//! raindance_player --write-default SCENARIO.ron
//! ```

mod cue;
mod scenario;

use raindance_sequencer::TrackError;
use scenario::Scenario;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Error type for a player invocation
#[derive(Debug, thiserror::Error)]
enum PlayerError {
    /// Scenario file could not be read, parsed or written
    #[error("Scenario error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario describes an invalid track
    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    /// Command line could not be understood
    #[error("Usage: raindance_player [SCENARIO.ron] | --write-default SCENARIO.ron ({0})")]
    Usage(String),
}

/// What the command line asked for
enum Command {
    Run(Option<PathBuf>),
    WriteDefault(PathBuf),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, PlayerError> {
    let command = match args.next() {
        None => Command::Run(None),
        Some(flag) if flag == "--write-default" => match args.next() {
            Some(path) => Command::WriteDefault(PathBuf::from(path)),
            None => return Err(PlayerError::Usage("missing output path".to_owned())),
        },
        Some(flag) if flag.starts_with("--") => {
            return Err(PlayerError::Usage(format!("unknown option {flag}")));
        }
        Some(path) => Command::Run(Some(PathBuf::from(path))),
    };

    if let Some(extra) = args.next() {
        return Err(PlayerError::Usage(format!("unexpected argument {extra}")));
    }
    Ok(command)
}

fn run(command: Command) -> Result<(), PlayerError> {
    let scenario = match command {
        Command::WriteDefault(path) => {
            Scenario::default().save(&path)?;
            return Ok(());
        }
        Command::Run(Some(path)) => Scenario::load(&path)?,
        Command::Run(None) => Scenario::default(),
    };

    let summary = scenario.run()?;
    tracing::info!(
        "Finished \"{}\": {} ticks, {} failures, {} misses",
        scenario.track,
        summary.ticks,
        summary.failures,
        summary.misses()
    );
    for cue in &summary.cues {
        tracing::info!(
            "  {} {}: {} start, {} play, {} stop",
            cue.name,
            cue.window,
            cue.counters.starts,
            cue.counters.plays,
            cue.counters.stops
        );
    }
    tracing::debug!("Final state:\n{}", summary.report);

    Ok(())
}

fn env_filter() -> Result<tracing_subscriber::EnvFilter, tracing_subscriber::filter::ParseError> {
    Ok(tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("raindance_player=debug".parse()?)
        .add_directive("raindance_sequencer=info".parse()?))
}

fn main() {
    let env_filter =
        env_filter().unwrap_or_else(|_| tracing_subscriber::EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Raindance player v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = parse_args(std::env::args().skip(1)).and_then(run) {
        tracing::error!("Player failed: {e}");
        std::process::exit(1);
    }
}
