// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scenario files and the fixed-step run loop.
//!
//! A scenario describes one track:
//! - Track name
//! - Cues with their windows (and optional early-finish limits)
//! - The clock that drives playback (start, inclusive end, step)

use crate::cue::{CueCounters, LogCue};
use parking_lot::Mutex;
use raindance_sequencer::{
    Sequence, SequenceHandle, Timecode, Track, TrackError, TrackReport, Window,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Current scenario format version
pub const SCENARIO_FORMAT_VERSION: u32 = 1;

/// Shared handle to a cue, kept by the player for inspection after a run
pub type CueHandle = Arc<Mutex<LogCue>>;

/// Deterministic clock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    /// First timecode
    pub start: Timecode,
    /// Last timecode (inclusive)
    pub end: Timecode,
    /// Advance per tick
    pub step: Timecode,
}

impl ClockSettings {
    /// Every timecode the clock produces
    pub fn timecodes(&self) -> impl Iterator<Item = Timecode> {
        let step = usize::try_from(self.step).unwrap_or(usize::MAX).max(1);
        (self.start..=self.end).step_by(step)
    }

    fn validate(&self) -> std::io::Result<()> {
        if self.step == 0 {
            return Err(invalid_data("Clock step must be greater than zero".to_owned()));
        }
        if self.start > self.end {
            return Err(invalid_data(format!(
                "Clock start {} is after its end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            start: 0,
            end: 5000,
            step: 200,
        }
    }
}

/// A cue on the scenario's track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSettings {
    /// Cue name
    pub name: String,
    /// Window start
    pub start: Timecode,
    /// Window length
    pub duration: Timecode,
    /// Finish early after this many plays
    #[serde(default)]
    pub play_limit: Option<u32>,
}

impl CueSettings {
    /// Create a cue without a play limit
    pub fn new(name: impl Into<String>, start: Timecode, duration: Timecode) -> Self {
        Self {
            name: name.into(),
            start,
            duration,
            play_limit: None,
        }
    }
}

/// A complete scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Format version
    pub version: u32,
    /// Track name
    pub track: String,
    /// Clock driving the run
    pub clock: ClockSettings,
    /// Cues in insertion order
    pub cues: Vec<CueSettings>,
}

impl Default for Scenario {
    fn default() -> Self {
        let cues = [
            ("A", 0, 1000),
            ("B", 1000, 1000),
            ("C", 2000, 500),
            ("D", 1500, 2000),
            ("E", 1400, 3000),
            ("F", 3000, 100),
            ("G", 1500, 100),
            ("H", 1500, 500),
        ]
        .into_iter()
        .map(|(name, start, duration)| CueSettings::new(name, start, duration))
        .collect();

        Self {
            version: SCENARIO_FORMAT_VERSION,
            track: "test".to_owned(),
            clock: ClockSettings::default(),
            cues,
        }
    }
}

/// Outcome of one cue after a run
#[derive(Debug, Clone)]
pub struct CueSummary {
    /// Cue name
    pub name: String,
    /// Scheduled window
    pub window: Window,
    /// Callback counters
    pub counters: CueCounters,
}

/// Outcome of a scenario run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of `play` calls made on the track
    pub ticks: u64,
    /// Callback failures reported by the track
    pub failures: usize,
    /// Per-cue counters, in insertion order
    pub cues: Vec<CueSummary>,
    /// Track report after the last tick
    pub report: TrackReport,
}

impl RunSummary {
    /// Total plays delivered outside a cue's own window
    pub fn misses(&self) -> u32 {
        self.cues.iter().map(|c| c.counters.misses).sum()
    }
}

impl Scenario {
    /// Parse a scenario from RON text
    pub fn from_ron(content: &str) -> std::io::Result<Self> {
        let scenario: Scenario =
            ron::from_str(content).map_err(|e| invalid_data(e.to_string()))?;

        if scenario.version > SCENARIO_FORMAT_VERSION {
            return Err(invalid_data(format!(
                "Scenario version {} is newer than supported version {}",
                scenario.version, SCENARIO_FORMAT_VERSION
            )));
        }
        scenario.clock.validate()?;

        Ok(scenario)
    }

    /// Serialize the scenario to pretty RON
    pub fn to_ron(&self) -> std::io::Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        ron::ser::to_string_pretty(self, config).map_err(|e| invalid_data(e.to_string()))
    }

    /// Load a scenario from a file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario = Self::from_ron(&content)?;
        tracing::info!("Loaded scenario \"{}\" from {:?}", scenario.track, path);
        Ok(scenario)
    }

    /// Save the scenario to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        tracing::info!("Saved scenario \"{}\" to {:?}", self.track, path);
        Ok(())
    }

    /// Build the track, returning it with the cue handles in insertion order
    pub fn build_track(&self) -> Result<(Track, Vec<CueHandle>), TrackError> {
        let mut track = Track::new(self.track.clone());
        let mut cues = Vec::with_capacity(self.cues.len());

        for settings in &self.cues {
            let window = Window::new(settings.start, settings.duration)?;
            let cue: CueHandle = Arc::new(Mutex::new(LogCue::new(
                settings.name.clone(),
                window,
                settings.play_limit,
            )));
            let sequence: SequenceHandle = cue.clone();
            track.insert_window(sequence, window);
            cues.push(cue);
        }

        Ok((track, cues))
    }

    /// Drive the track over every clock timecode
    pub fn run(&self) -> Result<RunSummary, TrackError> {
        let (mut track, cues) = self.build_track()?;
        tracing::info!("Overlaps before playback:\n{}", track.dump());

        let mut ticks = 0;
        let mut failures = 0;
        for timecode in self.clock.timecodes() {
            tracing::debug!("--- Timecode {timecode}");
            if let Err(err) = track.play(timecode) {
                tracing::warn!("{err}");
                failures += err.failures.len();
            }
            ticks += 1;
        }

        let cues = cues
            .iter()
            .map(|cue| {
                let cue = cue.lock();
                CueSummary {
                    name: cue.name().to_owned(),
                    window: cue.window(),
                    counters: cue.counters(),
                }
            })
            .collect();

        Ok(RunSummary {
            ticks,
            failures,
            cues,
            report: track.dump(),
        })
    }
}

fn invalid_data(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, message)
}
