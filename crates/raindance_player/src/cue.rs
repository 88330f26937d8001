// SPDX-License-Identifier: MIT OR Apache-2.0
//! Logging cues driven by the player.

use raindance_sequencer::{Sequence, SequenceError, Status, Timecode, Window};

/// Callback counters kept by a [`LogCue`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueCounters {
    /// `start` callbacks
    pub starts: u32,
    /// `play` callbacks
    pub plays: u32,
    /// `stop` callbacks
    pub stops: u32,
    /// `play` callbacks delivered outside the cue's own window
    pub misses: u32,
}

/// A cue that logs every lifecycle callback.
///
/// It knows the window it was scheduled with, so each `play` is checked
/// against it and reported as `OK` or `KO`.
#[derive(Debug)]
pub struct LogCue {
    name: String,
    window: Window,
    play_limit: Option<u32>,
    counters: CueCounters,
}

impl LogCue {
    /// Create a cue for `window`, optionally finishing after `play_limit` plays
    pub fn new(name: impl Into<String>, window: Window, play_limit: Option<u32>) -> Self {
        Self {
            name: name.into(),
            window,
            play_limit,
            counters: CueCounters::default(),
        }
    }

    /// Window this cue expects to be played in
    pub fn window(&self) -> Window {
        self.window
    }

    /// Callback counters so far
    pub fn counters(&self) -> CueCounters {
        self.counters
    }
}

impl Sequence for LogCue {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, timecode: Timecode) -> Result<(), SequenceError> {
        self.counters.starts += 1;
        tracing::info!("{timecode} > {} START", self.name);
        Ok(())
    }

    fn play(&mut self, timecode: Timecode) -> Result<Status, SequenceError> {
        self.counters.plays += 1;
        if self.window.contains(timecode) {
            tracing::info!("{timecode} > {} PLAY -- OK", self.name);
        } else {
            self.counters.misses += 1;
            tracing::warn!("{timecode} > {} PLAY -- KO", self.name);
        }

        match self.play_limit {
            Some(limit) if self.counters.plays >= limit => Ok(Status::Done),
            _ => Ok(Status::Live),
        }
    }

    fn stop(&mut self, timecode: Timecode) -> Result<(), SequenceError> {
        self.counters.stops += 1;
        tracing::info!("{timecode} > {} STOP", self.name);
        Ok(())
    }
}
