// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timecodes and half-open scheduling windows.

use crate::error::TrackError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Elapsed time in a track-local unit (milliseconds in the player)
pub type Timecode = u64;

/// Half-open activity window `[start, start + duration)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct Window {
    start: Timecode,
    duration: Timecode,
}

impl Window {
    /// Create a window, rejecting one whose end does not fit in a `Timecode`
    pub fn new(start: Timecode, duration: Timecode) -> Result<Self, TrackError> {
        if start.checked_add(duration).is_none() {
            return Err(TrackError::WindowOverflow { start, duration });
        }
        Ok(Self { start, duration })
    }

    /// First timecode inside the window
    pub fn start(&self) -> Timecode {
        self.start
    }

    /// Length of the window
    pub fn duration(&self) -> Timecode {
        self.duration
    }

    /// First timecode past the window (exclusive bound)
    pub fn end(&self) -> Timecode {
        // Checked in `new`.
        self.start + self.duration
    }

    /// A zero-length window matches no timecode and never activates
    pub fn is_degenerate(&self) -> bool {
        self.duration == 0
    }

    /// Whether `timecode` lies in `[start, end)`
    pub fn contains(&self, timecode: Timecode) -> bool {
        self.start <= timecode && timecode < self.end()
    }

    /// Whether two windows share at least one timecode
    pub fn overlaps(&self, other: &Window) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.start < other.end() && other.start < self.end()
    }
}

#[derive(Deserialize)]
struct RawWindow {
    start: Timecode,
    duration: Timecode,
}

impl TryFrom<RawWindow> for Window {
    type Error = TrackError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.duration)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
