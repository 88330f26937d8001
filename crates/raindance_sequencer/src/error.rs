// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for scheduling.

use crate::registration::RegistrationId;
use crate::sequence::{Hook, SequenceError};
use crate::timecode::Timecode;

/// Error type for track construction
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// The window end does not fit in a timecode
    #[error("Window [{start}, {start} + {duration}) overflows the timecode range")]
    WindowOverflow {
        /// Requested start
        start: Timecode,
        /// Requested duration
        duration: Timecode,
    },
}

/// A sequence callback that failed during `Track::play`
#[derive(Debug, thiserror::Error)]
#[error("{sequence} failed in {hook:?}: {source}")]
pub struct CallbackFailure {
    /// Registration that was being evaluated
    pub registration: RegistrationId,
    /// Name of the failing sequence
    pub sequence: String,
    /// Lifecycle hook that failed
    pub hook: Hook,
    /// Error returned by the sequence
    #[source]
    pub source: SequenceError,
}

/// Every callback failure from a single `Track::play` pass
#[derive(Debug, thiserror::Error)]
#[error("{} sequence callback(s) failed at timecode {timecode}", .failures.len())]
pub struct PlayError {
    /// Timecode of the failing pass
    pub timecode: Timecode,
    /// Failures in insertion order
    pub failures: Vec<CallbackFailure>,
}
