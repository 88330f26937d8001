// SPDX-License-Identifier: MIT OR Apache-2.0
//! Schedulable units of behavior.
//!
//! A [`Sequence`] carries no timing of its own. It is bound to a window
//! when it is inserted into a [`Track`](crate::Track), and the track
//! drives its `start`/`play`/`stop` hooks as the timecode advances.

use crate::timecode::Timecode;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of a `play` callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// Keep running until the window closes
    #[default]
    Live,
    /// Finish early; the track calls `stop` right away
    Done,
}

/// Lifecycle callback, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hook {
    /// `Sequence::start`
    Start,
    /// `Sequence::play`
    Play,
    /// `Sequence::stop`
    Stop,
}

impl Hook {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Play => "PLAY",
            Self::Stop => "STOP",
        }
    }
}

/// Error returned from a sequence callback
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// Free-form failure
    #[error("{0}")]
    Custom(String),

    /// Failure from an underlying collaborator
    #[error("{0}")]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A unit of scheduled behavior with start/play/stop hooks.
///
/// Implementations must not mutate the track that is calling them; the
/// track is mutably borrowed for the whole of `Track::play`, so this is
/// enforced by the borrow checker.
pub trait Sequence: Send {
    /// Label used in logs and reports
    fn name(&self) -> &str;

    /// Called once, the first time the timecode falls inside the window
    fn start(&mut self, timecode: Timecode) -> Result<(), SequenceError> {
        let _ = timecode;
        Ok(())
    }

    /// Called once per `Track::play` while the window is active
    fn play(&mut self, timecode: Timecode) -> Result<Status, SequenceError>;

    /// Called once, when the window is left or `play` returned `Done`
    fn stop(&mut self, timecode: Timecode) -> Result<(), SequenceError> {
        let _ = timecode;
        Ok(())
    }
}

/// Shared handle to a sequence.
///
/// The caller keeps its own clone, so the sequence outlives (or is
/// inspected independently of) every registration that refers to it.
pub type SequenceHandle = Arc<Mutex<dyn Sequence>>;

/// Wrap a sequence in a [`SequenceHandle`]
pub fn handle<S: Sequence + 'static>(sequence: S) -> SequenceHandle {
    Arc::new(Mutex::new(sequence))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        plays: u32,
        limit: u32,
    }

    impl Sequence for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn play(&mut self, _timecode: Timecode) -> Result<Status, SequenceError> {
            self.plays += 1;
            if self.plays >= self.limit {
                Ok(Status::Done)
            } else {
                Ok(Status::Live)
            }
        }
    }

    #[test]
    fn test_default_hooks() {
        let mut counter = Counter { plays: 0, limit: 2 };
        assert!(counter.start(0).is_ok());
        assert_eq!(counter.play(0).unwrap(), Status::Live);
        assert_eq!(counter.play(1).unwrap(), Status::Done);
        assert!(counter.stop(1).is_ok());
    }

    #[test]
    fn test_handle_shares_state() {
        let shared = handle(Counter { plays: 0, limit: 10 });
        let other = Arc::clone(&shared);

        other.lock().play(0).unwrap();
        assert_eq!(shared.lock().name(), "counter");
        assert_eq!(Arc::strong_count(&shared), 2);
    }

    #[test]
    fn test_error_display() {
        let err = SequenceError::Custom("shader compile failed".into());
        assert_eq!(err.to_string(), "shader compile failed");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing font");
        let err = SequenceError::from(Box::new(io) as Box<dyn std::error::Error + Send + Sync>);
        assert_eq!(err.to_string(), "missing font");
    }
}
