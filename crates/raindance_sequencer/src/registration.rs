// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registrations: a sequence bound to a window on a track.

use crate::sequence::SequenceHandle;
use crate::timecode::Window;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub Uuid);

impl RegistrationId {
    /// Create a new random registration ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a registration.
///
/// Moves only `Pending -> Active -> Finished`. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Window not reached yet
    #[default]
    Pending,
    /// Started, receiving `play`
    Active,
    /// Stopped (or failed); never reactivates
    Finished,
}

impl LifecycleState {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Finished => "FINISHED",
        }
    }

    /// Check if no further callbacks can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// A track-owned record binding a sequence to a window
pub struct Registration {
    pub(crate) sequence: SequenceHandle,
    pub(crate) label: String,
    pub(crate) window: Window,
    pub(crate) state: LifecycleState,
    pub(crate) plays: u64,
}

impl Registration {
    pub(crate) fn new(sequence: SequenceHandle, window: Window) -> Self {
        let label = sequence.lock().name().to_owned();
        Self {
            sequence,
            label,
            window,
            state: LifecycleState::Pending,
            plays: 0,
        }
    }

    /// Sequence name captured at insertion
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Scheduled window
    pub fn window(&self) -> Window {
        self.window
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Number of `play` callbacks delivered so far
    pub fn plays(&self) -> u64 {
        self.plays
    }

    /// The scheduled sequence
    pub fn sequence(&self) -> &SequenceHandle {
        &self.sequence
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("label", &self.label)
            .field("window", &self.window)
            .field("state", &self.state)
            .field("plays", &self.plays)
            .finish_non_exhaustive()
    }
}
