// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tracks: ordered registrations evaluated against a single timecode.

use crate::error::{CallbackFailure, PlayError, TrackError};
use crate::registration::{LifecycleState, Registration, RegistrationId};
use crate::report::{ReportEntry, TrackReport};
use crate::sequence::{Hook, SequenceError, SequenceHandle, Status};
use crate::timecode::{Timecode, Window};
use indexmap::IndexMap;

/// An ordered set of registrations driven by `play(timecode)`.
///
/// The track keeps no current time between calls. Every `play` walks the
/// registrations once, in insertion order, and fires whichever
/// start/play/stop callbacks the timecode implies for each of them.
#[derive(Debug)]
pub struct Track {
    name: String,
    registrations: IndexMap<RegistrationId, Registration>,
}

impl Track {
    /// Create an empty track
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registrations: IndexMap::new(),
        }
    }

    /// Track name, used in diagnostics only
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if the track has no registrations
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Schedule `sequence` over `[start, start + duration)`.
    ///
    /// Every call creates an independent registration, even for a sequence
    /// or window that is already on the track.
    pub fn insert(
        &mut self,
        sequence: SequenceHandle,
        start: Timecode,
        duration: Timecode,
    ) -> Result<RegistrationId, TrackError> {
        let window = Window::new(start, duration)?;
        Ok(self.insert_window(sequence, window))
    }

    /// Schedule `sequence` over an already validated window
    pub fn insert_window(&mut self, sequence: SequenceHandle, window: Window) -> RegistrationId {
        let id = RegistrationId::new();
        let registration = Registration::new(sequence, window);
        tracing::debug!(
            track = %self.name,
            sequence = %registration.label,
            %window,
            "Inserted registration"
        );
        self.registrations.insert(id, registration);
        id
    }

    /// Remove a registration, keeping the order of the others.
    ///
    /// An active registration is dropped without a `stop` callback.
    pub fn remove(&mut self, id: RegistrationId) -> Option<Registration> {
        self.registrations.shift_remove(&id)
    }

    /// Get a registration
    pub fn registration(&self, id: RegistrationId) -> Option<&Registration> {
        self.registrations.get(&id)
    }

    /// Get the lifecycle state of a registration
    pub fn state(&self, id: RegistrationId) -> Option<LifecycleState> {
        self.registrations.get(&id).map(Registration::state)
    }

    /// All registrations in insertion order
    pub fn registrations(&self) -> impl Iterator<Item = (RegistrationId, &Registration)> {
        self.registrations.iter().map(|(id, r)| (*id, r))
    }

    /// Number of registrations currently active
    pub fn active_count(&self) -> usize {
        self.registrations
            .values()
            .filter(|r| r.state == LifecycleState::Active)
            .count()
    }

    /// Check if no registration can produce another callback
    pub fn is_finished(&self) -> bool {
        self.registrations
            .values()
            .all(|r| r.state.is_terminal() || r.window.is_degenerate())
    }

    /// Evaluate every registration at `timecode`.
    ///
    /// Callback failures do not stop the pass: the failing registration is
    /// finished and the remaining ones are still evaluated. All failures
    /// are returned together once the pass completes.
    pub fn play(&mut self, timecode: Timecode) -> Result<(), PlayError> {
        tracing::trace!(track = %self.name, timecode, "Play");

        let mut failures = Vec::new();
        for (id, registration) in &mut self.registrations {
            evaluate(*id, registration, timecode, &mut failures);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PlayError { timecode, failures })
        }
    }

    /// Build a report of every registration and every overlapping pair
    pub fn dump(&self) -> TrackReport {
        let entries = self
            .registrations
            .iter()
            .map(|(id, r)| ReportEntry {
                id: *id,
                name: r.label.clone(),
                window: r.window,
                state: r.state,
                plays: r.plays,
            })
            .collect();
        TrackReport::new(self.name.clone(), entries)
    }
}

fn evaluate(
    id: RegistrationId,
    registration: &mut Registration,
    timecode: Timecode,
    failures: &mut Vec<CallbackFailure>,
) {
    let in_window = registration.window.contains(timecode);
    if registration.state == LifecycleState::Finished
        || (registration.state == LifecycleState::Pending && !in_window)
    {
        return;
    }

    let mut sequence = registration.sequence.lock();
    let mut fail = |hook: Hook, source: SequenceError| {
        tracing::warn!(sequence = %registration.label, ?hook, timecode, "Sequence failed: {source}");
        failures.push(CallbackFailure {
            registration: id,
            sequence: registration.label.clone(),
            hook,
            source,
        });
    };

    if registration.state == LifecycleState::Pending {
        if let Err(source) = sequence.start(timecode) {
            registration.state = LifecycleState::Finished;
            fail(Hook::Start, source);
            return;
        }
        tracing::debug!(sequence = %registration.label, timecode, "Started");
        registration.state = LifecycleState::Active;
    }

    if in_window {
        registration.plays += 1;
        match sequence.play(timecode) {
            Ok(Status::Live) => return,
            Ok(Status::Done) => {
                tracing::debug!(sequence = %registration.label, timecode, "Done before window end");
            }
            Err(source) => fail(Hook::Play, source),
        }
    }

    registration.state = LifecycleState::Finished;
    if let Err(source) = sequence.stop(timecode) {
        fail(Hook::Stop, source);
    }
    tracing::debug!(sequence = %registration.label, timecode, "Stopped");
}
