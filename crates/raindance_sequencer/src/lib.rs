// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timecode-driven interval scheduler for Raindance.
//!
//! This crate drives time-based cues (animation beats, narration
//! segments, camera moves) from a single advancing clock:
//! - Sequences with start/play/stop lifecycle hooks
//! - Tracks binding sequences to half-open windows
//! - Single-pass evaluation per timecode, in insertion order
//! - Overlap reports for diagnostics
//!
//! ## Architecture
//!
//! The host owns the clock. Each tick it calls [`Track::play`] with the
//! current timecode; the track moves every registration through
//! `Pending -> Active -> Finished` and invokes the matching callbacks
//! synchronously before returning.

pub mod error;
pub mod registration;
pub mod report;
pub mod sequence;
pub mod timecode;
pub mod track;

pub use error::{CallbackFailure, PlayError, TrackError};
pub use registration::{LifecycleState, Registration, RegistrationId};
pub use report::{Overlap, ReportEntry, TrackReport};
pub use sequence::{handle, Hook, Sequence, SequenceError, SequenceHandle, Status};
pub use timecode::{Timecode, Window};
pub use track::Track;
