// SPDX-License-Identifier: MIT OR Apache-2.0
//! Read-only diagnostic report produced by `Track::dump`.

use crate::registration::{LifecycleState, RegistrationId};
use crate::timecode::Window;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One registration as seen by the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Registration ID
    pub id: RegistrationId,
    /// Sequence name
    pub name: String,
    /// Scheduled window
    pub window: Window,
    /// Lifecycle state when the report was taken
    pub state: LifecycleState,
    /// `play` callbacks delivered so far
    pub plays: u64,
}

/// Two registrations whose windows intersect, by insertion index (`first < second`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Overlap {
    /// Earlier registration
    pub first: usize,
    /// Later registration
    pub second: usize,
}

/// Snapshot of a track's registrations and their pairwise overlaps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackReport {
    /// Track name
    pub track: String,
    /// Registrations in insertion order
    pub entries: Vec<ReportEntry>,
    /// Every intersecting pair
    pub overlaps: Vec<Overlap>,
}

impl TrackReport {
    pub(crate) fn new(track: impl Into<String>, entries: Vec<ReportEntry>) -> Self {
        let mut overlaps = Vec::new();
        for (i, a) in entries.iter().enumerate() {
            for (j, b) in entries.iter().enumerate().skip(i + 1) {
                if a.window.overlaps(&b.window) {
                    overlaps.push(Overlap { first: i, second: j });
                }
            }
        }

        Self {
            track: track.into(),
            entries,
            overlaps,
        }
    }

    /// Indices of every entry overlapping `index`
    pub fn overlaps_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.overlaps.iter().filter_map(move |o| {
            if o.first == index {
                Some(o.second)
            } else if o.second == index {
                Some(o.first)
            } else {
                None
            }
        })
    }

    /// Check if two entries overlap
    pub fn is_overlapping(&self, a: usize, b: usize) -> bool {
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        self.overlaps.contains(&Overlap { first, second })
    }
}

impl fmt::Display for TrackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Track \"{}\" ({} registrations)", self.track, self.entries.len())?;

        let width = self.entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for (index, entry) in self.entries.iter().enumerate() {
            let others: Vec<&str> = self
                .overlaps_of(index)
                .filter_map(|other| self.entries.get(other))
                .map(|other| other.name.as_str())
                .collect();
            let others = if others.is_empty() {
                "-".to_owned()
            } else {
                others.join(", ")
            };

            writeln!(
                f,
                "  {:>3}  {:<width$}  {:<16}  {:<8}  overlaps: {}",
                index,
                entry.name,
                entry.window.to_string(),
                entry.state.name(),
                others,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, start: u64, duration: u64) -> ReportEntry {
        ReportEntry {
            id: RegistrationId::new(),
            name: name.to_owned(),
            window: Window::new(start, duration).unwrap(),
            state: LifecycleState::Pending,
            plays: 0,
        }
    }

    #[test]
    fn test_display_skips_unknown_overlap_indices() {
        let mut report = TrackReport::new("loaded", vec![entry("A", 0, 10), entry("B", 5, 10)]);
        report.overlaps.push(Overlap { first: 1, second: 42 });

        let text = report.to_string();
        assert!(text.contains("overlaps: B"));
        assert!(text.contains("overlaps: A"));
        assert_eq!(report.overlaps_of(1).count(), 2);
    }
}
