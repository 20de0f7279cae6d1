//! Progress reporting for running searches.
//!
//! A search reports after every expanded slot, when the secondary sweep
//! starts and once it completes. Listeners are called synchronously on the
//! searching thread.
//!
//! # Usage
//!
//! ```
//! use buildforge_solver::event::{ProgressListener, SearchPhase, SearchProgress};
//!
//! let mut seen = Vec::new();
//! let mut listener = |p: &SearchProgress| seen.push(p.phase);
//!
//! listener.on_progress(&SearchProgress::new(SearchPhase::Complete, 9));
//! assert_eq!(seen, vec![SearchPhase::Complete]);
//! ```

use std::fmt;

use tracing::debug;

/// Stage of a running search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPhase {
    /// One slot of the beam (or the enumeration) was processed.
    ExpandingSlot,
    /// Complete assignments are being evaluated under every variant.
    SweepingSecondary,
    /// Ranking finished.
    Complete,
}

impl SearchPhase {
    pub const fn name(self) -> &'static str {
        match self {
            SearchPhase::ExpandingSlot => "expanding_slot",
            SearchPhase::SweepingSecondary => "sweeping_secondary",
            SearchPhase::Complete => "complete",
        }
    }
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of search progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchProgress {
    pub phase: SearchPhase,
    /// Candidate states scored so far.
    pub processed_states: u64,
    /// Beam size after the latest slot.
    pub beam_size: usize,
    pub slots_expanded: usize,
    pub total_slots: usize,
    /// Human-readable note, such as the slot just expanded.
    pub detail: String,
}

impl SearchProgress {
    pub fn new(phase: SearchPhase, total_slots: usize) -> Self {
        Self {
            phase,
            processed_states: 0,
            beam_size: 0,
            slots_expanded: 0,
            total_slots,
            detail: String::new(),
        }
    }

    /// Share of slots expanded, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.phase == SearchPhase::Complete || self.total_slots == 0 {
            return 1.0;
        }
        (self.slots_expanded as f64 / self.total_slots as f64).min(1.0)
    }
}

/// Receives progress snapshots of a search.
pub trait ProgressListener {
    fn on_progress(&mut self, progress: &SearchProgress);
}

impl<F> ProgressListener for F
where
    F: FnMut(&SearchProgress),
{
    fn on_progress(&mut self, progress: &SearchProgress) {
        self(progress)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn on_progress(&mut self, _progress: &SearchProgress) {}
}

/// Emits each snapshot as a DEBUG `progress` event.
#[derive(Debug, Clone, Default)]
pub struct LoggingProgressListener {
    prefix: String,
}

impl LoggingProgressListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ProgressListener for LoggingProgressListener {
    fn on_progress(&mut self, progress: &SearchProgress) {
        debug!(
            event = "progress",
            prefix = %self.prefix,
            phase = progress.phase.name(),
            states = progress.processed_states,
            beam = progress.beam_size,
            slots = progress.slots_expanded,
            total_slots = progress.total_slots,
            detail = %progress.detail,
        );
    }
}

/// Counts events per phase and keeps the latest snapshot.
///
/// Useful for testing.
#[derive(Debug, Clone, Default)]
pub struct CountingProgressListener {
    expanding: usize,
    sweeping: usize,
    complete: usize,
    last: Option<SearchProgress>,
}

impl CountingProgressListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, phase: SearchPhase) -> usize {
        match phase {
            SearchPhase::ExpandingSlot => self.expanding,
            SearchPhase::SweepingSecondary => self.sweeping,
            SearchPhase::Complete => self.complete,
        }
    }

    pub fn total(&self) -> usize {
        self.expanding + self.sweeping + self.complete
    }

    pub fn last(&self) -> Option<&SearchProgress> {
        self.last.as_ref()
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ProgressListener for CountingProgressListener {
    fn on_progress(&mut self, progress: &SearchProgress) {
        match progress.phase {
            SearchPhase::ExpandingSlot => self.expanding += 1,
            SearchPhase::SweepingSecondary => self.sweeping += 1,
            SearchPhase::Complete => self.complete += 1,
        }
        self.last = Some(progress.clone());
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
