//! Search statistics.
//!
//! Stack-allocated counters for search and phase performance tracking.

use std::time::{Duration, Instant};

/// Search-level statistics.
///
/// Tracks aggregate counters across every phase of one search.
///
/// # Example
///
/// ```
/// use buildforge_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_estimate();
/// stats.record_estimate();
/// stats.record_full_evaluation();
///
/// assert_eq!(stats.estimates, 2);
/// assert_eq!(stats.full_evaluations, 1);
/// assert_eq!(stats.evaluations(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Partial assignments scored during beam expansion or enumeration.
    pub estimates: u64,
    /// Complete assignments evaluated during the secondary sweep.
    pub full_evaluations: u64,
    /// Slots whose expansion has finished.
    pub slots_expanded: usize,
}

impl SearchStats {
    /// Marks the start of the search.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_estimate(&mut self) {
        self.estimates += 1;
    }

    pub fn record_full_evaluation(&mut self) {
        self.full_evaluations += 1;
    }

    pub fn record_slot(&mut self) {
        self.slots_expanded += 1;
    }

    /// Every evaluator call of the search.
    pub fn evaluations(&self) -> u64 {
        self.estimates + self.full_evaluations
    }

    /// Returns the evaluations per second rate.
    pub fn evaluations_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.evaluations() as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Phase-level statistics.
///
/// # Example
///
/// ```
/// use buildforge_solver::stats::PhaseStats;
///
/// let mut stats = PhaseStats::new(1, "Secondary Sweep");
/// stats.record_state();
///
/// assert_eq!(stats.phase_index, 1);
/// assert_eq!(stats.phase_type, "Secondary Sweep");
/// assert_eq!(stats.states, 1);
/// ```
#[derive(Debug)]
pub struct PhaseStats {
    /// Index of this phase (0-based).
    pub phase_index: usize,
    /// Type name of the phase.
    pub phase_type: &'static str,
    start_time: Instant,
    /// States processed in this phase.
    pub states: u64,
}

impl PhaseStats {
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
            start_time: Instant::now(),
            states: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    pub fn record_state(&mut self) {
        self.states += 1;
    }

    /// Returns the states per second rate.
    pub fn states_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.states as f64 / secs) as u64
        } else {
            0
        }
    }
}
