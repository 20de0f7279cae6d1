//! Search-level scope.

use std::sync::atomic::{AtomicBool, Ordering};

use buildforge_core::domain::{SlotAssignment, SlotSpec, Variant};
use buildforge_scoring::{Evaluator, ScoringEngine};
use tracing::trace;

use crate::constraints::Constraints;
use crate::error::{Result, SearchError};
use crate::optimize::RankedBuild;
use crate::stats::SearchStats;

/// Score bonus per must-include id already present in a partial assignment.
pub const MUST_INCLUDE_BONUS: f64 = 1e6;

/// A partial or complete assignment with its running score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub assignment: SlotAssignment,
    pub score: f64,
}

impl Candidate {
    pub fn new(assignment: SlotAssignment, score: f64) -> Self {
        Self { assignment, score }
    }
}

/// State shared by every phase of one search invocation.
pub struct SearchScope<'a> {
    evaluator: Evaluator<'a>,
    engine: ScoringEngine,
    constraints: &'a Constraints,
    cancel: Option<&'a AtomicBool>,
    stats: SearchStats,
}

impl<'a> SearchScope<'a> {
    pub fn new(
        evaluator: Evaluator<'a>,
        engine: ScoringEngine,
        constraints: &'a Constraints,
        cancel: Option<&'a AtomicBool>,
    ) -> Self {
        Self {
            evaluator,
            engine,
            constraints,
            cancel,
            stats: SearchStats::default(),
        }
    }

    pub fn start(&mut self) {
        self.stats.start();
    }

    pub fn evaluator(&self) -> &Evaluator<'a> {
        &self.evaluator
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn constraints(&self) -> &'a Constraints {
        self.constraints
    }

    pub fn slots(&self) -> &'static [SlotSpec] {
        self.evaluator.slots()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Fails with [`SearchError::Cancelled`] once the flag is raised.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Scores a partial assignment under the base variant. Unfilled slots
    /// count as empty.
    pub fn estimate(&mut self, assignment: &SlotAssignment) -> f64 {
        let eval = self
            .evaluator
            .evaluate(assignment, self.constraints.base_variant);
        let mut score = self.engine.score(&eval).total;
        let present = self
            .constraints
            .must_include
            .iter()
            .filter(|&&id| assignment.contains(id))
            .count();
        score += MUST_INCLUDE_BONUS * present as f64;
        self.stats.record_estimate();
        trace!(
            event = "step",
            step = self.stats.estimates,
            assignment = %assignment,
            score = score,
        );
        score
    }

    /// Fully evaluates and scores a complete assignment under `variant`.
    pub fn evaluate(&mut self, assignment: &SlotAssignment, variant: Variant) -> RankedBuild {
        let evaluation = self.evaluator.evaluate(assignment, variant);
        let card = self.engine.score(&evaluation);
        self.stats.record_full_evaluation();
        RankedBuild {
            assignment: assignment.clone(),
            variant,
            evaluation,
            score: card.total,
            breakdown: card.breakdown,
            satisfies_thresholds: card.satisfies_thresholds,
        }
    }
}
