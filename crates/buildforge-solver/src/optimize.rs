//! Search entry points.
//!
//! `optimize` builds candidate pools, expands them with the beam or full
//! enumeration, sweeps secondary variants and ranks the results:
//!
//! ```text
//! pools -> expansion (beam | exhaustive) -> sweep -> rank
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use buildforge_config::{SearchConfig, SearchStrategy};
use buildforge_core::domain::{BuildTarget, Catalog, SlotAssignment, Variant};
use buildforge_scoring::{Blueprint, Evaluation, Evaluator, ScoreTerm, ScoringEngine};
use tracing::{info, warn};

use crate::constraints::Constraints;
use crate::error::Result;
use crate::event::{NoProgress, ProgressListener, SearchPhase, SearchProgress};
use crate::phase::{rank, sweep, BeamSearch, ExhaustiveSearch, Expansion};
use crate::pool::{CandidatePool, PoolBuilder};
use crate::scope::{Candidate, SearchScope};
use crate::stats::PhaseStats;

/// One optimization request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub catalog: Arc<Catalog>,
    pub target: BuildTarget,
    /// Starting assignment; locked slots keep its values.
    pub base: SlotAssignment,
    pub constraints: Constraints,
}

impl SearchRequest {
    /// Creates a request starting from an empty assignment.
    pub fn new(catalog: Arc<Catalog>, target: BuildTarget, constraints: Constraints) -> Self {
        let base = SlotAssignment::empty(target.slot_count());
        Self {
            catalog,
            target,
            base,
            constraints,
        }
    }

    pub fn with_base(mut self, base: SlotAssignment) -> Self {
        self.base = base;
        self
    }
}

/// A complete, scored build.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedBuild {
    pub assignment: SlotAssignment,
    pub variant: Variant,
    pub evaluation: Evaluation,
    pub score: f64,
    pub breakdown: Vec<ScoreTerm>,
    pub satisfies_thresholds: bool,
}

/// Picks the expansion strategy for a space of `state_count` assignments.
///
/// # Example
///
/// ```
/// use buildforge_config::{SearchConfig, SearchStrategy};
/// use buildforge_solver::resolve_strategy;
///
/// let config = SearchConfig::default();
/// assert_eq!(resolve_strategy(&config, 500), SearchStrategy::Exhaustive);
/// assert_eq!(resolve_strategy(&config, 5_000_000), SearchStrategy::Beam);
/// ```
pub fn resolve_strategy(config: &SearchConfig, state_count: u64) -> SearchStrategy {
    match config.strategy {
        SearchStrategy::Auto if state_count <= config.exhaustive_state_limit => {
            SearchStrategy::Exhaustive
        }
        SearchStrategy::Auto | SearchStrategy::Beam => SearchStrategy::Beam,
        SearchStrategy::Exhaustive if state_count > config.max_states.max(1) as u64 => {
            warn!(
                event = "strategy_fallback",
                state_count = state_count,
                max_states = config.max_states,
            );
            SearchStrategy::Beam
        }
        SearchStrategy::Exhaustive => SearchStrategy::Exhaustive,
    }
}

/// Runs a search without cancellation or progress reporting.
pub fn optimize_simple(request: &SearchRequest) -> Result<Vec<RankedBuild>> {
    optimize(request, None, &mut NoProgress)
}

/// Searches for the best builds of `request`.
///
/// Validation problems (unknown recipe, locked slot out of range, a required
/// slot without candidates) yield an empty list. Raising `cancel` makes the
/// search return [`SearchError::Cancelled`](crate::SearchError::Cancelled)
/// with no partial results.
pub fn optimize<P: ProgressListener + ?Sized>(
    request: &SearchRequest,
    cancel: Option<&AtomicBool>,
    progress: &mut P,
) -> Result<Vec<RankedBuild>> {
    let catalog = request.catalog.as_ref();
    let constraints = &request.constraints;
    let config = &constraints.config;

    let Some(blueprint) = Blueprint::resolve(catalog, &request.target) else {
        warn!(
            event = "validation_failed",
            reason = "unknown recipe",
            build_target = ?request.target,
        );
        return Ok(Vec::new());
    };
    let slot_count = blueprint.slots().len();
    if let Err(err) = constraints.validate_locked_slots(slot_count) {
        warn!(event = "validation_failed", reason = %err);
        return Ok(Vec::new());
    }
    if let Err(err) = constraints.weight_overrides.validate() {
        warn!(event = "weight_override_ignored", reason = %err);
    }

    let base = request.base.resized(slot_count);
    let pools = PoolBuilder::new(catalog, blueprint, constraints).build_all(&base);
    if let Some(index) = pools.iter().position(Vec::is_empty) {
        warn!(
            event = "validation_failed",
            reason = "no candidates",
            slot = blueprint.slots()[index].name,
        );
        return Ok(Vec::new());
    }

    let state_count = ExhaustiveSearch::state_count(&pools);
    let strategy = resolve_strategy(config, state_count);
    info!(
        event = "search_start",
        slot_count = slot_count,
        state_count = state_count,
        strategy = ?strategy,
    );

    let evaluator = Evaluator::new(catalog, blueprint, constraints.eval_context());
    let engine = ScoringEngine::new(constraints.weights(), constraints.objectives.clone());
    let mut scope = SearchScope::new(evaluator, engine, constraints, cancel);
    scope.start();
    scope.check_cancelled()?;

    let candidates = match strategy {
        SearchStrategy::Exhaustive => {
            run_expansion(&ExhaustiveSearch::new(), &mut scope, &pools, progress)?
        }
        _ => run_expansion(&BeamSearch::from_config(config), &mut scope, &pools, progress)?,
    };

    let mut phase = PhaseStats::new(1, "Secondary Sweep");
    info!(event = "phase_start", phase = phase.phase_type, phase_index = phase.phase_index);
    let swept = sweep(&mut scope, &candidates, progress)?;
    phase.states = swept.len() as u64;
    info!(
        event = "phase_end",
        phase = phase.phase_type,
        phase_index = phase.phase_index,
        duration_ms = phase.elapsed_ms(),
        steps = scope.stats().full_evaluations,
        speed = phase.states_per_second(),
        score = best_score(swept.iter().map(|b| b.score)),
    );

    let builds = rank(swept, constraints);
    let stats = scope.stats();
    progress.on_progress(&SearchProgress {
        phase: SearchPhase::Complete,
        processed_states: stats.evaluations(),
        beam_size: builds.len(),
        slots_expanded: stats.slots_expanded,
        total_slots: slot_count,
        detail: format!("{} builds", builds.len()),
    });
    info!(
        event = "search_end",
        duration_ms = stats.elapsed().as_millis() as u64,
        evaluations = stats.evaluations(),
        speed = stats.evaluations_per_second(),
        results = builds.len(),
        score = best_score(builds.iter().map(|b| b.score)),
    );
    Ok(builds)
}

fn run_expansion<E: Expansion, P: ProgressListener + ?Sized>(
    expansion: &E,
    scope: &mut SearchScope<'_>,
    pools: &[CandidatePool],
    progress: &mut P,
) -> Result<Vec<Candidate>> {
    let mut phase = PhaseStats::new(0, expansion.phase_type_name());
    info!(event = "phase_start", phase = phase.phase_type, phase_index = phase.phase_index);

    let estimates_before = scope.stats().estimates;
    let candidates = expansion.expand(scope, pools, progress)?;
    phase.states = scope.stats().estimates - estimates_before;

    info!(
        event = "phase_end",
        phase = phase.phase_type,
        phase_index = phase.phase_index,
        duration_ms = phase.elapsed_ms(),
        steps = phase.states,
        speed = phase.states_per_second(),
        score = best_score(candidates.iter().map(|c| c.score)),
    );
    Ok(candidates)
}

fn best_score(scores: impl Iterator<Item = f64>) -> String {
    scores
        .max_by(f64::total_cmp)
        .map_or_else(|| "N/A".to_string(), |s| format!("{s:.4}"))
}
