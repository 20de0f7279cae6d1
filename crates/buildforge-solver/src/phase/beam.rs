//! Bounded-width beam over slots.

use std::collections::HashSet;

use buildforge_config::SearchConfig;
use buildforge_core::domain::SlotAssignment;
use tracing::debug;

use super::Expansion;
use crate::error::Result;
use crate::event::{ProgressListener, SearchPhase, SearchProgress};
use crate::pool::CandidatePool;
use crate::scope::{Candidate, SearchScope};

/// Assigns slots one at a time, keeping the best `beam_width` partial
/// assignments after each slot.
///
/// Children are sorted by estimate (stable, descending), truncated to the
/// beam width and then deduplicated by exact slot sequence. Before a slot is
/// expanded the input beam is cut to `max(1, max_states / pool_len)` states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamSearch {
    beam_width: usize,
    max_states: usize,
}

impl BeamSearch {
    pub fn new(beam_width: usize, max_states: usize) -> Self {
        Self {
            beam_width: beam_width.max(1),
            max_states: max_states.max(1),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.beam_width, config.max_states)
    }

    pub fn beam_width(&self) -> usize {
        self.beam_width
    }

    pub fn max_states(&self) -> usize {
        self.max_states
    }
}

impl Expansion for BeamSearch {
    fn expand<P: ProgressListener + ?Sized>(
        &self,
        scope: &mut SearchScope<'_>,
        pools: &[CandidatePool],
        progress: &mut P,
    ) -> Result<Vec<Candidate>> {
        let slots = scope.slots();
        let total_slots = pools.len();
        let mut beam = vec![Candidate::new(SlotAssignment::empty(total_slots), 0.0)];

        for (index, pool) in pools.iter().enumerate() {
            scope.check_cancelled()?;

            let input_cap = (self.max_states / pool.len().max(1)).max(1);
            beam.truncate(input_cap);

            let mut children = Vec::with_capacity(beam.len() * pool.len());
            for parent in &beam {
                for value in pool {
                    scope.check_cancelled()?;
                    let assignment = parent.assignment.with_slot(index, *value);
                    let score = scope.estimate(&assignment);
                    children.push(Candidate::new(assignment, score));
                }
            }

            children.sort_by(|a, b| b.score.total_cmp(&a.score));
            children.truncate(self.beam_width);
            let mut seen = HashSet::with_capacity(children.len());
            children.retain(|c| seen.insert(c.assignment.clone()));
            beam = children;

            scope.stats_mut().record_slot();
            let slot_name = slots.get(index).map_or("?", |s| s.name);
            let best = beam.first().map_or(f64::NEG_INFINITY, |c| c.score);
            debug!(
                event = "slot_expanded",
                slot = slot_name,
                slot_index = index,
                pool = pool.len(),
                beam = beam.len(),
                best = best,
            );
            progress.on_progress(&SearchProgress {
                phase: SearchPhase::ExpandingSlot,
                processed_states: scope.stats().estimates,
                beam_size: beam.len(),
                slots_expanded: index + 1,
                total_slots,
                detail: format!("expanded {slot_name}"),
            });
        }

        Ok(beam)
    }

    fn phase_type_name(&self) -> &'static str {
        "Beam Search"
    }
}
