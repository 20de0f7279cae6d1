//! Full enumeration of small search spaces.

use buildforge_core::domain::SlotAssignment;
use tracing::debug;

use super::Expansion;
use crate::error::Result;
use crate::event::{ProgressListener, SearchPhase, SearchProgress};
use crate::pool::CandidatePool;
use crate::scope::{Candidate, SearchScope};

/// Enumerates every complete assignment in odometer order, the last slot
/// changing fastest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExhaustiveSearch;

impl ExhaustiveSearch {
    pub fn new() -> Self {
        Self
    }

    /// Number of complete assignments over `pools`, saturating.
    pub fn state_count(pools: &[CandidatePool]) -> u64 {
        pools
            .iter()
            .fold(1u64, |acc, pool| acc.saturating_mul(pool.len() as u64))
    }
}

/// Advances `digits` to the next odometer position. Returns false once every
/// position has been visited.
fn advance(digits: &mut [usize], pools: &[CandidatePool]) -> bool {
    for i in (0..digits.len()).rev() {
        digits[i] += 1;
        if digits[i] < pools[i].len() {
            return true;
        }
        digits[i] = 0;
    }
    false
}

impl Expansion for ExhaustiveSearch {
    fn expand<P: ProgressListener + ?Sized>(
        &self,
        scope: &mut SearchScope<'_>,
        pools: &[CandidatePool],
        progress: &mut P,
    ) -> Result<Vec<Candidate>> {
        let total_slots = pools.len();
        if pools.iter().any(Vec::is_empty) {
            return Ok(Vec::new());
        }

        let total = Self::state_count(pools);
        let mut out = Vec::with_capacity(total.min(1 << 20) as usize);
        let mut digits = vec![0usize; total_slots];
        let mut leading = 0usize;

        loop {
            scope.check_cancelled()?;
            let assignment =
                SlotAssignment::from_slots(digits.iter().zip(pools).map(|(&d, pool)| pool[d]));
            let score = scope.estimate(&assignment);
            out.push(Candidate::new(assignment, score));

            if !advance(&mut digits, pools) {
                break;
            }
            if total_slots > 0 && digits[0] != leading {
                leading = digits[0];
                progress.on_progress(&SearchProgress {
                    phase: SearchPhase::ExpandingSlot,
                    processed_states: scope.stats().estimates,
                    beam_size: out.len(),
                    slots_expanded: 0,
                    total_slots,
                    detail: format!("enumerated {} of {total}", out.len()),
                });
            }
        }

        scope.stats_mut().slots_expanded = total_slots;
        debug!(event = "enumerated", states = out.len(), total = total);
        progress.on_progress(&SearchProgress {
            phase: SearchPhase::ExpandingSlot,
            processed_states: scope.stats().estimates,
            beam_size: out.len(),
            slots_expanded: total_slots,
            total_slots,
            detail: format!("enumerated {} of {total}", out.len()),
        });
        Ok(out)
    }

    fn phase_type_name(&self) -> &'static str {
        "Exhaustive Search"
    }
}
