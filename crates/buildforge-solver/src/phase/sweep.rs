//! Secondary-dimension sweep over complete assignments.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use buildforge_core::domain::{AttackSpeed, SlotAssignment, Variant};
use buildforge_scoring::Blueprint;

use crate::error::Result;
use crate::event::{ProgressListener, SearchPhase, SearchProgress};
use crate::optimize::RankedBuild;
use crate::scope::{Candidate, SearchScope};

/// Variants tried for every complete assignment of `blueprint`.
///
/// Equipment builds have a single default variant; crafts try every material
/// tier pair and, for weapon recipes, every attack speed.
pub fn sweep_variants(blueprint: &Blueprint<'_>) -> Vec<Variant> {
    match blueprint {
        Blueprint::Equipment => vec![Variant::default()],
        Blueprint::Craft(_) => Variant::enumerate(blueprint.is_weapon_craft()),
    }
}

/// Fully evaluates each candidate under every variant and keeps the best
/// variant per (assignment, attack speed). Earlier variants win ties.
pub fn sweep<P: ProgressListener + ?Sized>(
    scope: &mut SearchScope<'_>,
    candidates: &[Candidate],
    progress: &mut P,
) -> Result<Vec<RankedBuild>> {
    let variants = sweep_variants(&scope.evaluator().blueprint());
    let total_slots = scope.slots().len();
    progress.on_progress(&SearchProgress {
        phase: SearchPhase::SweepingSecondary,
        processed_states: scope.stats().estimates,
        beam_size: candidates.len(),
        slots_expanded: total_slots,
        total_slots,
        detail: format!(
            "{} assignments x {} variants",
            candidates.len(),
            variants.len()
        ),
    });

    let mut best: BTreeMap<(SlotAssignment, Option<AttackSpeed>), RankedBuild> = BTreeMap::new();
    for candidate in candidates {
        scope.check_cancelled()?;
        for &variant in &variants {
            let build = scope.evaluate(&candidate.assignment, variant);
            match best.entry((candidate.assignment.clone(), variant.attack_speed)) {
                Entry::Vacant(slot) => {
                    slot.insert(build);
                }
                Entry::Occupied(mut slot) => {
                    if build.score > slot.get().score {
                        slot.insert(build);
                    }
                }
            }
        }
    }

    Ok(best.into_values().collect())
}
