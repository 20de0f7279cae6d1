//! Exact skill-point feasibility analysis.
//!
//! Decides whether a set of objects can be equipped in *some* order such that
//! each object's requirements are met by pre-assigned points plus the bonuses
//! of the objects equipped before it.
//!
//! The search is a DP over the subsets of already-equipped objects. Each
//! subset keeps a Pareto frontier of assigned-point vectors: a vector is
//! dropped when another vector is `<=` in every channel, which never loses an
//! optimal solution.

use buildforge_core::domain::{SkillPoint, SkillPoints};

/// Points a single channel may hold.
pub const SKILL_POINT_CAP: i32 = 100;

/// Highest assignable total, reached at level 101.
pub const MAX_SKILL_POINT_BUDGET: i32 = 200;

/// Requirements and bonuses of one equipped object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkillPointProfile {
    pub requirements: SkillPoints,
    pub bonuses: SkillPoints,
}

impl SkillPointProfile {
    pub fn new(requirements: SkillPoints, bonuses: SkillPoints) -> Self {
        Self {
            requirements,
            bonuses,
        }
    }
}

/// Outcome of a feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillPointAnalysis {
    pub feasible: bool,
    /// Minimum total of assigned points over every valid equip order.
    pub required: Option<i32>,
    /// A minimal assignment achieving `required`.
    pub assignment: Option<SkillPoints>,
}

impl SkillPointAnalysis {
    fn infeasible() -> Self {
        Self {
            feasible: false,
            required: None,
            assignment: None,
        }
    }
}

/// Assignable points at a character level: two per level, capped at 200.
pub fn skill_point_budget(level: u32) -> i32 {
    let earned = level.saturating_sub(1).saturating_mul(2);
    earned.min(MAX_SKILL_POINT_BUDGET as u32) as i32
}

/// Runs the feasibility DP against a total budget.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::SkillPoints;
/// use buildforge_scoring::skill_points::{analyze, SkillPointProfile};
///
/// // The weapon needs 125 agility, over the 100 cap; the boots grant +30.
/// let boots = SkillPointProfile::new(SkillPoints::ZERO, SkillPoints::new(0, 0, 0, 0, 30));
/// let weapon = SkillPointProfile::new(SkillPoints::new(0, 0, 0, 0, 125), SkillPoints::ZERO);
///
/// let result = analyze(&[weapon, boots], 200);
/// assert!(result.feasible);
/// assert_eq!(result.required, Some(95));
///
/// assert!(!analyze(&[weapon], 200).feasible);
/// ```
pub fn analyze(objects: &[SkillPointProfile], budget: i32) -> SkillPointAnalysis {
    let n = objects.len();
    if n == 0 {
        return SkillPointAnalysis {
            feasible: true,
            required: Some(0),
            assignment: Some(SkillPoints::ZERO),
        };
    }
    debug_assert!(n <= 16, "feasibility DP is exponential in object count");

    let full = (1usize << n) - 1;

    let mut mask_bonus = vec![SkillPoints::ZERO; full + 1];
    for mask in 1..=full {
        let low = mask.trailing_zeros() as usize;
        mask_bonus[mask] = mask_bonus[mask & (mask - 1)] + objects[low].bonuses;
    }

    let mut frontiers: Vec<Vec<SkillPoints>> = vec![Vec::new(); full + 1];
    frontiers[0].push(SkillPoints::ZERO);

    // Transitions only add bits, so ascending mask order is topological.
    for mask in 0..full {
        if frontiers[mask].is_empty() {
            continue;
        }
        let states = std::mem::take(&mut frontiers[mask]);
        let bonus = mask_bonus[mask];

        for state in &states {
            for (i, object) in objects.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    continue;
                }
                if let Some(next) = cover_shortfall(state, &object.requirements, &bonus, budget) {
                    insert_pareto(&mut frontiers[mask | (1 << i)], next);
                }
            }
        }
        frontiers[mask] = states;
    }

    frontiers[full]
        .iter()
        .min_by_key(|a| a.total())
        .map(|best| SkillPointAnalysis {
            feasible: true,
            required: Some(best.total()),
            assignment: Some(*best),
        })
        .unwrap_or_else(SkillPointAnalysis::infeasible)
}

/// Runs the DP with only the per-channel cap, to report how many points an
/// over-budget build would need.
pub fn analyze_unbounded(objects: &[SkillPointProfile]) -> SkillPointAnalysis {
    analyze(objects, SKILL_POINT_CAP * SkillPoint::COUNT as i32)
}

// Raises assigned points to cover the next object's shortfall. Returns None
// if a channel would exceed the cap or the total would exceed the budget.
fn cover_shortfall(
    assigned: &SkillPoints,
    requirements: &SkillPoints,
    bonus: &SkillPoints,
    budget: i32,
) -> Option<SkillPoints> {
    let mut next = *assigned;
    for channel in SkillPoint::ALL {
        let req = requirements[channel];
        // Zero means the channel has no requirement.
        if req <= 0 {
            continue;
        }
        let needed = req - bonus[channel];
        if needed > next[channel] {
            if needed > SKILL_POINT_CAP {
                return None;
            }
            next[channel] = needed;
        }
    }
    if next.total() > budget {
        return None;
    }
    Some(next)
}

fn insert_pareto(frontier: &mut Vec<SkillPoints>, candidate: SkillPoints) {
    if frontier.iter().any(|existing| existing.le_all(&candidate)) {
        return;
    }
    frontier.retain(|existing| !candidate.le_all(existing));
    frontier.push(candidate);
}

#[cfg(test)]
mod tests;
