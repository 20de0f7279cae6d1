//! Weighted scoring of evaluated builds.
//!
//! The score is a sum of labelled terms: normalized generic objectives, custom
//! range rewards and penalties, and threshold penalties. The breakdown keeps
//! every non-zero term so results can be explained.

use std::fmt;

use buildforge_core::{CustomRange, Metric, Objectives, Threshold, Weights};

use crate::evaluator::Evaluation;

/// Divisors bringing each generic objective to a comparable magnitude.
pub const MELEE_DPS_SCALE: f64 = 1000.0;
pub const SPELL_DAMAGE_SCALE: f64 = 1000.0;
pub const EHP_SCALE: f64 = 10_000.0;
pub const WALK_SPEED_SCALE: f64 = 10.0;
pub const SUSTAIN_SCALE: f64 = 100.0;
pub const SKILL_POINT_SCALE: f64 = 10.0;
pub const REQUIREMENT_SCALE: f64 = 100.0;

/// Multiplier of the normalized violation in a threshold penalty.
pub const THRESHOLD_PENALTY: f64 = 100.0;

/// Reward per normalized unit above a custom minimum.
pub const CUSTOM_MIN_REWARD: f64 = 5.0;

const CONSTRAINT_ONLY_SKILL_POINT_BONUS: f64 = 0.01;
const CONSTRAINT_ONLY_REQUIREMENT_PENALTY: f64 = 0.005;

/// What a score term measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermLabel {
    /// A generic weighted objective, named like its weight.
    Objective(&'static str),
    /// Penalty on total skill-point requirements.
    Requirements,
    /// Reward or penalty of a custom range.
    CustomRange(Metric),
    /// Penalty of a violated hard threshold.
    Threshold(Metric),
}

impl fmt::Display for TermLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermLabel::Objective(name) => f.write_str(name),
            TermLabel::Requirements => f.write_str("requirements"),
            TermLabel::CustomRange(metric) => write!(f, "custom:{metric}"),
            TermLabel::Threshold(metric) => write!(f, "threshold:{metric}"),
        }
    }
}

/// One labelled contribution to a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTerm {
    pub label: TermLabel,
    pub value: f64,
}

/// Total score with its breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub total: f64,
    pub breakdown: Vec<ScoreTerm>,
    pub satisfies_thresholds: bool,
}

impl ScoreCard {
    /// Value of the first term with `label`, if present.
    pub fn term(&self, label: TermLabel) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.value)
    }
}

/// Penalty for missing a bound by `gap`, relative to the bound magnitude.
///
/// # Example
///
/// ```
/// use buildforge_scoring::engine::violation_penalty;
///
/// assert_eq!(violation_penalty(0.0, 20.0), 0.0);
/// // Missing a bound of 20 by 10: g = 0.5, penalty = 100 * (0.5 + 0.25).
/// assert_eq!(violation_penalty(10.0, 20.0), 75.0);
/// ```
pub fn violation_penalty(gap: f64, bound: f64) -> f64 {
    if gap <= 0.0 {
        return 0.0;
    }
    let g = gap / bound.abs().max(1.0);
    THRESHOLD_PENALTY * (g + g * g)
}

/// Generic-term multiplier when several custom minimums compete.
pub fn generic_scale(custom_min_count: usize) -> f64 {
    if custom_min_count <= 1 {
        return 1.0;
    }
    (1.0 - 0.2 * (custom_min_count - 1) as f64).max(0.15)
}

/// Scores evaluations against fixed weights and objectives.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: Weights,
    objectives: Objectives,
    thresholds: Vec<Threshold>,
    generic_scale: f64,
}

impl ScoringEngine {
    pub fn new(weights: Weights, objectives: Objectives) -> Self {
        let thresholds = objectives.effective_thresholds();
        let generic_scale = generic_scale(objectives.custom_min_count());
        Self {
            weights,
            objectives,
            thresholds,
            generic_scale,
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    /// Hard thresholds including the implicit feasibility bound.
    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    /// True if every hard threshold holds.
    pub fn satisfies_thresholds(&self, eval: &Evaluation) -> bool {
        self.thresholds
            .iter()
            .all(|t| t.is_satisfied(eval.metric(t.metric)))
    }

    /// Computes the score of `eval`.
    pub fn score(&self, eval: &Evaluation) -> ScoreCard {
        let mut breakdown = Vec::new();
        let mut push = |label: TermLabel, value: f64| {
            if value != 0.0 {
                breakdown.push(ScoreTerm { label, value });
            }
        };

        let m = &eval.metrics;
        if self.objectives.constraint_only {
            push(
                TermLabel::Objective("skill_points"),
                CONSTRAINT_ONLY_SKILL_POINT_BONUS * m.total_skill_points as f64,
            );
            push(
                TermLabel::Requirements,
                -CONSTRAINT_ONLY_REQUIREMENT_PENALTY * m.total_requirements as f64,
            );
        } else {
            let w = &self.weights;
            let s = self.generic_scale;
            let generic = [
                ("melee_dps", w.melee_dps, m.melee_dps / MELEE_DPS_SCALE),
                ("spell_damage", w.spell_damage, m.spell_damage / SPELL_DAMAGE_SCALE),
                ("ehp", w.ehp, m.ehp / EHP_SCALE),
                ("ehp_no_agility", w.ehp_no_agility, m.ehp_no_agility / EHP_SCALE),
                ("walk_speed", w.walk_speed, m.walk_speed / WALK_SPEED_SCALE),
                ("sustain", w.sustain, m.sustain / SUSTAIN_SCALE),
                (
                    "skill_points",
                    w.skill_points,
                    m.total_skill_points as f64 / SKILL_POINT_SCALE,
                ),
            ];
            for (name, weight, normalized) in generic {
                push(TermLabel::Objective(name), weight * normalized * s);
            }
            push(
                TermLabel::Requirements,
                -w.requirements * m.total_requirements as f64 / REQUIREMENT_SCALE * s,
            );
        }

        for range in &self.objectives.custom_ranges {
            push(
                TermLabel::CustomRange(range.metric),
                custom_range_score(range, eval.metric(range.metric)),
            );
        }

        let mut satisfied = true;
        for threshold in &self.thresholds {
            let value = eval.metric(threshold.metric);
            let gap = threshold.gap(value);
            if gap > 0.0 {
                satisfied = false;
                push(
                    TermLabel::Threshold(threshold.metric),
                    -violation_penalty(gap, threshold.scale(value)),
                );
            }
        }

        let total = breakdown.iter().map(|t| t.value).sum();
        ScoreCard {
            total,
            breakdown,
            satisfies_thresholds: satisfied,
        }
    }
}

fn custom_range_score(range: &CustomRange, value: f64) -> f64 {
    let mut score = 0.0;
    if let Some(min) = range.min {
        let scale = min.abs().max(1.0);
        if value >= min {
            score += range.weight * CUSTOM_MIN_REWARD * (value - min) / scale;
        } else {
            score -= range.weight * violation_penalty(min - value, min);
        }
    }
    if let Some(max) = range.max {
        if value > max {
            score -= range.weight * violation_penalty(value - max, max);
        }
    }
    score
}

#[cfg(test)]
mod tests;
