//! Scoring targets: metrics, hard thresholds, custom ranges and weights.
//!
//! These types describe *what* a user asks of a build. The scoring engine
//! turns them into penalties and rewards; the optimizer uses them to rank and
//! filter complete builds.

use std::fmt;

use crate::domain::{SkillPoint, SkillPoints, StatField, StatVector};

/// Any field a threshold, custom range or weight can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Metric {
    /// An aggregated raw attribute.
    Stat(StatField),
    /// Final skill points in one channel (assigned plus bonuses).
    SkillPointTotal(SkillPoint),
    MeleeDps,
    SpellDamage,
    EhpProxy,
    Ehp,
    EhpNoAgility,
    Sustain,
    TotalSkillPoints,
    TotalRequirements,
    /// Points missing to make the build wearable; zero when feasible.
    SkillPointDeficit,
}

impl Metric {
    /// Walk speed shortcut, the most common threshold field.
    pub const WALK_SPEED: Metric = Metric::Stat(StatField::WalkSpeed);

    /// Raw contribution of a single object to this metric.
    ///
    /// This is a cheap, linear stand-in used to find objects that support a
    /// threshold; it is not the full derived formula.
    pub fn raw_contribution(&self, stats: &StatVector, bonuses: &SkillPoints) -> f64 {
        use StatField::*;
        match self {
            Metric::Stat(field) => stats[*field],
            Metric::SkillPointTotal(channel) => bonuses[*channel] as f64,
            Metric::MeleeDps => {
                stats[BaseDps] / 1000.0
                    + stats[MeleeDamagePct] / 100.0
                    + stats[MeleeDamageRaw] / 1000.0
                    + bonuses[SkillPoint::Strength] as f64 / 100.0
            }
            Metric::SpellDamage => {
                stats[BaseDps] / 1000.0
                    + stats[SpellDamagePct] / 100.0
                    + stats[SpellDamageRaw] / 1000.0
                    + bonuses[SkillPoint::Strength] as f64 / 100.0
            }
            Metric::EhpProxy | Metric::EhpNoAgility => {
                stats[Health] / 1000.0 + bonuses[SkillPoint::Defense] as f64 / 100.0
            }
            Metric::Ehp => {
                stats[Health] / 1000.0
                    + bonuses[SkillPoint::Defense] as f64 / 100.0
                    + bonuses[SkillPoint::Agility] as f64 / 100.0
            }
            Metric::Sustain => {
                stats[HealthRegen] + stats[LifeSteal] + 3.0 * stats[ManaRegen] + stats[ManaSteal]
            }
            Metric::TotalSkillPoints => bonuses.total() as f64,
            Metric::TotalRequirements | Metric::SkillPointDeficit => 0.0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Stat(field) => write!(f, "{field}"),
            Metric::SkillPointTotal(channel) => write!(f, "{channel}_total"),
            Metric::MeleeDps => f.write_str("melee_dps"),
            Metric::SpellDamage => f.write_str("spell_damage"),
            Metric::EhpProxy => f.write_str("ehp_proxy"),
            Metric::Ehp => f.write_str("ehp"),
            Metric::EhpNoAgility => f.write_str("ehp_no_agility"),
            Metric::Sustain => f.write_str("sustain"),
            Metric::TotalSkillPoints => f.write_str("total_skill_points"),
            Metric::TotalRequirements => f.write_str("total_requirements"),
            Metric::SkillPointDeficit => f.write_str("skill_point_deficit"),
        }
    }
}

/// Hard min/max bound on a metric.
///
/// # Example
///
/// ```
/// use buildforge_core::{Metric, Threshold};
///
/// let t = Threshold::at_least(Metric::WALK_SPEED, 20.0);
/// assert_eq!(t.gap(25.0), 0.0);
/// assert_eq!(t.gap(15.0), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    pub metric: Metric,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Threshold {
    pub fn at_least(metric: Metric, min: f64) -> Self {
        Self {
            metric,
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(metric: Metric, max: f64) -> Self {
        Self {
            metric,
            min: None,
            max: Some(max),
        }
    }

    pub fn between(metric: Metric, min: f64, max: f64) -> Self {
        Self {
            metric,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Distance outside the bounds; zero when satisfied.
    pub fn gap(&self, value: f64) -> f64 {
        if let Some(min) = self.min {
            if value < min {
                return min - value;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return value - max;
            }
        }
        0.0
    }

    /// Magnitude of the violated bound, floored at 1.
    pub fn scale(&self, value: f64) -> f64 {
        let bound = match (self.min, self.max) {
            (Some(min), _) if value < min => min,
            (_, Some(max)) if value > max => max,
            _ => 1.0,
        };
        bound.abs().max(1.0)
    }

    pub fn is_satisfied(&self, value: f64) -> bool {
        self.gap(value) == 0.0
    }
}

/// A user-defined numeric target.
///
/// Unlike a [`Threshold`], a satisfied minimum keeps paying out in proportion
/// to how far above the bound the build sits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomRange {
    pub metric: Metric,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub weight: f64,
}

impl CustomRange {
    pub fn at_least(metric: Metric, min: f64) -> Self {
        Self {
            metric,
            min: Some(min),
            max: None,
            weight: 1.0,
        }
    }

    pub fn at_most(metric: Metric, max: f64) -> Self {
        Self {
            metric,
            min: None,
            max: Some(max),
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Weight vector of the scoring function.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "snake_case")
)]
pub struct Weights {
    pub melee_dps: f64,
    pub spell_damage: f64,
    pub ehp: f64,
    pub ehp_no_agility: f64,
    pub walk_speed: f64,
    pub sustain: f64,
    pub skill_points: f64,
    /// Penalty weight on total skill-point requirements.
    pub requirements: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            melee_dps: 1.0,
            spell_damage: 1.0,
            ehp: 1.0,
            ehp_no_agility: 0.0,
            walk_speed: 0.3,
            sustain: 0.3,
            skill_points: 0.2,
            requirements: 0.1,
        }
    }
}

impl Weights {
    /// Names accepted by [`Weights::get`] and [`Weights::set`].
    pub const NAMES: [&'static str; 8] = [
        "melee_dps",
        "spell_damage",
        "ehp",
        "ehp_no_agility",
        "walk_speed",
        "sustain",
        "skill_points",
        "requirements",
    ];

    /// All weights zero.
    pub fn zero() -> Self {
        Self {
            melee_dps: 0.0,
            spell_damage: 0.0,
            ehp: 0.0,
            ehp_no_agility: 0.0,
            walk_speed: 0.0,
            sustain: 0.0,
            skill_points: 0.0,
            requirements: 0.0,
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        Some(match name {
            "melee_dps" => self.melee_dps,
            "spell_damage" => self.spell_damage,
            "ehp" => self.ehp,
            "ehp_no_agility" => self.ehp_no_agility,
            "walk_speed" => self.walk_speed,
            "sustain" => self.sustain,
            "skill_points" => self.skill_points,
            "requirements" => self.requirements,
            _ => return None,
        })
    }

    /// Sets a weight by name. Returns false for unknown names.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        let slot = match name {
            "melee_dps" => &mut self.melee_dps,
            "spell_damage" => &mut self.spell_damage,
            "ehp" => &mut self.ehp,
            "ehp_no_agility" => &mut self.ehp_no_agility,
            "walk_speed" => &mut self.walk_speed,
            "sustain" => &mut self.sustain,
            "skill_points" => &mut self.skill_points,
            "requirements" => &mut self.requirements,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Thresholds, custom ranges and scoring mode of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Objectives {
    pub thresholds: Vec<Threshold>,
    pub custom_ranges: Vec<CustomRange>,
    /// Score only explicit asks, ignoring generic offense/defense taste.
    pub constraint_only: bool,
    /// Treat skill-point feasibility as a hard threshold.
    pub require_feasible: bool,
}

impl Default for Objectives {
    fn default() -> Self {
        Self {
            thresholds: Vec::new(),
            custom_ranges: Vec::new(),
            constraint_only: false,
            require_feasible: true,
        }
    }
}

impl Objectives {
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.thresholds.push(threshold);
        self
    }

    pub fn with_custom_range(mut self, range: CustomRange) -> Self {
        self.custom_ranges.push(range);
        self
    }

    pub fn constraint_only(mut self, enabled: bool) -> Self {
        self.constraint_only = enabled;
        self
    }

    pub fn require_feasible(mut self, enabled: bool) -> Self {
        self.require_feasible = enabled;
        self
    }

    /// Thresholds including the implicit feasibility bound.
    pub fn effective_thresholds(&self) -> Vec<Threshold> {
        let mut out = self.thresholds.clone();
        if self.require_feasible {
            out.push(Threshold::at_most(Metric::SkillPointDeficit, 0.0));
        }
        out
    }

    /// Metrics with an active minimum, in declaration order, deduplicated.
    pub fn min_threshold_metrics(&self) -> Vec<Metric> {
        let mut out: Vec<Metric> = Vec::new();
        for t in &self.thresholds {
            if t.min.is_some() && !out.contains(&t.metric) {
                out.push(t.metric);
            }
        }
        out
    }

    pub fn custom_min_count(&self) -> usize {
        self.custom_ranges.iter().filter(|r| r.min.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_gap_and_scale() {
        let t = Threshold::between(Metric::Ehp, 1000.0, 5000.0);
        assert_eq!(t.gap(500.0), 500.0);
        assert_eq!(t.scale(500.0), 1000.0);
        assert_eq!(t.gap(6000.0), 1000.0);
        assert_eq!(t.scale(6000.0), 5000.0);
        assert!(t.is_satisfied(3000.0));
    }

    #[test]
    fn test_weights_by_name() {
        let mut w = Weights::default();
        assert!(w.set("walk_speed", 2.0));
        assert_eq!(w.get("walk_speed"), Some(2.0));
        assert!(!w.set("nope", 1.0));
        assert_eq!(w.get("nope"), None);
        for name in Weights::NAMES {
            assert!(w.get(name).is_some());
        }
    }

    #[test]
    fn test_effective_thresholds_adds_feasibility() {
        let o = Objectives::default().with_threshold(Threshold::at_least(Metric::WALK_SPEED, 20.0));
        assert_eq!(o.effective_thresholds().len(), 2);
        let o = o.require_feasible(false);
        assert_eq!(o.effective_thresholds().len(), 1);
    }

    #[test]
    fn test_raw_contribution_speed() {
        let stats = StatVector::from_pairs([(StatField::WalkSpeed, 40.0)]);
        assert_eq!(Metric::WALK_SPEED.raw_contribution(&stats, &SkillPoints::ZERO), 40.0);
    }

    #[test]
    fn test_min_threshold_metrics_dedup() {
        let o = Objectives::default()
            .with_threshold(Threshold::at_least(Metric::WALK_SPEED, 10.0))
            .with_threshold(Threshold::between(Metric::WALK_SPEED, 5.0, 50.0))
            .with_threshold(Threshold::at_most(Metric::TotalRequirements, 200.0));
        assert_eq!(o.min_threshold_metrics(), vec![Metric::WALK_SPEED]);
    }
}
