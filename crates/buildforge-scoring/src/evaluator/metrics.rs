//! Closed-form derived metrics.

use buildforge_core::domain::{SkillPoint, SkillPoints, StatField, StatVector};

/// Decay constant of the skill-point effectiveness curve.
pub const SKILL_POINT_DECAY: f64 = 0.9908;

/// Points beyond this add nothing to the curve.
pub const SKILL_POINT_CURVE_LIMIT: i32 = 150;

/// Share of the defense curve applied as damage reduction.
pub const DEFENSE_EFFECT: f64 = 0.867;

/// Share of the agility curve applied as dodge.
pub const AGILITY_EFFECT: f64 = 0.951;

/// Floor for EHP denominators.
pub const EHP_EPSILON: f64 = 1e-6;

/// Base DPS share converted into spell damage.
pub const SPELL_CONVERSION: f64 = 0.5;

/// Mana regeneration weight inside the sustain composite.
pub const MANA_SUSTAIN_WEIGHT: f64 = 3.0;

/// Effectiveness of `points` in one channel, as a fraction.
///
/// `f(p) = k/(1-k) * (1 - k^min(p, 150)) / 100`, with negative inputs
/// treated as zero.
///
/// # Example
///
/// ```
/// use buildforge_scoring::evaluator::skill_point_pct;
///
/// assert_eq!(skill_point_pct(0), 0.0);
/// assert!(skill_point_pct(150) < 1.0);
/// assert_eq!(skill_point_pct(150), skill_point_pct(400));
/// ```
pub fn skill_point_pct(points: i32) -> f64 {
    let p = points.clamp(0, SKILL_POINT_CURVE_LIMIT);
    let k = SKILL_POINT_DECAY;
    k / (1.0 - k) * (1.0 - k.powi(p)) / 100.0
}

/// Character health before item bonuses.
pub fn base_health(level: u32) -> f64 {
    5.0 * level as f64 + 5.0
}

/// Legacy effective HP folding defense, agility and the weapon archetype.
pub fn compute_ehp(health: f64, defense: i32, agility: i32, defense_multiplier: f64) -> f64 {
    let def_factor = 1.0 - DEFENSE_EFFECT * skill_point_pct(defense);
    let agi_factor = 1.0 - AGILITY_EFFECT * skill_point_pct(agility);
    let class_factor = 2.0 - defense_multiplier;
    health / (def_factor * agi_factor * class_factor).max(EHP_EPSILON)
}

/// Effective HP ignoring agility dodge.
pub fn compute_ehp_no_agility(health: f64, defense: i32, defense_multiplier: f64) -> f64 {
    let def_factor = 1.0 - DEFENSE_EFFECT * skill_point_pct(defense);
    let class_factor = 2.0 - defense_multiplier;
    health / (def_factor * class_factor).max(EHP_EPSILON)
}

/// Inputs the derived formulas need beyond the aggregated stats.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DerivationInputs {
    pub level: u32,
    pub defense_multiplier: f64,
    pub melee_speed: f64,
    pub spell_speed: f64,
}

/// Damage and survivability proxies computed from final skill points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Proxies {
    pub melee_dps: f64,
    pub spell_damage: f64,
    pub health: f64,
    pub ehp_proxy: f64,
    pub ehp: f64,
    pub ehp_no_agility: f64,
    pub sustain: f64,
}

pub(crate) fn derive(stats: &StatVector, final_sp: &SkillPoints, inputs: DerivationInputs) -> Proxies {
    use StatField::*;

    let boost = 1.0 + skill_point_pct(final_sp[SkillPoint::Strength]);
    let base_dps = stats[BaseDps];

    let melee_dps = (base_dps * inputs.melee_speed * (1.0 + stats[MeleeDamagePct] / 100.0)
        + stats[MeleeDamageRaw])
        * boost;
    let spell_damage = (base_dps
        * SPELL_CONVERSION
        * inputs.spell_speed
        * (1.0 + stats[SpellDamagePct] / 100.0)
        + stats[SpellDamageRaw])
        * boost;

    let health = (base_health(inputs.level) + stats[Health]).max(1.0);
    let defense = final_sp[SkillPoint::Defense];
    let agility = final_sp[SkillPoint::Agility];
    let ehp_proxy =
        health / (1.0 - DEFENSE_EFFECT * skill_point_pct(defense)).max(EHP_EPSILON);

    Proxies {
        melee_dps,
        spell_damage,
        health,
        ehp_proxy,
        ehp: compute_ehp(health, defense, agility, inputs.defense_multiplier),
        ehp_no_agility: compute_ehp_no_agility(health, defense, inputs.defense_multiplier),
        sustain: stats[HealthRegen]
            + stats[LifeSteal]
            + MANA_SUSTAIN_WEIGHT * stats[ManaRegen]
            + stats[ManaSteal],
    }
}
