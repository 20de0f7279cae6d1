//! Per-slot candidate pools.
//!
//! A pool lists the values the search may try in one slot, best first:
//! must-include ids, the empty sentinel, the heuristic top-K and finally
//! objects that help reach an active minimum threshold.

use std::cmp::Ordering;

use buildforge_core::domain::{
    Catalog, CatalogItem, Category, ItemId, SlotAssignment, SlotSpec, StatField, StatGroup,
};
use buildforge_core::{Metric, Weights};
use buildforge_scoring::{Blueprint, EvalContext};
use tracing::debug;

use crate::constraints::Constraints;

/// Candidate values of one slot, `None` being the empty sentinel.
pub type CandidatePool = Vec<Option<ItemId>>;

/// Weight of a requirement point in the heuristic.
const REQUIREMENT_HEURISTIC: f64 = 0.25;

/// Per-field factor of the pool heuristic.
pub const fn heuristic_factor(field: StatField) -> f64 {
    match field {
        StatField::BaseDps => 0.01,
        StatField::MeleeDamagePct => 1.0,
        StatField::MeleeDamageRaw => 0.1,
        StatField::SpellDamagePct => 1.0,
        StatField::SpellDamageRaw => 0.1,
        StatField::Health => 0.02,
        StatField::HealthRegen => 0.2,
        StatField::LifeSteal => 0.05,
        StatField::ManaRegen => 2.0,
        StatField::ManaSteal => 2.0,
        StatField::WalkSpeed => 0.5,
    }
}

fn group_weight(field: StatField, weights: &Weights) -> f64 {
    let w = match field.group() {
        StatGroup::Offense => weights.melee_dps.max(weights.spell_damage),
        StatGroup::Defense => weights.ehp,
        StatGroup::Utility if field == StatField::WalkSpeed => weights.walk_speed,
        StatGroup::Utility => weights.sustain,
    };
    w.max(0.0)
}

/// Cheap standalone value of an object under `weights`.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::{CatalogItem, Category, SkillPoints, StatField};
/// use buildforge_core::Weights;
/// use buildforge_solver::pool::heuristic_score;
///
/// let boots = CatalogItem::new(1, "Striders", Category::Boots)
///     .with_stat(StatField::WalkSpeed, 20.0)
///     .with_requirements(SkillPoints::new(0, 0, 0, 0, 8));
///
/// // 0.5 * 20 * 0.3 - 0.25 * 8
/// assert!((heuristic_score(&boots, &Weights::default()) - 1.0).abs() < 1e-9);
/// ```
pub fn heuristic_score(item: &CatalogItem, weights: &Weights) -> f64 {
    let stats: f64 = item
        .stats
        .iter()
        .map(|(field, value)| heuristic_factor(field) * value * group_weight(field, weights))
        .sum();
    stats + weights.skill_points * item.bonuses.total() as f64
        - REQUIREMENT_HEURISTIC * item.requirements.total() as f64
}

/// Summed positive raw contribution of `item` to `metrics`.
fn support_score(item: &CatalogItem, metrics: &[Metric]) -> f64 {
    metrics
        .iter()
        .map(|m| m.raw_contribution(&item.stats, &item.bonuses))
        .filter(|v| *v > 0.0)
        .sum()
}

fn by_score_then_id(a: &(&CatalogItem, f64), b: &(&CatalogItem, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.id.cmp(&b.0.id))
}

/// Builds candidate pools for every slot of one blueprint.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::{Catalog, CatalogItem, Category, ItemId, SlotAssignment};
/// use buildforge_scoring::Blueprint;
/// use buildforge_solver::{Constraints, PoolBuilder};
///
/// let helmet = CatalogItem::new(1, "Cap", Category::Helmet);
/// let catalog = Catalog::new(vec![helmet], Vec::new()).unwrap();
/// let constraints = Constraints::new(50);
///
/// let builder = PoolBuilder::new(&catalog, Blueprint::Equipment, &constraints);
/// let pool = builder.build(0, &SlotAssignment::empty(9));
///
/// assert_eq!(pool, vec![None, Some(ItemId(1))]);
/// ```
#[derive(Debug, Clone)]
pub struct PoolBuilder<'a> {
    catalog: &'a Catalog,
    blueprint: Blueprint<'a>,
    constraints: &'a Constraints,
    context: EvalContext,
    weights: Weights,
}

impl<'a> PoolBuilder<'a> {
    pub fn new(catalog: &'a Catalog, blueprint: Blueprint<'a>, constraints: &'a Constraints) -> Self {
        Self {
            catalog,
            blueprint,
            constraints,
            context: constraints.eval_context(),
            weights: constraints.weights(),
        }
    }

    /// Replaces the heuristic weights.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// True if `item` may be placed in a slot of `spec`.
    pub fn is_eligible(&self, item: &CatalogItem, spec: &SlotSpec) -> bool {
        if item.category != spec.category || self.constraints.is_excluded(item.id) {
            return false;
        }
        if item.level > self.blueprint.max_item_level(&self.context) {
            return false;
        }
        match self.blueprint {
            Blueprint::Craft(recipe) => item.is_compatible_with(&recipe.profession),
            Blueprint::Equipment => {
                let Some(class) = self.context.class else {
                    return true;
                };
                if !item.is_compatible_with(class.name()) {
                    return false;
                }
                item.category != Category::Weapon
                    || item.weapon_type.map(|w| w.class()) == Some(class)
            }
        }
    }

    /// Pool of slot `index`. A locked slot yields the base value only.
    pub fn build(&self, index: usize, base: &SlotAssignment) -> CandidatePool {
        let Some(spec) = self.blueprint.slots().get(index) else {
            return Vec::new();
        };
        if self.constraints.is_locked(index) {
            return vec![base.get(index)];
        }

        let eligible: Vec<&CatalogItem> = self
            .catalog
            .by_category(spec.category)
            .filter(|item| self.is_eligible(item, spec))
            .collect();

        let mut pool: CandidatePool = Vec::new();
        for id in &self.constraints.must_include {
            if eligible.iter().any(|item| item.id == *id) {
                pool.push(Some(*id));
            }
        }
        if spec.allow_empty {
            pool.push(None);
        }

        let mut ranked: Vec<(&CatalogItem, f64)> = eligible
            .iter()
            .filter(|item| !pool.contains(&Some(item.id)))
            .map(|item| (*item, heuristic_score(item, &self.weights)))
            .collect();
        ranked.sort_by(by_score_then_id);
        let top_k = self.constraints.config.pool_size.max(1);
        pool.extend(ranked.iter().take(top_k).map(|(item, _)| Some(item.id)));

        let metrics = self.constraints.objectives.min_threshold_metrics();
        if !metrics.is_empty() {
            let config = &self.constraints.config;
            let extra = config.threshold_support_min.max(config.pool_size / 2);
            let mut support: Vec<(&CatalogItem, f64)> = eligible
                .iter()
                .filter(|item| !pool.contains(&Some(item.id)))
                .map(|item| (*item, support_score(item, &metrics)))
                .filter(|(_, score)| *score > 0.0)
                .collect();
            support.sort_by(by_score_then_id);
            pool.extend(support.iter().take(extra).map(|(item, _)| Some(item.id)));
        }

        debug!(
            event = "pool_built",
            slot = spec.name,
            eligible = eligible.len(),
            size = pool.len(),
        );
        pool
    }

    /// Pools of every slot, in slot order.
    pub fn build_all(&self, base: &SlotAssignment) -> Vec<CandidatePool> {
        (0..self.blueprint.slots().len())
            .map(|index| self.build(index, base))
            .collect()
    }
}
