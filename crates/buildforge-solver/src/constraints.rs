//! User constraints of one search request.

use std::collections::BTreeSet;

use buildforge_config::SearchConfig;
use buildforge_core::domain::{ClassKind, ItemId, SkillPoint, SkillPoints, Variant};
use buildforge_core::{BuildForgeError, CustomRange, Objectives, Threshold, Weights};
use buildforge_scoring::{EvalContext, WeightOverrides};

/// Everything a search request asks of its builds.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::{ClassKind, ItemId};
/// use buildforge_core::{Metric, Threshold};
/// use buildforge_solver::Constraints;
///
/// let constraints = Constraints::new(106)
///     .with_class(ClassKind::Mage)
///     .must_include(ItemId(7))
///     .exclude(ItemId(9))
///     .with_threshold(Threshold::at_least(Metric::WALK_SPEED, 20.0));
///
/// assert!(constraints.is_excluded(ItemId(9)));
/// assert_eq!(constraints.objectives.thresholds.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    pub class: Option<ClassKind>,
    pub level: u32,
    /// Ids every returned build must contain.
    pub must_include: Vec<ItemId>,
    pub excluded: BTreeSet<ItemId>,
    /// Slots that keep the base assignment's value.
    pub locked_slots: BTreeSet<usize>,
    /// Absolute cap on every aggregated requirement channel.
    pub max_requirement: Option<i32>,
    /// Secondary dimensions used while the beam is expanding.
    pub base_variant: Variant,
    pub objectives: Objectives,
    pub config: SearchConfig,
    pub weight_overrides: WeightOverrides,
}

impl Constraints {
    pub fn new(level: u32) -> Self {
        Self {
            class: None,
            level,
            must_include: Vec::new(),
            excluded: BTreeSet::new(),
            locked_slots: BTreeSet::new(),
            max_requirement: None,
            base_variant: Variant::default(),
            objectives: Objectives::default(),
            config: SearchConfig::default(),
            weight_overrides: WeightOverrides::new(),
        }
    }

    pub fn with_class(mut self, class: ClassKind) -> Self {
        self.class = Some(class);
        self
    }

    pub fn must_include(mut self, id: ItemId) -> Self {
        if !self.must_include.contains(&id) {
            self.must_include.push(id);
        }
        self
    }

    pub fn exclude(mut self, id: ItemId) -> Self {
        self.excluded.insert(id);
        self
    }

    pub fn lock_slot(mut self, index: usize) -> Self {
        self.locked_slots.insert(index);
        self
    }

    pub fn with_max_requirement(mut self, cap: i32) -> Self {
        self.max_requirement = Some(cap);
        self
    }

    pub fn with_base_variant(mut self, variant: Variant) -> Self {
        self.base_variant = variant;
        self
    }

    pub fn with_objectives(mut self, objectives: Objectives) -> Self {
        self.objectives = objectives;
        self
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.objectives.thresholds.push(threshold);
        self
    }

    pub fn with_custom_range(mut self, range: CustomRange) -> Self {
        self.objectives.custom_ranges.push(range);
        self
    }

    pub fn constraint_only(mut self, enabled: bool) -> Self {
        self.objectives.constraint_only = enabled;
        self
    }

    pub fn require_feasible(mut self, enabled: bool) -> Self {
        self.objectives.require_feasible = enabled;
        self
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.config.weights = Some(weights);
        self
    }

    pub fn with_weight_override(mut self, name: impl Into<String>, value: f64) -> Self {
        self.weight_overrides.put(name, value);
        self
    }

    pub fn is_excluded(&self, id: ItemId) -> bool {
        self.excluded.contains(&id)
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.locked_slots.contains(&index)
    }

    /// Configured weights with runtime overrides applied.
    pub fn weights(&self) -> Weights {
        self.weight_overrides.apply(&self.config.weights())
    }

    pub fn eval_context(&self) -> EvalContext {
        EvalContext {
            level: self.level,
            class: self.class,
        }
    }

    /// True if no aggregated requirement channel exceeds `max_requirement`.
    pub fn within_max_requirement(&self, requirements: &SkillPoints) -> bool {
        match self.max_requirement {
            Some(cap) => SkillPoint::ALL.iter().all(|&c| requirements[c] <= cap),
            None => true,
        }
    }

    /// Checks that every locked slot exists in a layout of `slot_count` slots.
    pub fn validate_locked_slots(&self, slot_count: usize) -> Result<(), BuildForgeError> {
        match self.locked_slots.iter().find(|&&i| i >= slot_count) {
            Some(&index) => Err(BuildForgeError::InvalidSlot {
                index,
                len: slot_count,
            }),
            None => Ok(()),
        }
    }
}
