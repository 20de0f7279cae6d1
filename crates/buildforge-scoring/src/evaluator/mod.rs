//! Build and craft evaluation.
//!
//! An [`Evaluator`] turns a complete [`SlotAssignment`] into aggregated stats,
//! derived metrics, per-slot checks and human-readable warnings. Evaluation is
//! pure and never fails: unknown ids and rule violations become warnings.

mod craft;
mod metrics;

use buildforge_core::domain::{
    BuildTarget, Catalog, CatalogItem, Category, ClassKind, ItemId, Recipe, SkillPoint,
    SkillPoints, SlotAssignment, SlotSpec, StatField, StatVector, Variant, WeaponType,
    CRAFT_GRID, CRAFT_SLOTS, EQUIPMENT_SLOTS,
};
use buildforge_core::{BuildForgeError, Metric};

use crate::skill_points::{
    analyze, analyze_unbounded, skill_point_budget, SkillPointProfile, SKILL_POINT_CAP,
};

pub use craft::{effectiveness, material_multiplier, MATERIAL_TIER_MULT};
pub use metrics::{
    base_health, compute_ehp, compute_ehp_no_agility, skill_point_pct, AGILITY_EFFECT,
    DEFENSE_EFFECT, EHP_EPSILON, MANA_SUSTAIN_WEIGHT, SKILL_POINT_CURVE_LIMIT,
    SKILL_POINT_DECAY, SPELL_CONVERSION,
};

use metrics::{derive, DerivationInputs};

/// Deficit reported when no equip order exists even without a budget.
pub const UNREACHABLE_DEFICIT: i32 = 500;

/// Character the build is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    pub level: u32,
    pub class: Option<ClassKind>,
}

impl EvalContext {
    pub fn new(level: u32) -> Self {
        Self { level, class: None }
    }

    pub fn with_class(mut self, class: ClassKind) -> Self {
        self.class = Some(class);
        self
    }
}

/// A build target with its recipe resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub enum Blueprint<'a> {
    Equipment,
    Craft(&'a Recipe),
}

impl<'a> Blueprint<'a> {
    /// Resolves the recipe of a craft target. Returns `None` for an unknown
    /// recipe name.
    pub fn resolve(catalog: &'a Catalog, target: &BuildTarget) -> Option<Self> {
        match target {
            BuildTarget::Equipment => Some(Blueprint::Equipment),
            BuildTarget::Craft { recipe } => catalog.recipe(recipe).map(Blueprint::Craft),
        }
    }

    pub fn slots(&self) -> &'static [SlotSpec] {
        match self {
            Blueprint::Equipment => &EQUIPMENT_SLOTS,
            Blueprint::Craft(_) => &CRAFT_GRID,
        }
    }

    pub fn recipe(&self) -> Option<&'a Recipe> {
        match self {
            Blueprint::Equipment => None,
            Blueprint::Craft(recipe) => Some(recipe),
        }
    }

    /// True when the secondary sweep covers attack speeds.
    pub fn is_weapon_craft(&self) -> bool {
        self.recipe().and_then(Recipe::weapon_type).is_some()
    }

    /// Highest level an object placed in this blueprint may have.
    pub fn max_item_level(&self, context: &EvalContext) -> u32 {
        match self {
            Blueprint::Equipment => context.level,
            Blueprint::Craft(recipe) => recipe.level_max,
        }
    }
}

/// Sums and maxima over every filled object.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedStats {
    pub stats: StatVector,
    /// Per-channel maximum over objects.
    pub requirements: SkillPoints,
    /// Per-channel sum over objects.
    pub bonuses: SkillPoints,
    pub object_count: usize,
    pub weapon_type: Option<WeaponType>,
}

impl AggregatedStats {
    fn empty() -> Self {
        Self {
            stats: StatVector::ZERO,
            requirements: SkillPoints::ZERO,
            bonuses: SkillPoints::ZERO,
            object_count: 0,
            weapon_type: None,
        }
    }
}

/// Metrics derived from [`AggregatedStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub melee_dps: f64,
    pub spell_damage: f64,
    pub health: f64,
    pub ehp_proxy: f64,
    pub ehp: f64,
    pub ehp_no_agility: f64,
    pub walk_speed: f64,
    pub sustain: f64,
    pub total_skill_points: i32,
    pub total_requirements: i32,
    pub skill_point_feasible: bool,
    pub assigned_skill_points_required: Option<i32>,
    pub skill_point_deficit: i32,
    /// Assigned plus bonus points per channel.
    pub final_skill_points: SkillPoints,
}

/// Rule checks for one filled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCheck {
    pub slot: usize,
    pub item: ItemId,
    pub level_ok: bool,
    /// Class compatibility for gear, profession for ingredients.
    pub class_ok: bool,
    pub category_ok: bool,
    pub requirement_ok: bool,
}

impl SlotCheck {
    pub fn is_ok(&self) -> bool {
        self.level_ok && self.class_ok && self.category_ok && self.requirement_ok
    }
}

/// Full result of evaluating one assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub stats: AggregatedStats,
    pub metrics: DerivedMetrics,
    pub slot_checks: Vec<SlotCheck>,
    pub warnings: Vec<String>,
    /// Ingredient effectiveness per grid cell; crafts only.
    pub effectiveness: Option<[i32; CRAFT_SLOTS]>,
}

impl Evaluation {
    /// Value of any scorable metric.
    pub fn metric(&self, metric: Metric) -> f64 {
        let m = &self.metrics;
        match metric {
            Metric::Stat(StatField::WalkSpeed) => m.walk_speed,
            Metric::Stat(field) => self.stats.stats[field],
            Metric::SkillPointTotal(channel) => m.final_skill_points[channel] as f64,
            Metric::MeleeDps => m.melee_dps,
            Metric::SpellDamage => m.spell_damage,
            Metric::EhpProxy => m.ehp_proxy,
            Metric::Ehp => m.ehp,
            Metric::EhpNoAgility => m.ehp_no_agility,
            Metric::Sustain => m.sustain,
            Metric::TotalSkillPoints => m.total_skill_points as f64,
            Metric::TotalRequirements => m.total_requirements as f64,
            Metric::SkillPointDeficit => m.skill_point_deficit as f64,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.metrics.skill_point_feasible
    }
}

/// Evaluates assignments of one blueprint for one character.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::{
///     BuildTarget, Catalog, CatalogItem, Category, ItemId, SlotAssignment, StatField, Variant,
/// };
/// use buildforge_scoring::evaluator::{EvalContext, Evaluator};
///
/// let helmet = CatalogItem::new(1, "Cap", Category::Helmet).with_stat(StatField::Health, 120.0);
/// let catalog = Catalog::new(vec![helmet], Vec::new()).unwrap();
/// let evaluator =
///     Evaluator::for_target(&catalog, &BuildTarget::Equipment, EvalContext::new(10)).unwrap();
///
/// let assignment = SlotAssignment::empty(9).with_slot(0, Some(ItemId(1)));
/// let eval = evaluator.evaluate(&assignment, Variant::default());
/// assert_eq!(eval.metrics.health, 5.0 * 10.0 + 5.0 + 120.0);
/// assert!(eval.metrics.skill_point_feasible);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    catalog: &'a Catalog,
    blueprint: Blueprint<'a>,
    context: EvalContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalog: &'a Catalog, blueprint: Blueprint<'a>, context: EvalContext) -> Self {
        Self {
            catalog,
            blueprint,
            context,
        }
    }

    /// Resolves `target` and builds an evaluator for it.
    pub fn for_target(
        catalog: &'a Catalog,
        target: &BuildTarget,
        context: EvalContext,
    ) -> Result<Self, BuildForgeError> {
        let blueprint = Blueprint::resolve(catalog, target).ok_or_else(|| match target {
            BuildTarget::Craft { recipe } => BuildForgeError::UnknownRecipe(recipe.clone()),
            BuildTarget::Equipment => {
                BuildForgeError::DomainModel("equipment target failed to resolve".into())
            }
        })?;
        Ok(Self::new(catalog, blueprint, context))
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn blueprint(&self) -> Blueprint<'a> {
        self.blueprint
    }

    pub fn context(&self) -> EvalContext {
        self.context
    }

    pub fn slots(&self) -> &'static [SlotSpec] {
        self.blueprint.slots()
    }

    /// Evaluates `assignment` under `variant`.
    ///
    /// Slots beyond the assignment's length count as empty.
    pub fn evaluate(&self, assignment: &SlotAssignment, variant: Variant) -> Evaluation {
        let mut warnings = Vec::new();
        let slots = self.slots();

        let mut placed: Vec<(usize, &'a CatalogItem)> = Vec::with_capacity(slots.len());
        for (index, spec) in slots.iter().enumerate() {
            let Some(id) = assignment.get(index) else { continue };
            match self.catalog.get(id) {
                Some(item) => placed.push((index, item)),
                None => warnings.push(format!("unknown item {id} in {} slot", spec.name)),
            }
        }

        match self.blueprint {
            Blueprint::Equipment => self.evaluate_equipment(&placed, warnings),
            Blueprint::Craft(recipe) => self.evaluate_craft(recipe, &placed, variant, warnings),
        }
    }

    fn evaluate_equipment(
        &self,
        placed: &[(usize, &'a CatalogItem)],
        mut warnings: Vec<String>,
    ) -> Evaluation {
        let slots = self.slots();
        let mut agg = AggregatedStats::empty();
        for (_, item) in placed {
            agg.stats += item.stats;
            agg.requirements = agg.requirements.max(&item.requirements);
            agg.bonuses += item.bonuses;
            agg.object_count += 1;
            if item.category == Category::Weapon && agg.weapon_type.is_none() {
                agg.weapon_type = item.weapon_type;
            }
        }

        let mut slot_checks = Vec::with_capacity(placed.len());
        for &(index, item) in placed {
            let spec = &slots[index];
            let others = other_bonuses(&agg.bonuses, &item.bonuses);
            let check = SlotCheck {
                slot: index,
                item: item.id,
                level_ok: item.level <= self.context.level,
                class_ok: self.class_ok(item),
                category_ok: item.category == spec.category,
                requirement_ok: requirements_reachable(&item.requirements, &others),
            };
            self.push_item_warnings(&mut warnings, spec, item, &check);
            slot_checks.push(check);
        }

        let profiles: Vec<SkillPointProfile> = placed
            .iter()
            .map(|(_, item)| SkillPointProfile::new(item.requirements, item.bonuses))
            .collect();

        let inputs = DerivationInputs {
            level: self.context.level,
            defense_multiplier: defense_multiplier(agg.weapon_type),
            melee_speed: 1.0,
            spell_speed: 1.0,
        };
        let metrics = self.derive_metrics(&agg, &profiles, inputs, &mut warnings);

        Evaluation {
            stats: agg,
            metrics,
            slot_checks,
            warnings,
            effectiveness: None,
        }
    }

    fn evaluate_craft(
        &self,
        recipe: &Recipe,
        placed: &[(usize, &'a CatalogItem)],
        variant: Variant,
        mut warnings: Vec<String>,
    ) -> Evaluation {
        let slots = self.slots();
        if recipe.level_min > self.context.level {
            warnings.push(format!(
                "recipe {} needs level {}, character is level {}",
                recipe.name, recipe.level_min, self.context.level
            ));
        }

        let mut grid: [Option<&CatalogItem>; CRAFT_SLOTS] = [None; CRAFT_SLOTS];
        for &(index, item) in placed {
            if index < CRAFT_SLOTS {
                grid[index] = Some(item);
            }
        }
        let crafted = craft::combine(recipe, &grid, &variant);

        let mut slot_checks = Vec::with_capacity(placed.len());
        for &(index, item) in placed {
            let spec = &slots[index];
            let check = SlotCheck {
                slot: index,
                item: item.id,
                level_ok: item.level <= recipe.level_max,
                class_ok: item.is_compatible_with(&recipe.profession),
                category_ok: item.category == spec.category,
                requirement_ok: requirements_reachable(&item.requirements, &SkillPoints::ZERO),
            };
            self.push_item_warnings(&mut warnings, spec, item, &check);
            slot_checks.push(check);
        }

        let weapon_type = recipe.weapon_type();
        let agg = AggregatedStats {
            stats: crafted.stats,
            requirements: crafted.requirements,
            bonuses: crafted.bonuses,
            object_count: placed.len(),
            weapon_type,
        };

        let speed = weapon_type.and(variant.attack_speed);
        let inputs = DerivationInputs {
            level: self.context.level,
            defense_multiplier: defense_multiplier(weapon_type),
            melee_speed: speed.map_or(1.0, |s| s.melee_multiplier()),
            spell_speed: speed.map_or(1.0, |s| s.spell_multiplier()),
        };
        let profiles = [SkillPointProfile::new(crafted.requirements, crafted.bonuses)];
        let metrics = self.derive_metrics(&agg, &profiles, inputs, &mut warnings);

        Evaluation {
            stats: agg,
            metrics,
            slot_checks,
            warnings,
            effectiveness: Some(crafted.effectiveness),
        }
    }

    fn derive_metrics(
        &self,
        agg: &AggregatedStats,
        profiles: &[SkillPointProfile],
        inputs: DerivationInputs,
        warnings: &mut Vec<String>,
    ) -> DerivedMetrics {
        let budget = skill_point_budget(self.context.level);
        let analysis = analyze(profiles, budget);

        let (final_skill_points, deficit) = match analysis.assignment {
            Some(assigned) => (assigned + agg.bonuses, 0),
            None => {
                warnings.push(format!(
                    "skill points infeasible at level {}",
                    self.context.level
                ));
                let mut fallback = SkillPoints::ZERO;
                for channel in SkillPoint::ALL {
                    fallback[channel] = agg.requirements[channel].min(SKILL_POINT_CAP);
                }
                let deficit = analyze_unbounded(profiles)
                    .required
                    .map_or(UNREACHABLE_DEFICIT, |needed| (needed - budget).max(0));
                (fallback + agg.bonuses, deficit)
            }
        };

        let proxies = derive(&agg.stats, &final_skill_points, inputs);

        DerivedMetrics {
            melee_dps: proxies.melee_dps,
            spell_damage: proxies.spell_damage,
            health: proxies.health,
            ehp_proxy: proxies.ehp_proxy,
            ehp: proxies.ehp,
            ehp_no_agility: proxies.ehp_no_agility,
            walk_speed: agg.stats[StatField::WalkSpeed],
            sustain: proxies.sustain,
            total_skill_points: agg.bonuses.total(),
            total_requirements: agg.requirements.total(),
            skill_point_feasible: analysis.feasible,
            assigned_skill_points_required: analysis.required,
            skill_point_deficit: deficit,
            final_skill_points,
        }
    }

    fn class_ok(&self, item: &CatalogItem) -> bool {
        let Some(class) = self.context.class else {
            return true;
        };
        match item.weapon_type {
            Some(weapon_type) => weapon_type.class() == class,
            None => item.is_compatible_with(class.name()),
        }
    }

    fn push_item_warnings(
        &self,
        warnings: &mut Vec<String>,
        spec: &SlotSpec,
        item: &CatalogItem,
        check: &SlotCheck,
    ) {
        let name = &item.name;
        if item.restricted {
            warnings.push(format!("{name} is restricted"));
        }
        if item.deprecated {
            warnings.push(format!("{name} is deprecated"));
        }
        if !check.level_ok {
            let cap = self.blueprint.max_item_level(&self.context);
            warnings.push(format!("{name} is level {}, above {cap}", item.level));
        }
        if !check.class_ok {
            match self.blueprint {
                Blueprint::Equipment => warnings.push(format!("{name} is not usable by this class")),
                Blueprint::Craft(recipe) => warnings.push(format!(
                    "{name} cannot be used in {} recipes",
                    recipe.profession
                )),
            }
        }
        if !check.category_ok {
            warnings.push(format!(
                "{name} is a {} and does not fit the {} slot",
                item.category, spec.name
            ));
        }
    }
}

fn defense_multiplier(weapon_type: Option<WeaponType>) -> f64 {
    weapon_type.map_or(1.0, WeaponType::defense_multiplier)
}

fn other_bonuses(total: &SkillPoints, own: &SkillPoints) -> SkillPoints {
    let mut out = *total;
    for channel in SkillPoint::ALL {
        out[channel] -= own[channel];
    }
    out
}

fn requirements_reachable(requirements: &SkillPoints, bonus: &SkillPoints) -> bool {
    SkillPoint::ALL
        .iter()
        .all(|&c| requirements[c] <= 0 || requirements[c] <= SKILL_POINT_CAP + bonus[c])
}
