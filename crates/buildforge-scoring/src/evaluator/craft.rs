//! Crafting grid: ingredient effectiveness and the crafted object.

use buildforge_core::domain::{
    CatalogItem, Recipe, SkillPoints, StatVector, Variant, CRAFT_COLUMNS, CRAFT_SLOTS,
};

/// Quality multiplier per material tier (1-based).
pub const MATERIAL_TIER_MULT: [f64; 3] = [1.0, 1.25, 1.4];

/// Multiplier applied to recipe base stats for the chosen material tiers.
pub fn material_multiplier(variant: &Variant) -> f64 {
    let sum: f64 = variant
        .material_tiers
        .iter()
        .map(|&t| {
            let idx = (t.max(1) as usize - 1).min(MATERIAL_TIER_MULT.len() - 1);
            MATERIAL_TIER_MULT[idx]
        })
        .sum();
    sum / variant.material_tiers.len() as f64
}

fn cell(index: usize) -> (i32, i32) {
    ((index / CRAFT_COLUMNS) as i32, (index % CRAFT_COLUMNS) as i32)
}

/// Effectiveness of every grid cell in percent.
///
/// Each filled ingredient applies its position modifiers to every *other*
/// filled cell. Empty cells stay at 100 but contribute nothing.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::{CatalogItem, Category, PositionModifiers};
/// use buildforge_scoring::evaluator::effectiveness;
///
/// let booster = CatalogItem::new(1, "Booster", Category::Ingredient)
///     .with_position(PositionModifiers { below: 20, ..Default::default() });
/// let plain = CatalogItem::new(2, "Plain", Category::Ingredient);
///
/// // Booster top-left, plain items below it and beside it.
/// let grid = [Some(&booster), Some(&plain), Some(&plain), None, None, None];
/// let eff = effectiveness(&grid);
/// assert_eq!(eff[2], 120);
/// assert_eq!(eff[1], 100);
/// ```
pub fn effectiveness(grid: &[Option<&CatalogItem>]) -> [i32; CRAFT_SLOTS] {
    let mut eff = [100; CRAFT_SLOTS];
    for (p, source) in grid.iter().enumerate().take(CRAFT_SLOTS) {
        let Some(source) = source else { continue };
        let m = &source.position;
        if m.is_neutral() {
            continue;
        }
        let (pr, pc) = cell(p);
        for (q, target) in grid.iter().enumerate().take(CRAFT_SLOTS) {
            if q == p || target.is_none() {
                continue;
            }
            let (qr, qc) = cell(q);
            let mut delta = 0;
            if qr == pr && qc < pc {
                delta += m.left;
            }
            if qr == pr && qc > pc {
                delta += m.right;
            }
            if qc == pc && qr < pr {
                delta += m.above;
            }
            if qc == pc && qr > pr {
                delta += m.below;
            }
            if (qr - pr).abs() + (qc - pc).abs() == 1 {
                delta += m.touching;
            } else {
                delta += m.not_touching;
            }
            eff[q] += delta;
        }
    }
    eff
}

/// Single object produced by combining a recipe with its ingredients.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CraftedObject {
    pub stats: StatVector,
    pub requirements: SkillPoints,
    pub bonuses: SkillPoints,
    pub effectiveness: [i32; CRAFT_SLOTS],
}

fn scale_points(points: &SkillPoints, factor: f64) -> SkillPoints {
    let mut out = SkillPoints::ZERO;
    for (a, b) in out.0.iter_mut().zip(points.0.iter()) {
        *a = (*b as f64 * factor).round() as i32;
    }
    out
}

pub(crate) fn combine(
    recipe: &Recipe,
    grid: &[Option<&CatalogItem>],
    variant: &Variant,
) -> CraftedObject {
    let eff = effectiveness(grid);
    let mut stats = recipe.base.scaled(material_multiplier(variant));
    let mut requirements = SkillPoints::ZERO;
    let mut bonuses = SkillPoints::ZERO;

    for (i, ingredient) in grid.iter().enumerate().take(CRAFT_SLOTS) {
        let Some(ingredient) = ingredient else { continue };
        let factor = eff[i] as f64 / 100.0;
        stats += ingredient.stats.scaled(factor);
        requirements += scale_points(&ingredient.requirements, factor);
        bonuses += scale_points(&ingredient.bonuses, factor);
    }

    for v in requirements.0.iter_mut() {
        *v = (*v).max(0);
    }

    CraftedObject {
        stats,
        requirements,
        bonuses,
        effectiveness: eff,
    }
}
