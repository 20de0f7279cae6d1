//! Crafting fixtures: two recipes and a handful of ingredients.

use buildforge_core::domain::{
    Catalog, CatalogItem, Category, CraftKind, ItemId, PositionModifiers, Recipe, SkillPoints,
    StatField, WeaponType,
};

pub const SPEAR_RECIPE: &str = "spear-lv30";
pub const BOOTS_RECIPE: &str = "boots-lv30";

pub const COPPER_SHARD: ItemId = ItemId(601);
pub const WOLF_FANG: ItemId = ItemId(602);
pub const SILK_STRAND: ItemId = ItemId(603);
pub const EMBER_DUST: ItemId = ItemId(604);
pub const HEAVY_ORE: ItemId = ItemId(605);
pub const SWIFT_FEATHER: ItemId = ItemId(606);

pub fn recipes() -> Vec<Recipe> {
    vec![
        Recipe::new(
            SPEAR_RECIPE,
            "weaponsmithing",
            CraftKind::Weapon(WeaponType::Spear),
            20,
            30,
        )
        .with_base(StatField::BaseDps, 300.0),
        Recipe::new(
            BOOTS_RECIPE,
            "tailoring",
            CraftKind::Armor(Category::Boots),
            20,
            30,
        )
        .with_base(StatField::Health, 200.0),
    ]
}

pub fn ingredients() -> Vec<CatalogItem> {
    let ingredient = |id: ItemId, name: &str| CatalogItem::new(id.0, name, Category::Ingredient);
    vec![
        ingredient(COPPER_SHARD, "Copper Shard")
            .with_compat("weaponsmithing")
            .with_level(10)
            .with_stat(StatField::MeleeDamageRaw, 20.0)
            .with_requirements(SkillPoints::new(10, 0, 0, 0, 0)),
        ingredient(WOLF_FANG, "Wolf Fang")
            .with_compat("weaponsmithing")
            .with_level(25)
            .with_stat(StatField::MeleeDamagePct, 10.0)
            .with_position(PositionModifiers {
                touching: 20,
                ..Default::default()
            }),
        ingredient(SILK_STRAND, "Silk Strand")
            .with_compat("tailoring")
            .with_stat(StatField::WalkSpeed, 6.0),
        ingredient(EMBER_DUST, "Ember Dust")
            .with_stat(StatField::SpellDamagePct, 8.0),
        ingredient(HEAVY_ORE, "Heavy Ore")
            .with_compat("weaponsmithing")
            .with_level(50)
            .with_stat(StatField::MeleeDamageRaw, 80.0),
        ingredient(SWIFT_FEATHER, "Swift Feather")
            .with_compat("tailoring")
            .with_compat("weaponsmithing")
            .with_stat(StatField::WalkSpeed, 10.0)
            .with_position(PositionModifiers {
                below: 15,
                ..Default::default()
            }),
    ]
}

pub fn crafting_catalog() -> Catalog {
    Catalog::new(ingredients(), recipes()).expect("fixture ids are unique")
}
