//! Equipment fixtures.
//!
//! Neutral gear fills every non-weapon slot with a little health and no
//! requirements, so tests can focus on the one slot that matters.

use buildforge_core::domain::{
    Catalog, CatalogItem, Category, ItemId, SkillPoints, StatField, WeaponType,
};

pub const NEUTRAL_HELMET: ItemId = ItemId(101);
pub const NEUTRAL_CHESTPLATE: ItemId = ItemId(102);
pub const NEUTRAL_LEGGINGS: ItemId = ItemId(103);
pub const PLAIN_BOOTS: ItemId = ItemId(104);
pub const NEUTRAL_RING: ItemId = ItemId(105);
pub const NEUTRAL_BRACELET: ItemId = ItemId(106);
pub const NEUTRAL_NECKLACE: ItemId = ItemId(107);

pub const EMBER_WAND: ItemId = ItemId(201);
pub const FROST_WAND: ItemId = ItemId(202);
pub const WAR_PIKE: ItemId = ItemId(203);

pub const WINDRUNNERS: ItemId = ItemId(301);
pub const OAK_SPEAR: ItemId = ItemId(302);

pub const GALE_BOW: ItemId = ItemId(401);
pub const FEATHER_CHARM: ItemId = ItemId(402);
pub const TRAINING_BOW: ItemId = ItemId(403);
pub const RUBY_PENDANT: ItemId = ItemId(404);
pub const JADE_PENDANT: ItemId = ItemId(405);

/// One requirement-free item per non-weapon category.
pub fn neutral_items() -> Vec<CatalogItem> {
    let health = |item: CatalogItem| item.with_stat(StatField::Health, 100.0);
    vec![
        health(CatalogItem::new(NEUTRAL_HELMET.0, "Plain Cap", Category::Helmet)),
        health(CatalogItem::new(NEUTRAL_CHESTPLATE.0, "Plain Tunic", Category::Chestplate)),
        health(CatalogItem::new(NEUTRAL_LEGGINGS.0, "Plain Trousers", Category::Leggings)),
        health(CatalogItem::new(PLAIN_BOOTS.0, "Plain Boots", Category::Boots)),
        health(CatalogItem::new(NEUTRAL_RING.0, "Plain Band", Category::Ring)),
        health(CatalogItem::new(NEUTRAL_BRACELET.0, "Plain Bangle", Category::Bracelet)),
        health(CatalogItem::new(NEUTRAL_NECKLACE.0, "Plain Chain", Category::Necklace)),
    ]
}

/// Neutral gear, two mage wands (4500 and 3800 base DPS) and a stronger
/// warrior spear that a mage cannot wield.
pub fn mage_catalog() -> Catalog {
    let mut items = neutral_items();
    items.push(
        CatalogItem::weapon(EMBER_WAND.0, "Ember Wand", WeaponType::Wand)
            .with_stat(StatField::BaseDps, 4500.0),
    );
    items.push(
        CatalogItem::weapon(FROST_WAND.0, "Frost Wand", WeaponType::Wand)
            .with_stat(StatField::BaseDps, 3800.0),
    );
    items.push(
        CatalogItem::weapon(WAR_PIKE.0, "War Pike", WeaponType::Spear)
            .with_stat(StatField::BaseDps, 6000.0),
    );
    catalog(items)
}

/// Mage catalog without any weapon a mage can wield.
pub fn unarmed_mage_catalog() -> Catalog {
    let mut items = neutral_items();
    items.push(
        CatalogItem::weapon(WAR_PIKE.0, "War Pike", WeaponType::Spear)
            .with_stat(StatField::BaseDps, 6000.0),
    );
    catalog(items)
}

/// Neutral gear plus boots with +40 walk speed and one spear.
pub fn speed_catalog() -> Catalog {
    let mut items = neutral_items();
    items.push(
        CatalogItem::new(WINDRUNNERS.0, "Windrunners", Category::Boots)
            .with_stat(StatField::WalkSpeed, 40.0),
    );
    items.push(
        CatalogItem::weapon(OAK_SPEAR.0, "Oak Spear", WeaponType::Spear)
            .with_stat(StatField::BaseDps, 1000.0),
    );
    catalog(items)
}

/// A bow needing 125 agility, a plain charm granting +30 agility and two
/// pendants that outrank the charm on every heuristic.
pub fn agility_catalog() -> Catalog {
    let mut items = neutral_items();
    items.push(
        CatalogItem::weapon(GALE_BOW.0, "Gale Bow", WeaponType::Bow)
            .with_stat(StatField::BaseDps, 3000.0)
            .with_requirements(SkillPoints::new(0, 0, 0, 0, 125)),
    );
    items.push(
        CatalogItem::weapon(TRAINING_BOW.0, "Training Bow", WeaponType::Bow)
            .with_stat(StatField::BaseDps, 400.0),
    );
    items.push(
        CatalogItem::new(FEATHER_CHARM.0, "Feather Charm", Category::Necklace)
            .with_bonuses(SkillPoints::new(0, 0, 0, 0, 30)),
    );
    items.push(
        CatalogItem::new(RUBY_PENDANT.0, "Ruby Pendant", Category::Necklace)
            .with_stat(StatField::Health, 900.0)
            .with_stat(StatField::SpellDamagePct, 12.0),
    );
    items.push(
        CatalogItem::new(JADE_PENDANT.0, "Jade Pendant", Category::Necklace)
            .with_stat(StatField::Health, 700.0)
            .with_stat(StatField::ManaRegen, 6.0),
    );
    catalog(items)
}

fn catalog(items: Vec<CatalogItem>) -> Catalog {
    Catalog::new(items, Vec::new()).expect("fixture ids are unique")
}
