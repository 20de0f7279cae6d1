//! Catalog objects: equipment, weapons, crafting ingredients and recipes.

use std::fmt;

use super::stats::{SkillPoints, StatField, StatVector};

/// Catalog identity of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Slot category an object can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Category {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    Ring,
    Bracelet,
    Necklace,
    Weapon,
    Ingredient,
}

impl Category {
    pub const fn name(self) -> &'static str {
        match self {
            Category::Helmet => "helmet",
            Category::Chestplate => "chestplate",
            Category::Leggings => "leggings",
            Category::Boots => "boots",
            Category::Ring => "ring",
            Category::Bracelet => "bracelet",
            Category::Necklace => "necklace",
            Category::Weapon => "weapon",
            Category::Ingredient => "ingredient",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Character class. Each weapon type belongs to exactly one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ClassKind {
    Warrior,
    Archer,
    Mage,
    Assassin,
    Shaman,
}

impl ClassKind {
    pub const fn name(self) -> &'static str {
        match self {
            ClassKind::Warrior => "warrior",
            ClassKind::Archer => "archer",
            ClassKind::Mage => "mage",
            ClassKind::Assassin => "assassin",
            ClassKind::Shaman => "shaman",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WeaponType {
    Spear,
    Bow,
    Wand,
    Dagger,
    Relik,
}

impl WeaponType {
    pub const fn class(self) -> ClassKind {
        match self {
            WeaponType::Spear => ClassKind::Warrior,
            WeaponType::Bow => ClassKind::Archer,
            WeaponType::Wand => ClassKind::Mage,
            WeaponType::Dagger => ClassKind::Assassin,
            WeaponType::Relik => ClassKind::Shaman,
        }
    }

    /// Archetype defense multiplier used by the effective-HP formula.
    pub const fn defense_multiplier(self) -> f64 {
        match self {
            WeaponType::Spear => 1.0,
            WeaponType::Bow => 0.7,
            WeaponType::Wand => 0.8,
            WeaponType::Dagger => 1.0,
            WeaponType::Relik => 0.6,
        }
    }
}

/// Effectiveness modifiers an ingredient applies to its neighbours, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionModifiers {
    pub left: i32,
    pub right: i32,
    pub above: i32,
    pub below: i32,
    pub touching: i32,
    pub not_touching: i32,
}

impl PositionModifiers {
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// A read-only catalog object.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub weapon_type: Option<WeaponType>,
    pub level: u32,
    /// Class names for gear, profession names for ingredients. Empty means
    /// compatible with everything.
    pub compat: Vec<String>,
    pub stats: StatVector,
    pub requirements: SkillPoints,
    pub bonuses: SkillPoints,
    pub restricted: bool,
    pub deprecated: bool,
    pub position: PositionModifiers,
}

impl CatalogItem {
    pub fn new(id: u32, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            category,
            weapon_type: None,
            level: 1,
            compat: Vec::new(),
            stats: StatVector::ZERO,
            requirements: SkillPoints::ZERO,
            bonuses: SkillPoints::ZERO,
            restricted: false,
            deprecated: false,
            position: PositionModifiers::default(),
        }
    }

    /// Creates a weapon; its class tag is derived from the weapon type.
    pub fn weapon(id: u32, name: impl Into<String>, weapon_type: WeaponType) -> Self {
        let mut item = Self::new(id, name, Category::Weapon);
        item.weapon_type = Some(weapon_type);
        item.compat = vec![weapon_type.class().name().to_string()];
        item
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_stat(mut self, field: StatField, value: f64) -> Self {
        self.stats[field] = value;
        self
    }

    pub fn with_requirements(mut self, requirements: SkillPoints) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_bonuses(mut self, bonuses: SkillPoints) -> Self {
        self.bonuses = bonuses;
        self
    }

    pub fn with_compat(mut self, tag: impl Into<String>) -> Self {
        self.compat.push(tag.into());
        self
    }

    pub fn with_position(mut self, position: PositionModifiers) -> Self {
        self.position = position;
        self
    }

    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// True if `tag` is listed, or the item carries no compatibility tags.
    pub fn is_compatible_with(&self, tag: &str) -> bool {
        self.compat.is_empty() || self.compat.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// What a recipe produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CraftKind {
    Weapon(WeaponType),
    Armor(Category),
}

/// A crafting recipe: the base object ingredients are combined into.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub profession: String,
    pub kind: CraftKind,
    pub level_min: u32,
    pub level_max: u32,
    pub base: StatVector,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        profession: impl Into<String>,
        kind: CraftKind,
        level_min: u32,
        level_max: u32,
    ) -> Self {
        Self {
            name: name.into(),
            profession: profession.into(),
            kind,
            level_min,
            level_max,
            base: StatVector::ZERO,
        }
    }

    pub fn with_base(mut self, field: StatField, value: f64) -> Self {
        self.base[field] = value;
        self
    }

    pub fn weapon_type(&self) -> Option<WeaponType> {
        match self.kind {
            CraftKind::Weapon(w) => Some(w),
            CraftKind::Armor(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_carries_class_tag() {
        let wand = CatalogItem::weapon(1, "Wand", WeaponType::Wand);
        assert!(wand.is_compatible_with("mage"));
        assert!(wand.is_compatible_with("Mage"));
        assert!(!wand.is_compatible_with("warrior"));
    }

    #[test]
    fn test_untagged_item_is_universal() {
        let helm = CatalogItem::new(2, "Cap", Category::Helmet);
        assert!(helm.is_compatible_with("shaman"));
    }

    #[test]
    fn test_defense_multiplier() {
        assert_eq!(WeaponType::Relik.defense_multiplier(), 0.6);
        assert_eq!(WeaponType::Spear.defense_multiplier(), 1.0);
    }
}
