//! Domain model: catalog objects, slots and attribute vectors
//!
//! - `Catalog`: immutable index over every candidate object and recipe
//! - `CatalogItem` / `Recipe`: read-only catalog entries
//! - `SlotAssignment`: one candidate (or empty) per slot
//! - `StatVector` / `SkillPoints`: numeric attributes

mod catalog;
mod item;
mod slot;
mod stats;

pub use catalog::Catalog;
pub use item::{
    CatalogItem, Category, ClassKind, CraftKind, ItemId, PositionModifiers, Recipe, WeaponType,
};
pub use slot::{
    AttackSpeed, BuildTarget, SlotAssignment, SlotSpec, Variant, CRAFT_COLUMNS, CRAFT_GRID,
    CRAFT_SLOTS, EQUIPMENT_SLOTS, MAX_MATERIAL_TIER, MAX_SLOTS,
};
pub use stats::{SkillPoint, SkillPoints, StatField, StatGroup, StatVector};
