//! Slot layouts, assignments and secondary variants.

use std::fmt;

use smallvec::SmallVec;

use super::item::{Category, ItemId};

/// Maximum slot count of any build target.
pub const MAX_SLOTS: usize = 9;

/// Number of crafting grid columns.
pub const CRAFT_COLUMNS: usize = 2;

/// Number of ingredient slots in a craft.
pub const CRAFT_SLOTS: usize = 6;

/// Fixed-length sequence of slot values; `None` is the empty sentinel.
///
/// Assignments are values: expansion produces a new assignment through
/// [`SlotAssignment::with_slot`] instead of mutating a shared one.
///
/// # Example
///
/// ```
/// use buildforge_core::domain::{ItemId, SlotAssignment};
///
/// let empty = SlotAssignment::empty(3);
/// let next = empty.with_slot(1, Some(ItemId(42)));
///
/// assert_eq!(empty.filled_count(), 0);
/// assert_eq!(next.get(1), Some(ItemId(42)));
/// assert_ne!(empty, next);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotAssignment(SmallVec<[Option<ItemId>; MAX_SLOTS]>);

impl SlotAssignment {
    pub fn empty(len: usize) -> Self {
        Self(SmallVec::from_elem(None, len))
    }

    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<ItemId>>,
    {
        Self(slots.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`; out-of-range reads as empty.
    pub fn get(&self, index: usize) -> Option<ItemId> {
        self.0.get(index).copied().flatten()
    }

    /// Returns a new assignment with `index` set to `value`.
    pub fn with_slot(&self, index: usize, value: Option<ItemId>) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.0.get_mut(index) {
            *slot = value;
        }
        next
    }

    /// Resizes to `len`, padding with empties.
    pub fn resized(&self, len: usize) -> Self {
        let mut next = self.clone();
        next.0.resize(len, None);
        next
    }

    pub fn slots(&self) -> &[Option<ItemId>] {
        &self.0
    }

    /// Filled slots as `(index, id)` pairs.
    pub fn filled(&self) -> impl Iterator<Item = (usize, ItemId)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|id| (i, id)))
    }

    pub fn filled_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.0.iter().any(|v| *v == Some(id))
    }

    pub fn contains_all(&self, ids: &[ItemId]) -> bool {
        ids.iter().all(|id| self.contains(*id))
    }
}

impl fmt::Display for SlotAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(id) => write!(f, "{id}")?,
                None => f.write_str("-")?,
            }
        }
        f.write_str("]")
    }
}

/// Static description of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub category: Category,
    pub allow_empty: bool,
}

impl SlotSpec {
    const fn new(name: &'static str, category: Category, allow_empty: bool) -> Self {
        Self {
            name,
            category,
            allow_empty,
        }
    }
}

/// Gear slots of an equipment build, in assignment order.
pub const EQUIPMENT_SLOTS: [SlotSpec; MAX_SLOTS] = [
    SlotSpec::new("helmet", Category::Helmet, true),
    SlotSpec::new("chestplate", Category::Chestplate, true),
    SlotSpec::new("leggings", Category::Leggings, true),
    SlotSpec::new("boots", Category::Boots, true),
    SlotSpec::new("ring1", Category::Ring, true),
    SlotSpec::new("ring2", Category::Ring, true),
    SlotSpec::new("bracelet", Category::Bracelet, true),
    SlotSpec::new("necklace", Category::Necklace, true),
    SlotSpec::new("weapon", Category::Weapon, false),
];

/// Ingredient cells of a craft, row-major over the grid.
pub const CRAFT_GRID: [SlotSpec; CRAFT_SLOTS] = [
    SlotSpec::new("ingredient1", Category::Ingredient, true),
    SlotSpec::new("ingredient2", Category::Ingredient, true),
    SlotSpec::new("ingredient3", Category::Ingredient, true),
    SlotSpec::new("ingredient4", Category::Ingredient, true),
    SlotSpec::new("ingredient5", Category::Ingredient, true),
    SlotSpec::new("ingredient6", Category::Ingredient, true),
];

/// The composite object being optimized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    /// Nine gear slots worn by a character.
    Equipment,
    /// Six ingredient slots combined through the named recipe.
    Craft { recipe: String },
}

impl BuildTarget {
    pub fn craft(recipe: impl Into<String>) -> Self {
        BuildTarget::Craft {
            recipe: recipe.into(),
        }
    }

    pub fn slots(&self) -> &'static [SlotSpec] {
        match self {
            BuildTarget::Equipment => &EQUIPMENT_SLOTS,
            BuildTarget::Craft { .. } => &CRAFT_GRID,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots().len()
    }
}

/// Speed class of a crafted weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AttackSpeed {
    Slow,
    Normal,
    Fast,
}

impl AttackSpeed {
    pub const ALL: [AttackSpeed; 3] = [AttackSpeed::Slow, AttackSpeed::Normal, AttackSpeed::Fast];

    /// Base DPS multiplier for melee damage.
    pub const fn melee_multiplier(self) -> f64 {
        match self {
            AttackSpeed::Slow => 0.85,
            AttackSpeed::Normal => 1.0,
            AttackSpeed::Fast => 1.1,
        }
    }

    /// Base DPS multiplier for spell conversion.
    pub const fn spell_multiplier(self) -> f64 {
        match self {
            AttackSpeed::Slow => 1.25,
            AttackSpeed::Normal => 1.0,
            AttackSpeed::Fast => 0.8,
        }
    }
}

/// Highest material quality tier.
pub const MAX_MATERIAL_TIER: u8 = 3;

/// One combination of secondary dimensions.
///
/// Equipment builds only ever use [`Variant::default`]; crafts sweep material
/// tiers and, for weapons, the attack speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    pub material_tiers: [u8; 2],
    pub attack_speed: Option<AttackSpeed>,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            material_tiers: [MAX_MATERIAL_TIER; 2],
            attack_speed: None,
        }
    }
}

impl Variant {
    pub fn new(material_tiers: [u8; 2], attack_speed: Option<AttackSpeed>) -> Self {
        Self {
            material_tiers,
            attack_speed,
        }
    }

    /// Every variant of a craft, in a fixed order.
    pub fn enumerate(weapon: bool) -> Vec<Variant> {
        let speeds: Vec<Option<AttackSpeed>> = if weapon {
            AttackSpeed::ALL.iter().copied().map(Some).collect()
        } else {
            vec![None]
        };
        let mut out = Vec::with_capacity(speeds.len() * 9);
        for speed in speeds {
            for t1 in 1..=MAX_MATERIAL_TIER {
                for t2 in 1..=MAX_MATERIAL_TIER {
                    out.push(Variant::new([t1, t2], speed));
                }
            }
        }
        out
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T{}/T{}",
            self.material_tiers[0], self.material_tiers[1]
        )?;
        if let Some(speed) = self.attack_speed {
            write!(f, " {speed:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_slot_does_not_mutate_original() {
        let a = SlotAssignment::empty(4);
        let b = a.with_slot(2, Some(ItemId(5)));
        assert_eq!(a.get(2), None);
        assert_eq!(b.get(2), Some(ItemId(5)));
        assert_eq!(b.filled_count(), 1);
    }

    #[test]
    fn test_position_matters_for_identity() {
        let a = SlotAssignment::from_slots([Some(ItemId(1)), Some(ItemId(2))]);
        let b = SlotAssignment::from_slots([Some(ItemId(2)), Some(ItemId(1))]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_contains_all() {
        let a = SlotAssignment::from_slots([Some(ItemId(1)), None, Some(ItemId(3))]);
        assert!(a.contains_all(&[ItemId(1), ItemId(3)]));
        assert!(!a.contains_all(&[ItemId(1), ItemId(2)]));
        assert!(a.contains_all(&[]));
    }

    #[test]
    fn test_layouts() {
        assert_eq!(BuildTarget::Equipment.slot_count(), 9);
        assert_eq!(BuildTarget::craft("x").slot_count(), 6);
        assert!(!BuildTarget::Equipment.slots()[8].allow_empty);
    }

    #[test]
    fn test_variant_enumeration() {
        assert_eq!(Variant::enumerate(false).len(), 9);
        assert_eq!(Variant::enumerate(true).len(), 27);
        assert_eq!(format!("{}", Variant::default()), "T3/T3");
    }

    #[test]
    fn test_display() {
        let a = SlotAssignment::from_slots([Some(ItemId(4)), None]);
        assert_eq!(a.to_string(), "[#4, -]");
    }
}
