//! Numeric attribute vectors.
//!
//! Every catalog object carries a fixed set of named numeric attributes
//! ([`StatVector`]) plus two five-channel skill-point vectors
//! ([`SkillPoints`]): one for requirements and one for bonuses.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};

/// Tracked additive attributes of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StatField {
    /// Average damage per second of a weapon.
    BaseDps,
    MeleeDamagePct,
    MeleeDamageRaw,
    SpellDamagePct,
    SpellDamageRaw,
    /// Flat health bonus.
    Health,
    HealthRegen,
    LifeSteal,
    ManaRegen,
    ManaSteal,
    WalkSpeed,
}

impl StatField {
    /// Number of tracked fields.
    pub const COUNT: usize = 11;

    /// All fields in index order.
    pub const ALL: [StatField; Self::COUNT] = [
        StatField::BaseDps,
        StatField::MeleeDamagePct,
        StatField::MeleeDamageRaw,
        StatField::SpellDamagePct,
        StatField::SpellDamageRaw,
        StatField::Health,
        StatField::HealthRegen,
        StatField::LifeSteal,
        StatField::ManaRegen,
        StatField::ManaSteal,
        StatField::WalkSpeed,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name used in labels and logs.
    pub const fn name(self) -> &'static str {
        match self {
            StatField::BaseDps => "base_dps",
            StatField::MeleeDamagePct => "melee_damage_pct",
            StatField::MeleeDamageRaw => "melee_damage_raw",
            StatField::SpellDamagePct => "spell_damage_pct",
            StatField::SpellDamageRaw => "spell_damage_raw",
            StatField::Health => "health",
            StatField::HealthRegen => "health_regen",
            StatField::LifeSteal => "life_steal",
            StatField::ManaRegen => "mana_regen",
            StatField::ManaSteal => "mana_steal",
            StatField::WalkSpeed => "walk_speed",
        }
    }

    /// Coarse grouping used by cheap heuristics.
    pub const fn group(self) -> StatGroup {
        match self {
            StatField::BaseDps
            | StatField::MeleeDamagePct
            | StatField::MeleeDamageRaw
            | StatField::SpellDamagePct
            | StatField::SpellDamageRaw => StatGroup::Offense,
            StatField::Health | StatField::HealthRegen => StatGroup::Defense,
            StatField::LifeSteal
            | StatField::ManaRegen
            | StatField::ManaSteal
            | StatField::WalkSpeed => StatGroup::Utility,
        }
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offense / defense / utility grouping of [`StatField`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatGroup {
    Offense,
    Defense,
    Utility,
}

/// Dense vector of [`StatField`] values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatVector([f64; StatField::COUNT]);

impl StatVector {
    pub const ZERO: StatVector = StatVector([0.0; StatField::COUNT]);

    pub fn new() -> Self {
        Self::ZERO
    }

    /// Builds a vector from `(field, value)` pairs; later pairs overwrite.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (StatField, f64)>,
    {
        let mut v = Self::ZERO;
        for (field, value) in pairs {
            v[field] = value;
        }
        v
    }

    #[inline]
    pub fn get(&self, field: StatField) -> f64 {
        self.0[field.index()]
    }

    /// Returns a copy with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        for v in out.0.iter_mut() {
            *v *= factor;
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatField, f64)> + '_ {
        StatField::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

impl Index<StatField> for StatVector {
    type Output = f64;

    fn index(&self, field: StatField) -> &f64 {
        &self.0[field.index()]
    }
}

impl IndexMut<StatField> for StatVector {
    fn index_mut(&mut self, field: StatField) -> &mut f64 {
        &mut self.0[field.index()]
    }
}

impl Add for StatVector {
    type Output = StatVector;

    fn add(mut self, rhs: StatVector) -> StatVector {
        self += rhs;
        self
    }
}

impl AddAssign for StatVector {
    fn add_assign(&mut self, rhs: StatVector) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}

/// One of the five skill-point channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SkillPoint {
    Strength,
    Dexterity,
    Intelligence,
    Defense,
    Agility,
}

impl SkillPoint {
    pub const COUNT: usize = 5;

    pub const ALL: [SkillPoint; Self::COUNT] = [
        SkillPoint::Strength,
        SkillPoint::Dexterity,
        SkillPoint::Intelligence,
        SkillPoint::Defense,
        SkillPoint::Agility,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            SkillPoint::Strength => "strength",
            SkillPoint::Dexterity => "dexterity",
            SkillPoint::Intelligence => "intelligence",
            SkillPoint::Defense => "defense",
            SkillPoint::Agility => "agility",
        }
    }
}

impl fmt::Display for SkillPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-channel skill-point values (requirements, bonuses or assignments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SkillPoints(pub [i32; SkillPoint::COUNT]);

impl SkillPoints {
    pub const ZERO: SkillPoints = SkillPoints([0; SkillPoint::COUNT]);

    pub const fn new(str: i32, dex: i32, int: i32, def: i32, agi: i32) -> Self {
        SkillPoints([str, dex, int, def, agi])
    }

    /// A vector with a single non-zero channel.
    pub fn only(channel: SkillPoint, value: i32) -> Self {
        let mut sp = Self::ZERO;
        sp[channel] = value;
        sp
    }

    #[inline]
    pub fn get(&self, channel: SkillPoint) -> i32 {
        self.0[channel.index()]
    }

    /// Sum across all channels.
    pub fn total(&self) -> i32 {
        self.0.iter().sum()
    }

    /// Element-wise maximum.
    pub fn max(&self, other: &SkillPoints) -> SkillPoints {
        let mut out = *self;
        for (a, b) in out.0.iter_mut().zip(other.0.iter()) {
            *a = (*a).max(*b);
        }
        out
    }

    /// True if every channel of `self` is `<=` the same channel of `other`.
    pub fn le_all(&self, other: &SkillPoints) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillPoint, i32)> + '_ {
        SkillPoint::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl Index<SkillPoint> for SkillPoints {
    type Output = i32;

    fn index(&self, channel: SkillPoint) -> &i32 {
        &self.0[channel.index()]
    }
}

impl IndexMut<SkillPoint> for SkillPoints {
    fn index_mut(&mut self, channel: SkillPoint) -> &mut i32 {
        &mut self.0[channel.index()]
    }
}

impl Add for SkillPoints {
    type Output = SkillPoints;

    fn add(mut self, rhs: SkillPoints) -> SkillPoints {
        self += rhs;
        self
    }
}

impl AddAssign for SkillPoints {
    fn add_assign(&mut self, rhs: SkillPoints) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += *b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_field_indices_match_all() {
        for (i, field) in StatField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_stat_vector_add_and_scale() {
        let a = StatVector::from_pairs([(StatField::Health, 100.0), (StatField::WalkSpeed, 10.0)]);
        let b = StatVector::from_pairs([(StatField::Health, 50.0)]);
        let sum = a + b;
        assert_eq!(sum[StatField::Health], 150.0);
        assert_eq!(sum.scaled(0.5)[StatField::WalkSpeed], 5.0);
    }

    #[test]
    fn test_skill_points_max_and_total() {
        let a = SkillPoints::new(10, 0, 40, 0, 5);
        let b = SkillPoints::new(20, 0, 10, 0, 5);
        assert_eq!(a.max(&b), SkillPoints::new(20, 0, 40, 0, 5));
        assert_eq!(a.total(), 55);
    }

    #[test]
    fn test_skill_points_max_is_per_channel() {
        let strength = SkillPoints::new(10, 0, 0, 0, 0);
        let agility = SkillPoints::new(0, 0, 0, 0, 125);
        assert_eq!(strength.max(&agility), SkillPoints::new(10, 0, 0, 0, 125));
        assert_eq!(agility.max(&strength), SkillPoints::new(10, 0, 0, 0, 125));
    }

    #[test]
    fn test_skill_points_le_all() {
        let low = SkillPoints::new(1, 1, 1, 1, 1);
        let high = SkillPoints::new(1, 2, 1, 1, 1);
        assert!(low.le_all(&high));
        assert!(!high.le_all(&low));
        assert!(low.le_all(&low));
    }
}
