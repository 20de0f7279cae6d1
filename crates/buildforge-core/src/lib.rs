//! BuildForge Core - Core types for combinatorial build optimization
//!
//! This crate provides the fundamental abstractions for BuildForge:
//! - Catalog types for the read-only candidate objects
//! - Slot layouts and assignments for equipment builds and crafts
//! - Attribute and skill-point vectors
//! - Scoring targets (metrics, thresholds, custom ranges, weights)

pub mod constraint;
pub mod domain;
pub mod error;

pub use constraint::{CustomRange, Metric, Objectives, Threshold, Weights};
pub use domain::{
    BuildTarget, Catalog, CatalogItem, Category, ClassKind, ItemId, SkillPoint, SkillPoints,
    SlotAssignment, StatField, StatVector, Variant, WeaponType,
};
pub use error::BuildForgeError;
