//! Shared test fixtures for BuildForge crates.
//!
//! This crate provides small, hand-checked catalogs for testing.
//! It only depends on `buildforge-core` so every other crate can use it.
//!
//! - [`gear`] - equipment catalogs (neutral gear, wands, speed boots, agility support)
//! - [`crafting`] - ingredients and recipes
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! buildforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use buildforge_test::gear::{mage_catalog, EMBER_WAND};
//! use buildforge_test::crafting::{crafting_catalog, SPEAR_RECIPE};
//! ```

pub mod crafting;
pub mod gear;

pub use crafting::crafting_catalog;
pub use gear::{agility_catalog, mage_catalog, speed_catalog, unarmed_mage_catalog};
