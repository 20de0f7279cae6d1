//! BuildForge - Combinatorial Build Search in Rust
//!
//! Describe a catalog, pick a target and constraints, then call
//! [`run_search`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use buildforge::prelude::*;
//!
//! let catalog = Catalog::new(
//!     vec![
//!         CatalogItem::new(1, "Cap", Category::Helmet).with_stat(StatField::Health, 150.0),
//!         CatalogItem::weapon(2, "Twig", WeaponType::Wand).with_stat(StatField::BaseDps, 700.0),
//!     ],
//!     Vec::new(),
//! )
//! .unwrap();
//!
//! let constraints = Constraints::new(40).with_class(ClassKind::Mage);
//! let builds = run_search(Arc::new(catalog), BuildTarget::Equipment, constraints).unwrap();
//!
//! assert!(builds[0].evaluation.is_feasible());
//! assert_eq!(builds[0].assignment.filled_count(), 2);
//! ```

// Domain model
pub use buildforge_core::domain;
pub use buildforge_core::{
    BuildForgeError, BuildTarget, Catalog, CatalogItem, Category, ClassKind, CustomRange, ItemId,
    Metric, Objectives, SkillPoint, SkillPoints, SlotAssignment, StatField, Threshold, Variant,
    WeaponType, Weights,
};

// Evaluation and scoring
pub use buildforge_scoring::{
    analyze, skill_point_budget, Evaluation, Evaluator, ScoreTerm, ScoringEngine, TermLabel,
    WeightOverrides,
};

// Search configuration
pub use buildforge_config::{ConfigError, SearchConfig, SearchStrategy};

// Search
pub use buildforge_solver::{
    optimize, optimize_simple, Constraints, ProgressListener, RankedBuild, SearchError,
    SearchPhase, SearchProgress, SearchRequest, SearchWorker, WorkerEvent, WorkerRequest,
};

mod search;
pub use search::{load_config, run_search, CONFIG_FILE};

#[cfg(feature = "console")]
pub use buildforge_console as console;

pub mod prelude {
    pub use super::{
        BuildTarget, Catalog, CatalogItem, Category, ClassKind, ItemId, Metric, StatField,
        Threshold, WeaponType,
    };
    pub use super::{run_search, Constraints, RankedBuild, SearchConfig, SearchStrategy};
}
