//! BuildForge Solver Engine
//!
//! This crate searches for high-scoring builds:
//! - Candidate pools per slot (eligibility, heuristic top-K, threshold support)
//! - Beam search and exhaustive enumeration over slots
//! - Secondary sweep over material tiers and attack speeds
//! - Ranking with hard-threshold fallback
//! - Progress events, cooperative cancellation and a worker thread wrapper
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use buildforge_core::domain::{BuildTarget, Catalog, CatalogItem, Category, StatField, WeaponType};
//! use buildforge_solver::{optimize_simple, Constraints, SearchRequest};
//!
//! let catalog = Catalog::new(
//!     vec![
//!         CatalogItem::new(1, "Cap", Category::Helmet).with_stat(StatField::Health, 200.0),
//!         CatalogItem::weapon(2, "Stick", WeaponType::Wand).with_stat(StatField::BaseDps, 900.0),
//!     ],
//!     Vec::new(),
//! )
//! .unwrap();
//!
//! let request = SearchRequest::new(Arc::new(catalog), BuildTarget::Equipment, Constraints::new(60));
//! let builds = optimize_simple(&request).unwrap();
//!
//! assert_eq!(builds[0].assignment.filled_count(), 2);
//! ```

pub mod constraints;
pub mod error;
pub mod event;
pub mod optimize;
pub mod phase;
pub mod pool;
pub mod scope;
pub mod stats;
pub mod worker;

pub use constraints::Constraints;
pub use error::{Result, SearchError};
pub use event::{
    CountingProgressListener, LoggingProgressListener, NoProgress, ProgressListener, SearchPhase,
    SearchProgress,
};
pub use optimize::{optimize, optimize_simple, resolve_strategy, RankedBuild, SearchRequest};
pub use phase::{BeamSearch, ExhaustiveSearch, Expansion};
pub use pool::{heuristic_score, CandidatePool, PoolBuilder};
pub use scope::{Candidate, SearchScope, MUST_INCLUDE_BONUS};
pub use stats::{PhaseStats, SearchStats};
pub use worker::{SearchWorker, WorkerEvent, WorkerRequest};
