//! Build evaluation and scoring for BuildForge.
//!
//! This crate turns slot assignments into numbers:
//! - [`evaluator`]: aggregated stats, derived metrics, slot checks and warnings
//! - [`skill_points`]: exact equip-order feasibility (bitmask DP over subsets)
//! - [`engine`]: weighted score with threshold and custom-range terms
//! - [`weight_overrides`]: runtime weight tuning by name
//!
//! Everything here is pure and synchronous; the solver crate drives it.

pub mod engine;
pub mod evaluator;
pub mod skill_points;
pub mod weight_overrides;

pub use engine::{ScoreCard, ScoreTerm, ScoringEngine, TermLabel};
pub use evaluator::{
    AggregatedStats, Blueprint, DerivedMetrics, EvalContext, Evaluation, Evaluator, SlotCheck,
};
pub use skill_points::{analyze, skill_point_budget, SkillPointAnalysis, SkillPointProfile};
pub use weight_overrides::{UnknownWeight, WeightOverrides, WeightProvider};
