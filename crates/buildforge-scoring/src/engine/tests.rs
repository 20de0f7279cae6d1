//! Tests for the scoring engine.

use buildforge_core::domain::{
    Catalog, CatalogItem, Category, ItemId, SkillPoints, SlotAssignment, StatField, Variant,
};
use buildforge_core::{CustomRange, Metric, Objectives, Threshold, Weights};

use super::*;
use crate::evaluator::{Blueprint, EvalContext, Evaluator};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn catalog() -> Catalog {
    let boots = CatalogItem::new(1, "Striders", Category::Boots).with_stat(StatField::WalkSpeed, 15.0);
    let heavy = CatalogItem::new(2, "Anvil", Category::Chestplate)
        .with_requirements(SkillPoints::new(10, 0, 0, 20, 0))
        .with_bonuses(SkillPoints::new(0, 0, 0, 0, 4));
    Catalog::new(vec![boots, heavy], Vec::new()).unwrap()
}

fn evaluate(catalog: &Catalog, level: u32, items: &[(usize, u32)]) -> Evaluation {
    let assignment = items
        .iter()
        .fold(SlotAssignment::empty(9), |a, &(i, id)| a.with_slot(i, Some(ItemId(id))));
    Evaluator::new(catalog, Blueprint::Equipment, EvalContext::new(level))
        .evaluate(&assignment, Variant::default())
}

#[test]
fn test_generic_terms_are_normalized() {
    let catalog = catalog();
    let eval = evaluate(&catalog, 10, &[(3, 1)]);
    let engine = ScoringEngine::new(Weights::default(), Objectives::default());

    let card = engine.score(&eval);

    assert!(card.satisfies_thresholds);
    assert_close(card.term(TermLabel::Objective("ehp")).unwrap(), 55.0 / 10_000.0);
    assert_close(card.term(TermLabel::Objective("walk_speed")).unwrap(), 0.3 * 1.5);
    assert_eq!(card.term(TermLabel::Objective("melee_dps")), None);
    assert_close(card.total, 0.0055 + 0.45);
}

#[test]
fn test_requirement_penalty() {
    let catalog = catalog();
    let eval = evaluate(&catalog, 50, &[(1, 2)]);
    let engine = ScoringEngine::new(Weights::default(), Objectives::default());

    let card = engine.score(&eval);

    assert_close(card.term(TermLabel::Requirements).unwrap(), -0.1 * 30.0 / 100.0);
    assert_close(card.term(TermLabel::Objective("skill_points")).unwrap(), 0.2 * 0.4);
}

#[test]
fn test_threshold_violation_penalty() {
    let catalog = catalog();
    let eval = evaluate(&catalog, 10, &[(3, 1)]);
    let objectives =
        Objectives::default().with_threshold(Threshold::at_least(Metric::WALK_SPEED, 20.0));
    let engine = ScoringEngine::new(Weights::zero(), objectives);

    let card = engine.score(&eval);

    assert!(!card.satisfies_thresholds);
    assert!(!engine.satisfies_thresholds(&eval));
    // g = 5 / 20
    assert_close(
        card.term(TermLabel::Threshold(Metric::WALK_SPEED)).unwrap(),
        -100.0 * (0.25 + 0.0625),
    );
    assert_close(card.total, -31.25);
}

#[test]
fn test_infeasible_build_violates_implicit_threshold() {
    let catalog = catalog();
    // Level 5 has 8 points for a 30-point requirement.
    let eval = evaluate(&catalog, 5, &[(1, 2)]);
    assert_eq!(eval.metrics.skill_point_deficit, 22);

    let strict = ScoringEngine::new(Weights::zero(), Objectives::default());
    let card = strict.score(&eval);
    assert!(!card.satisfies_thresholds);
    assert_close(
        card.term(TermLabel::Threshold(Metric::SkillPointDeficit)).unwrap(),
        -100.0 * (22.0 + 22.0 * 22.0),
    );

    let lenient = ScoringEngine::new(Weights::zero(), Objectives::default().require_feasible(false));
    let card = lenient.score(&eval);
    assert!(card.satisfies_thresholds);
    assert_eq!(card.total, 0.0);
}

#[test]
fn test_custom_min_rewards_excess() {
    let catalog = catalog();
    let eval = evaluate(&catalog, 10, &[(3, 1)]);
    let objectives = Objectives::default()
        .with_custom_range(CustomRange::at_least(Metric::WALK_SPEED, 10.0).with_weight(2.0));
    let engine = ScoringEngine::new(Weights::zero(), objectives);

    let card = engine.score(&eval);

    assert_close(card.term(TermLabel::CustomRange(Metric::WALK_SPEED)).unwrap(), 5.0);
}

#[test]
fn test_custom_ranges_penalize_misses() {
    let catalog = catalog();
    let eval = evaluate(&catalog, 10, &[(3, 1)]);

    let below = ScoringEngine::new(
        Weights::zero(),
        Objectives::default().with_custom_range(CustomRange::at_least(Metric::WALK_SPEED, 30.0)),
    );
    assert_close(below.score(&eval).total, -100.0 * (0.5 + 0.25));

    let above = ScoringEngine::new(
        Weights::zero(),
        Objectives::default()
            .with_custom_range(CustomRange::at_most(Metric::WALK_SPEED, 10.0).with_weight(0.5)),
    );
    assert_close(above.score(&eval).total, -0.5 * 100.0 * (0.5 + 0.25));

    // A custom miss is soft: thresholds still hold.
    assert!(above.score(&eval).satisfies_thresholds);
}

#[test]
fn test_constraint_only_ignores_generic_weights() {
    let catalog = catalog();
    let eval = evaluate(&catalog, 50, &[(1, 2), (3, 1)]);
    let engine = ScoringEngine::new(Weights::default(), Objectives::default().constraint_only(true));

    let card = engine.score(&eval);

    assert_eq!(card.term(TermLabel::Objective("walk_speed")), None);
    assert_eq!(card.term(TermLabel::Objective("ehp")), None);
    assert_close(card.term(TermLabel::Objective("skill_points")).unwrap(), 0.04);
    assert_close(card.term(TermLabel::Requirements).unwrap(), -0.15);
    assert_close(card.total, 0.04 - 0.15);
}

#[test]
fn test_several_custom_mins_shrink_generic_terms() {
    assert_eq!(generic_scale(0), 1.0);
    assert_eq!(generic_scale(1), 1.0);
    assert_close(generic_scale(2), 0.8);
    assert_close(generic_scale(5), 0.2);
    assert_eq!(generic_scale(6), 0.15);
    assert_eq!(generic_scale(40), 0.15);

    let catalog = catalog();
    let eval = evaluate(&catalog, 10, &[(3, 1)]);
    let objectives = Objectives::default()
        .with_custom_range(CustomRange::at_least(Metric::WALK_SPEED, 0.0).with_weight(0.0))
        .with_custom_range(CustomRange::at_least(Metric::Ehp, 0.0).with_weight(0.0));
    let engine = ScoringEngine::new(Weights::default(), objectives);

    let card = engine.score(&eval);
    assert_close(card.term(TermLabel::Objective("walk_speed")).unwrap(), 0.45 * 0.8);
}

#[test]
fn test_term_labels_display() {
    assert_eq!(TermLabel::Objective("ehp").to_string(), "ehp");
    assert_eq!(
        TermLabel::Threshold(Metric::WALK_SPEED).to_string(),
        "threshold:walk_speed"
    );
    assert_eq!(
        TermLabel::CustomRange(Metric::SkillPointDeficit).to_string(),
        "custom:skill_point_deficit"
    );
}
