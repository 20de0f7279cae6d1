//! Tests for runtime weight overrides.

use std::sync::Arc;

use buildforge_core::Weights;

use super::*;

#[test]
fn test_new_is_empty() {
    let overrides = WeightOverrides::new();
    assert!(overrides.is_empty());
    assert_eq!(overrides.len(), 0);
}

#[test]
fn test_put_get_and_remove() {
    let mut overrides = WeightOverrides::new();
    overrides.put("sustain", 1.5);
    assert!(overrides.contains("sustain"));
    assert_eq!(overrides.get("sustain"), Some(1.5));

    assert_eq!(overrides.remove("sustain"), Some(1.5));
    assert!(!overrides.contains("sustain"));
}

#[test]
fn test_apply_leaves_unlisted_weights() {
    let overrides = WeightOverrides::from_pairs([("spell_damage", 3.0), ("requirements", 0.0)]);
    let base = Weights::default();

    let weights = overrides.apply(&base);

    assert_eq!(weights.spell_damage, 3.0);
    assert_eq!(weights.requirements, 0.0);
    assert_eq!(weights.melee_dps, base.melee_dps);
    assert_eq!(weights.walk_speed, base.walk_speed);
}

#[test]
fn test_apply_skips_unknown_names() {
    let overrides = WeightOverrides::from_pairs([("mana", 9.0)]);
    assert_eq!(overrides.apply(&Weights::default()), Weights::default());
}

#[test]
fn test_validate_reports_first_unknown_name() {
    let overrides = WeightOverrides::from_pairs([("zeta", 1.0), ("ehp", 1.0), ("alpha", 1.0)]);
    assert_eq!(overrides.validate(), Err(UnknownWeight("alpha".into())));

    let ok = WeightOverrides::from_pairs([("ehp", 2.0)]);
    assert_eq!(ok.validate(), Ok(()));
}

#[test]
fn test_weight_provider_trait() {
    let mut overrides = WeightOverrides::new();
    overrides.put("walk_speed", 5.0);

    let provider: &dyn WeightProvider = &overrides;
    assert_eq!(provider.weight("walk_speed"), Some(5.0));
    assert_eq!(provider.weight("other"), None);
    assert_eq!(provider.weight_or_default("other", 1.0), 1.0);

    let base: &dyn WeightProvider = &Weights::default();
    assert_eq!(base.weight("sustain"), Some(0.3));
}

#[test]
fn test_arc_weight_provider() {
    let mut overrides = WeightOverrides::new();
    overrides.put("ehp", 4.0);
    let shared: Arc<WeightOverrides> = overrides.into_arc();

    let provider: &dyn WeightProvider = &shared;
    assert_eq!(provider.weight("ehp"), Some(4.0));
}
