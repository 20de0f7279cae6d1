//! End-to-end searches over the shared fixture catalogs.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use buildforge_config::{SearchConfig, SearchStrategy};
use buildforge_core::domain::{
    BuildTarget, Catalog, CatalogItem, Category, ClassKind, ItemId, SlotAssignment, StatField,
    WeaponType,
};
use buildforge_core::{Metric, Threshold};
use buildforge_scoring::Evaluator;
use buildforge_solver::{
    optimize, optimize_simple, Constraints, CountingProgressListener, RankedBuild, SearchError,
    SearchPhase, SearchRequest,
};
use buildforge_test::crafting::{COPPER_SHARD, HEAVY_ORE, SILK_STRAND, SPEAR_RECIPE, SWIFT_FEATHER};
use buildforge_test::gear::{
    EMBER_WAND, FEATHER_CHARM, FROST_WAND, GALE_BOW, WAR_PIKE, WINDRUNNERS,
};
use buildforge_test::{
    agility_catalog, crafting_catalog, mage_catalog, speed_catalog, unarmed_mage_catalog,
};

const WEAPON: usize = 8;
const BOOTS: usize = 3;
const NECKLACE: usize = 7;

fn equipment(catalog: Catalog, constraints: Constraints) -> SearchRequest {
    SearchRequest::new(Arc::new(catalog), BuildTarget::Equipment, constraints)
}

fn run(request: &SearchRequest) -> Vec<RankedBuild> {
    optimize_simple(request).unwrap()
}

fn mage() -> Constraints {
    Constraints::new(100).with_class(ClassKind::Mage)
}

fn narrow_beam(beam_width: usize, pool_size: usize) -> SearchConfig {
    SearchConfig::default()
        .with_strategy(SearchStrategy::Beam)
        .with_beam_width(beam_width)
        .with_pool_size(pool_size)
}

#[test]
fn test_mage_prefers_strongest_wieldable_wand() {
    let builds = run(&equipment(mage_catalog(), mage()));

    assert!(!builds.is_empty());
    let top = &builds[0];
    assert_eq!(top.assignment.get(WEAPON), Some(EMBER_WAND));
    assert_eq!(top.assignment.filled_count(), 9, "every neutral piece adds health");
    assert!(top.satisfies_thresholds);
    assert!(builds.iter().all(|b| !b.assignment.contains(WAR_PIKE)));
    assert!(builds.iter().all(|b| b.evaluation.is_feasible()));
}

#[test]
fn test_results_sorted_and_bounded() {
    let builds = run(&equipment(mage_catalog(), mage()));

    assert_eq!(builds.len(), SearchConfig::default().result_limit);
    assert!(builds.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_search_is_deterministic() {
    let request = equipment(agility_catalog(), Constraints::new(106));

    assert_eq!(run(&request), run(&request));
}

#[test]
fn test_walk_speed_threshold_forces_fast_boots() {
    let constraints =
        Constraints::new(100).with_threshold(Threshold::at_least(Metric::WALK_SPEED, 20.0));
    let builds = run(&equipment(speed_catalog(), constraints));

    assert!(!builds.is_empty());
    for build in &builds {
        assert_eq!(build.assignment.get(BOOTS), Some(WINDRUNNERS));
        assert!(build.satisfies_thresholds);
        assert!(build.evaluation.metric(Metric::WALK_SPEED) >= 20.0);
    }
}

#[test]
fn test_must_include_unlocks_requirement_heavy_weapon() {
    let constraints = Constraints::new(106)
        .with_class(ClassKind::Archer)
        .must_include(FEATHER_CHARM);
    let builds = run(&equipment(agility_catalog(), constraints));

    assert!(!builds.is_empty());
    assert!(builds.iter().all(|b| b.assignment.contains(FEATHER_CHARM)));
    let top = &builds[0];
    assert_eq!(top.assignment.get(NECKLACE), Some(FEATHER_CHARM));
    assert_eq!(top.assignment.get(WEAPON), Some(GALE_BOW));
    assert!(top.evaluation.is_feasible());
}

#[test]
fn test_narrow_beam_prefers_strongest_wieldable_wand() {
    let builds = run(&equipment(mage_catalog(), mage().with_config(narrow_beam(2, 2))));

    assert!(!builds.is_empty());
    assert_eq!(builds[0].assignment.get(WEAPON), Some(EMBER_WAND));
    assert!(builds.iter().all(|b| !b.assignment.contains(WAR_PIKE)));
}

#[test]
fn test_narrow_beam_finds_fast_boots_through_threshold_support() {
    let constraints = Constraints::new(100)
        .with_threshold(Threshold::at_least(Metric::WALK_SPEED, 20.0))
        .with_weight_override("walk_speed", 0.0)
        .with_config(narrow_beam(2, 1));
    let builds = run(&equipment(speed_catalog(), constraints));

    assert!(!builds.is_empty());
    for build in &builds {
        assert_eq!(build.assignment.get(BOOTS), Some(WINDRUNNERS));
        assert!(build.satisfies_thresholds);
    }
}

#[test]
fn test_narrow_beam_keeps_support_charm_for_heavy_weapon() {
    let constraints = Constraints::new(106)
        .with_class(ClassKind::Archer)
        .must_include(FEATHER_CHARM)
        .with_config(narrow_beam(2, 2));
    let builds = run(&equipment(agility_catalog(), constraints));

    assert!(!builds.is_empty());
    assert!(builds.iter().all(|b| b.assignment.contains(FEATHER_CHARM)));
    let top = &builds[0];
    assert_eq!(top.assignment.get(NECKLACE), Some(FEATHER_CHARM));
    assert_eq!(top.assignment.get(WEAPON), Some(GALE_BOW));
    assert!(top.evaluation.is_feasible());
}

#[test]
fn test_beam_keeps_weak_must_includes_in_separate_slots() {
    let items = vec![
        CatalogItem::new(1, "Worn Cap", Category::Helmet).with_stat(StatField::Health, 10.0),
        CatalogItem::new(2, "Iron Helm", Category::Helmet).with_stat(StatField::Health, 500.0),
        CatalogItem::new(3, "Frayed Shoes", Category::Boots).with_stat(StatField::Health, 10.0),
        CatalogItem::new(4, "Iron Greaves", Category::Boots).with_stat(StatField::Health, 500.0),
        CatalogItem::weapon(5, "Twig", WeaponType::Wand).with_stat(StatField::BaseDps, 1000.0),
    ];
    let catalog = Catalog::new(items, Vec::new()).unwrap();
    let pinned = Constraints::new(100)
        .must_include(ItemId(1))
        .must_include(ItemId(3));

    let exhaustive = SearchConfig::default().with_strategy(SearchStrategy::Exhaustive);

    let full = run(&equipment(catalog.clone(), pinned.clone().with_config(exhaustive)));
    let beam = run(&equipment(catalog, pinned.with_config(narrow_beam(1, 4))));

    assert!(!full.is_empty());
    assert!(!beam.is_empty());
    for build in beam.iter().chain(&full) {
        assert!(build.assignment.contains(ItemId(1)));
        assert!(build.assignment.contains(ItemId(3)));
    }
    assert_eq!(beam[0].assignment, full[0].assignment);
}

#[test]
fn test_no_wieldable_weapon_yields_no_results() {
    let builds = run(&equipment(unarmed_mage_catalog(), mage()));

    assert!(builds.is_empty());
}

#[test]
fn test_must_include_is_honoured_by_every_result() {
    let builds = run(&equipment(mage_catalog(), mage().must_include(FROST_WAND)));

    assert!(!builds.is_empty());
    assert!(builds.iter().all(|b| b.assignment.contains(FROST_WAND)));
}

#[test]
fn test_excluded_items_never_appear() {
    let builds = run(&equipment(mage_catalog(), mage().exclude(EMBER_WAND)));

    assert!(!builds.is_empty());
    assert!(builds.iter().all(|b| !b.assignment.contains(EMBER_WAND)));
    assert_eq!(builds[0].assignment.get(WEAPON), Some(FROST_WAND));
}

#[test]
fn test_max_requirement_filters_results() {
    let constraints = Constraints::new(106).with_max_requirement(100);
    let builds = run(&equipment(agility_catalog(), constraints));

    assert!(!builds.is_empty());
    assert!(builds.iter().all(|b| !b.assignment.contains(GALE_BOW)));
}

#[test]
fn test_locked_slots_keep_base_values() {
    let base = SlotAssignment::empty(9).with_slot(WEAPON, Some(FROST_WAND));
    let constraints = mage().lock_slot(0).lock_slot(WEAPON);
    let request = equipment(mage_catalog(), constraints).with_base(base);

    let builds = run(&request);

    assert!(!builds.is_empty());
    for build in &builds {
        assert_eq!(build.assignment.get(0), None);
        assert_eq!(build.assignment.get(WEAPON), Some(FROST_WAND));
    }
}

#[test]
fn test_invalid_requests_yield_no_results() {
    let out_of_range = equipment(mage_catalog(), mage().lock_slot(9));
    assert!(run(&out_of_range).is_empty());

    let unknown = SearchRequest::new(
        Arc::new(crafting_catalog()),
        BuildTarget::craft("missing-recipe"),
        Constraints::new(100),
    );
    assert!(run(&unknown).is_empty());
}

#[test]
fn test_unknown_weight_override_is_ignored() {
    let baseline = run(&equipment(mage_catalog(), mage()));
    let tuned = run(&equipment(
        mage_catalog(),
        mage().with_weight_override("not_a_weight", 5.0),
    ));

    assert_eq!(baseline, tuned);
}

#[test]
fn test_result_limit_from_config_file() {
    let config = SearchConfig::from_toml_str("result_limit = 3\npool_size = 4\n").unwrap();
    let builds = run(&equipment(mage_catalog(), mage().with_config(config)));

    assert_eq!(builds.len(), 3);
}

#[test]
fn test_beam_and_exhaustive_agree_on_small_space() {
    let beam = mage().with_config(SearchConfig::default().with_strategy(SearchStrategy::Beam));
    let full =
        mage().with_config(SearchConfig::default().with_strategy(SearchStrategy::Exhaustive));

    let beam = run(&equipment(mage_catalog(), beam));
    let full = run(&equipment(mage_catalog(), full));

    assert_eq!(beam[0].assignment, full[0].assignment);
    assert_eq!(beam[0].score, full[0].score);
}

#[test]
fn test_weapon_craft_sweeps_attack_speeds() {
    let constraints = Constraints::new(100)
        .exclude(COPPER_SHARD)
        .exclude(SWIFT_FEATHER);
    let request = SearchRequest::new(
        Arc::new(crafting_catalog()),
        BuildTarget::craft(SPEAR_RECIPE),
        constraints.clone(),
    );

    let full = run(&request);

    assert!(!full.is_empty());
    for build in &full {
        assert!(build.variant.attack_speed.is_some());
        assert!(build.evaluation.effectiveness.is_some());
        assert!(!build.assignment.contains(HEAVY_ORE));
        assert!(!build.assignment.contains(SILK_STRAND));
    }

    let mut beam = request;
    let config = SearchConfig::default()
        .with_strategy(SearchStrategy::Beam)
        .with_beam_width(4);
    beam.constraints = constraints.with_config(config);
    let narrow = run(&beam);
    assert!(!narrow.is_empty());
    assert!(full[0].score >= narrow[0].score);
}

#[test]
fn test_raised_cancel_flag_returns_cancelled() {
    let request = equipment(mage_catalog(), mage());
    let cancel = AtomicBool::new(true);
    let mut progress = CountingProgressListener::new();

    let outcome = optimize(&request, Some(&cancel), &mut progress);

    assert_eq!(outcome, Err(SearchError::Cancelled));
    assert_eq!(progress.count(SearchPhase::Complete), 0);
}

#[test]
fn test_progress_ends_with_complete() {
    let request = equipment(mage_catalog(), mage());
    let mut progress = CountingProgressListener::new();

    let builds = optimize(&request, None, &mut progress).unwrap();

    assert!(progress.count(SearchPhase::ExpandingSlot) >= 1);
    assert_eq!(progress.count(SearchPhase::SweepingSecondary), 1);
    assert_eq!(progress.count(SearchPhase::Complete), 1);
    let last = progress.last().unwrap();
    assert_eq!(last.phase, SearchPhase::Complete);
    assert_eq!(last.beam_size, builds.len());
    assert_eq!(last.total_slots, 9);
}

#[test]
fn test_beam_reports_every_slot() {
    let constraints =
        mage().with_config(SearchConfig::default().with_strategy(SearchStrategy::Beam));
    let mut progress = CountingProgressListener::new();

    optimize(&equipment(mage_catalog(), constraints), None, &mut progress).unwrap();

    assert_eq!(progress.count(SearchPhase::ExpandingSlot), 9);
}

#[test]
fn test_dropping_bonus_free_items_keeps_builds_feasible() {
    let catalog = agility_catalog();
    let constraints = Constraints::new(106)
        .with_class(ClassKind::Archer)
        .must_include(FEATHER_CHARM);
    let builds = run(&equipment(catalog.clone(), constraints.clone()));
    let evaluator =
        Evaluator::for_target(&catalog, &BuildTarget::Equipment, constraints.eval_context())
            .unwrap();

    for build in builds.iter().filter(|b| b.evaluation.is_feasible()) {
        for (slot, id) in build.assignment.filled() {
            let grants_points = catalog
                .get(id)
                .is_some_and(|item| item.bonuses.iter().any(|(_, v)| v > 0));
            if grants_points {
                continue;
            }
            let reduced = build.assignment.with_slot(slot, None);
            let eval = evaluator.evaluate(&reduced, build.variant);
            assert!(eval.is_feasible(), "removing {id:?} broke {:?}", build.assignment);
        }
    }
}
