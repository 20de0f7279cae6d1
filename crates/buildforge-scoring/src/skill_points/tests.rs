//! Tests for the skill-point feasibility DP.
//!
//! Random instances are cross-checked against a brute force over every
//! equip order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;

fn profile(req: [i32; 5], bonus: [i32; 5]) -> SkillPointProfile {
    SkillPointProfile::new(SkillPoints(req), SkillPoints(bonus))
}

// Minimal assignment for one fixed order, or None if the order is invalid.
fn cost_of_order(objects: &[SkillPointProfile], order: &[usize], budget: i32) -> Option<i32> {
    let mut assigned = SkillPoints::ZERO;
    let mut bonus = SkillPoints::ZERO;
    for &i in order {
        for c in SkillPoint::ALL {
            let req = objects[i].requirements[c];
            if req > 0 {
                assigned[c] = assigned[c].max(req - bonus[c]);
            }
        }
        bonus += objects[i].bonuses;
    }
    let capped = assigned.0.iter().all(|v| *v <= SKILL_POINT_CAP);
    (capped && assigned.total() <= budget).then(|| assigned.total())
}

fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for perm in permutations(n - 1) {
        for pos in 0..=perm.len() {
            let mut p = perm.clone();
            p.insert(pos, n - 1);
            out.push(p);
        }
    }
    out
}

fn brute_force(objects: &[SkillPointProfile], budget: i32) -> Option<i32> {
    permutations(objects.len())
        .iter()
        .filter_map(|order| cost_of_order(objects, order, budget))
        .min()
}

fn random_instance(rng: &mut ChaCha8Rng, n: usize, allow_negative: bool) -> Vec<SkillPointProfile> {
    (0..n)
        .map(|_| {
            let mut req = [0; 5];
            let mut bonus = [0; 5];
            for c in 0..5 {
                if rng.random_bool(0.4) {
                    req[c] = rng.random_range(1..=120);
                }
                if rng.random_bool(0.35) {
                    bonus[c] = if allow_negative {
                        rng.random_range(-15..=35)
                    } else {
                        rng.random_range(1..=35)
                    };
                }
            }
            profile(req, bonus)
        })
        .collect()
}

#[test]
fn test_empty_set_is_feasible() {
    let result = analyze(&[], 0);
    assert!(result.feasible);
    assert_eq!(result.required, Some(0));
    assert_eq!(result.assignment, Some(SkillPoints::ZERO));
}

#[test]
fn test_single_object_within_cap() {
    let result = analyze(&[profile([40, 0, 0, 0, 20], [0; 5])], 200);
    assert!(result.feasible);
    assert_eq!(result.required, Some(60));
    assert_eq!(result.assignment, Some(SkillPoints::new(40, 0, 0, 0, 20)));
}

#[test]
fn test_cap_at_one_hundred_is_inclusive() {
    assert!(analyze(&[profile([100, 0, 0, 0, 0], [0; 5])], 200).feasible);
    assert!(!analyze(&[profile([101, 0, 0, 0, 0], [0; 5])], 200).feasible);
}

#[test]
fn test_budget_is_inclusive() {
    let objects = [profile([50, 50, 0, 0, 0], [0; 5])];
    assert!(analyze(&objects, 100).feasible);
    assert!(!analyze(&objects, 99).feasible);
}

#[test]
fn test_order_matters() {
    // A needs 80 strength; B needs 60 dexterity and grants 30 strength.
    // Equipping B first saves 30 points.
    let a = profile([80, 0, 0, 0, 0], [0; 5]);
    let b = profile([0, 60, 0, 0, 0], [30, 0, 0, 0, 0]);
    let result = analyze(&[a, b], 200);
    assert_eq!(result.required, Some(110));
}

#[test]
fn test_own_bonus_does_not_count() {
    let self_boost = profile([0, 0, 0, 0, 110], [0, 0, 0, 0, 50]);
    assert!(!analyze(&[self_boost], 200).feasible);
}

#[test]
fn test_analyze_unbounded_reports_over_budget_need() {
    let objects = [
        profile([90, 0, 0, 0, 0], [0; 5]),
        profile([0, 90, 0, 0, 0], [0; 5]),
        profile([0, 0, 90, 0, 0], [0; 5]),
    ];
    assert!(!analyze(&objects, skill_point_budget(106)).feasible);
    let unbounded = analyze_unbounded(&objects);
    assert!(unbounded.feasible);
    assert_eq!(unbounded.required, Some(270));
}

#[test]
fn test_budget_by_level() {
    assert_eq!(skill_point_budget(0), 0);
    assert_eq!(skill_point_budget(1), 0);
    assert_eq!(skill_point_budget(50), 98);
    assert_eq!(skill_point_budget(101), 200);
    assert_eq!(skill_point_budget(106), 200);
}

#[test]
fn test_pareto_insert_keeps_incomparable() {
    let mut frontier = Vec::new();
    insert_pareto(&mut frontier, SkillPoints::new(10, 0, 0, 0, 0));
    insert_pareto(&mut frontier, SkillPoints::new(0, 10, 0, 0, 0));
    assert_eq!(frontier.len(), 2);

    // Dominated by both existing entries.
    insert_pareto(&mut frontier, SkillPoints::new(10, 10, 0, 0, 0));
    assert_eq!(frontier.len(), 2);

    // Dominates both.
    insert_pareto(&mut frontier, SkillPoints::ZERO);
    assert_eq!(frontier, vec![SkillPoints::ZERO]);
}

#[test]
fn test_matches_brute_force_on_random_instances() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    for round in 0..400 {
        let n = rng.random_range(1..=5);
        let objects = random_instance(&mut rng, n, round % 2 == 0);
        let budget = rng.random_range(60..=200);

        let expected = brute_force(&objects, budget);
        let result = analyze(&objects, budget);

        assert_eq!(
            result.feasible,
            expected.is_some(),
            "feasibility mismatch for {objects:?} budget {budget}"
        );
        assert_eq!(result.required, expected, "cost mismatch for {objects:?}");
        if let Some(assignment) = result.assignment {
            assert_eq!(Some(assignment.total()), expected);
        }
    }
}

#[test]
fn test_removing_non_boosting_object_keeps_feasibility() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut checked = 0;
    for _ in 0..300 {
        let n = rng.random_range(2..=5);
        let objects = random_instance(&mut rng, n, true);
        let full = analyze(&objects, 200);
        if !full.feasible {
            continue;
        }
        for skip in 0..n {
            if objects[skip].bonuses.0.iter().any(|b| *b > 0) {
                continue;
            }
            let rest: Vec<_> = objects
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, o)| *o)
                .collect();
            let reduced = analyze(&rest, 200);
            assert!(reduced.feasible, "removal broke feasibility: {objects:?}");
            assert!(reduced.required <= full.required);
            checked += 1;
        }
    }
    assert!(checked > 0);
}
