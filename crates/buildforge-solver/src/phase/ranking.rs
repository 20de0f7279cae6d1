//! Final filtering and ordering of swept builds.

use tracing::debug;

use crate::constraints::Constraints;
use crate::optimize::RankedBuild;

/// Rejects builds missing a must-include id or exceeding `max_requirement`,
/// then returns the best `result_limit` builds.
///
/// Builds satisfying every hard threshold are preferred; when none does, the
/// best-effort builds are returned instead.
pub fn rank(builds: Vec<RankedBuild>, constraints: &Constraints) -> Vec<RankedBuild> {
    let swept = builds.len();
    let (satisfying, rest): (Vec<RankedBuild>, Vec<RankedBuild>) = builds
        .into_iter()
        .filter(|b| b.assignment.contains_all(&constraints.must_include))
        .filter(|b| constraints.within_max_requirement(&b.evaluation.stats.requirements))
        .partition(|b| b.satisfies_thresholds);

    let fallback = satisfying.is_empty() && !rest.is_empty();
    let mut ranked = if satisfying.is_empty() { rest } else { satisfying };
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(constraints.config.result_limit);

    debug!(
        event = "ranked",
        swept = swept,
        returned = ranked.len(),
        fallback = fallback,
    );
    ranked
}
