//! Search entry point that hides all internal wiring.

use std::path::Path;
use std::sync::Arc;

use buildforge_config::SearchConfig;
use buildforge_core::domain::{BuildTarget, Catalog};
use buildforge_solver::{optimize, Constraints, LoggingProgressListener, RankedBuild, SearchRequest};
use tracing::debug;

/// Default configuration file read by [`load_config`].
pub const CONFIG_FILE: &str = "buildforge.toml";

/// Reads search tuning from `path`, falling back to defaults when the file
/// is missing or malformed.
pub fn load_config(path: impl AsRef<Path>) -> SearchConfig {
    let path = path.as_ref();
    match SearchConfig::load(path) {
        Ok(config) => config,
        Err(err) => {
            debug!(event = "config_default", path = %path.display(), reason = %err);
            SearchConfig::default()
        }
    }
}

/// Runs one search on the calling thread with progress logged through
/// `tracing`. Initializes the colored console when the `console` feature is
/// enabled.
pub fn run_search(
    catalog: Arc<Catalog>,
    target: BuildTarget,
    constraints: Constraints,
) -> buildforge_solver::Result<Vec<RankedBuild>> {
    #[cfg(feature = "console")]
    buildforge_console::init();

    let request = SearchRequest::new(catalog, target, constraints);
    optimize(&request, None, &mut LoggingProgressListener::new())
}
