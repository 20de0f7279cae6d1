//! Search phases.
//!
//! A search runs one expansion phase ([`BeamSearch`] or
//! [`ExhaustiveSearch`]) that turns candidate pools into complete
//! assignments, then the secondary [`sweep`] and the final [`rank`].

mod beam;
mod exhaustive;
mod ranking;
mod sweep;

pub use beam::BeamSearch;
pub use exhaustive::ExhaustiveSearch;
pub use ranking::rank;
pub use sweep::{sweep, sweep_variants};

use crate::error::Result;
use crate::event::ProgressListener;
use crate::pool::CandidatePool;
use crate::scope::{Candidate, SearchScope};

/// Produces complete assignments from per-slot pools.
pub trait Expansion {
    /// Returns complete assignments with their estimated scores.
    fn expand<P: ProgressListener + ?Sized>(
        &self,
        scope: &mut SearchScope<'_>,
        pools: &[CandidatePool],
        progress: &mut P,
    ) -> Result<Vec<Candidate>>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}
