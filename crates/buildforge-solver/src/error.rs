//! Error types for the build search.

use thiserror::Error;

/// Failure of a search invocation.
///
/// Validation problems (unknown recipe, a required slot without candidates)
/// are not errors: the search returns an empty list instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The cancellation flag was raised; no partial results are returned.
    #[error("Search cancelled")]
    Cancelled,

    /// An internal invariant broke.
    #[error("Internal search error: {0}")]
    Internal(String),
}

impl SearchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchError::Cancelled)
    }
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
