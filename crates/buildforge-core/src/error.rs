//! Error types for BuildForge

use thiserror::Error;

use crate::domain::ItemId;

/// Main error type for catalog and domain operations
#[derive(Debug, Error)]
pub enum BuildForgeError {
    /// Two catalog objects share an id
    #[error("Duplicate catalog item: {0}")]
    DuplicateItem(ItemId),

    /// Two recipes share a name
    #[error("Duplicate recipe: {0}")]
    DuplicateRecipe(String),

    /// Recipe referenced by a craft target does not exist
    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    /// Slot index outside the target's layout
    #[error("Slot index {index} out of range for {len} slots")]
    InvalidSlot { index: usize, len: usize },

    /// Invalid domain model input
    #[error("Domain model error: {0}")]
    DomainModel(String),
}

/// Result type alias for BuildForge operations
pub type Result<T> = std::result::Result<T, BuildForgeError>;
