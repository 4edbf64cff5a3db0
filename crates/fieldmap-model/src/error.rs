//! Error types for mapping and reorder operations.
//!
//! Every error here is recoverable: the operation that produced it was
//! rejected and the mapping state is exactly what it was before the call.

use thiserror::Error;

use crate::enums::{MappingStatus, Side};
use crate::ids::{CorrespondenceId, FieldId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    /// Field id is not present in the sequence for that side.
    #[error("{side} field not found: {id}")]
    FieldNotFound { side: Side, id: FieldId },

    /// Correspondence id does not exist (never created, or already removed).
    #[error("correspondence not found: {0}")]
    CorrespondenceNotFound(CorrespondenceId),

    /// A correspondence between these two fields already exists.
    #[error("fields {source_id} and {target_id} are already connected by {existing}")]
    Duplicate {
        source_id: FieldId,
        target_id: FieldId,
        existing: CorrespondenceId,
    },

    /// The correspondence is not in the status the operation requires.
    #[error("correspondence {id} is {actual}, expected {expected}")]
    InvalidState {
        id: CorrespondenceId,
        actual: MappingStatus,
        expected: MappingStatus,
    },

    /// Reorder target index is outside `[0, len - 1]`.
    #[error("index {index} is out of range for {side} sequence of length {len}")]
    OutOfRange { side: Side, index: usize, len: usize },

    /// Blank or otherwise unusable identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
}

impl MappingError {
    /// True for both field and correspondence lookups that missed.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FieldNotFound { .. } | Self::CorrespondenceNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
