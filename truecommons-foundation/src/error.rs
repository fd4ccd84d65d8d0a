//! Error types for the foundation layer.
//!
//! Repositories classify backend failures into `RepositoryError` variants
//! directly — the core never inspects error message text. A structural
//! rejection is a capability gap in the backend schema; everything else a
//! repository can report is either transient (item-specific) or a transport
//! failure.

use crate::ReadinessReport;
use thiserror::Error;
use truecommons_types::EntityClass;

/// Result type for foundation operations.
pub type FoundationResult<T> = Result<T, FoundationError>;

/// Errors reported by a backend entity repository.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The backend's type system rejects the operation shape entirely
    /// (unknown mutation, unknown argument). A capability gap, not a fault.
    #[error("operation not supported by backend schema: {0}")]
    StructuralUnsupported(String),

    /// Item-specific failure: conflict, validation rejection, permission.
    /// Recorded against the item, never escalated.
    #[error("operation failed: {0}")]
    Transient(String),

    /// Transport-level failure reaching the backend.
    #[error("network error: {0}")]
    Network(String),

    /// No repository is registered for the class.
    #[error("no repository registered for class {0}")]
    NotRegistered(EntityClass),
}

impl RepositoryError {
    /// Returns true for structural (capability-gap) failures.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, RepositoryError::StructuralUnsupported(_))
    }
}

/// Errors surfaced by the foundation service.
#[derive(Debug, Clone, Error)]
pub enum FoundationError {
    /// A class the schema claims to support writes for rejected the
    /// operation shape. Fatal for the initialization run.
    #[error("backend schema unexpectedly rejects writes for {class}: {message}")]
    Unsupported {
        /// The class whose reconciliation failed structurally.
        class: EntityClass,
        /// The repository's description of the rejection.
        message: String,
    },

    /// Required classes remain unready after a full initialization pass
    /// against a backend that supports writes.
    #[error("foundation initialization incomplete: missing {}", .0.describe_missing())]
    Incomplete(ReadinessReport),
}
