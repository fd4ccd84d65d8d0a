//! Core type definitions for the True Commons client.
//!
//! This crate defines the backend-agnostic ValueFlows types used throughout
//! the client core:
//! - Opaque backend-assigned identifiers
//! - Reference entity classes (units, actions, specifications) and their
//!   generic entity representation
//! - Measures (quantity + unit reference)
//! - Write intents (candidate economic events / commitments / intents)
//!
//! Wire-level request/response shapes belong to the backend adapters,
//! not here.

mod entity;
mod ids;
mod intent;
mod measure;

pub use entity::{EntityClass, Payload, ReferenceEntity};
pub use ids::RemoteId;
pub use intent::WriteIntent;
pub use measure::Measure;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown entity class: {0}")]
    UnknownClass(String),
}
