//! Identifier types used throughout the True Commons core.
//!
//! The backend assigns its own opaque record ids on creation and does not
//! accept caller-chosen ids, so `RemoteId` is an opaque string wrapper.
//! Stable, human-meaningful identity lives in `ReferenceEntity::stable_key`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the backend to a stored record.
///
/// Never parsed or interpreted by the core; only echoed back on update
/// and delete calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    /// Wraps a backend-assigned id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RemoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RemoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
