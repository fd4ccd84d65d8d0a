//! Entity classes and the generic reference entity representation.
//!
//! The core treats every backend record uniformly: a stable human-meaningful
//! key, the backend's opaque id, and a class-specific JSON payload. The
//! payload structure is defined by the backend schema for each class — the
//! core only reads individual fields from it.

use crate::RemoteId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class-specific record fields, keyed by their ValueFlows field names
/// (camelCase, matching the backend schema).
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The entity classes known to the client core.
///
/// The first four are reference classes: they carry the shared vocabulary
/// (measurement units, the action vocabulary, resource/process
/// classification specs) that must exist before any domain write is valid.
/// `Agent` and `EconomicResource` are collaborator classes consulted by the
/// validation gate but never provisioned by this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityClass {
    Unit,
    Action,
    ResourceSpecification,
    ProcessSpecification,
    Agent,
    EconomicResource,
}

impl EntityClass {
    /// The reference classes, in reconciliation dependency order:
    /// units before resource specifications (which reference unit keys),
    /// resource specifications before process specifications.
    pub const RECONCILE_ORDER: [EntityClass; 4] = [
        EntityClass::Unit,
        EntityClass::Action,
        EntityClass::ResourceSpecification,
        EntityClass::ProcessSpecification,
    ];

    /// Returns true for classes carried by the required baseline.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        Self::RECONCILE_ORDER.contains(self)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityClass::Unit => "unit",
            EntityClass::Action => "action",
            EntityClass::ResourceSpecification => "resourceSpecification",
            EntityClass::ProcessSpecification => "processSpecification",
            EntityClass::Agent => "agent",
            EntityClass::EconomicResource => "economicResource",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EntityClass {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unit" => Ok(EntityClass::Unit),
            "action" => Ok(EntityClass::Action),
            "resourceSpecification" => Ok(EntityClass::ResourceSpecification),
            "processSpecification" => Ok(EntityClass::ProcessSpecification),
            "agent" => Ok(EntityClass::Agent),
            "economicResource" => Ok(EntityClass::EconomicResource),
            other => Err(crate::Error::UnknownClass(other.to_string())),
        }
    }
}

/// A backend record as seen by the client core.
///
/// Identity is the `stable_key` (e.g. a unit's `omUnitIdentifier`, an
/// action's id, a specification's name) because the backend assigns its own
/// opaque `remote_id` on creation. `revision_id` is the backend's revision
/// handle, required for delete and update calls where the backend versions
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    /// Human-meaningful, class-unique key.
    pub stable_key: String,

    /// Backend-assigned opaque record id.
    pub remote_id: RemoteId,

    /// Backend revision handle, where the backend versions records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,

    /// Class-specific record fields.
    #[serde(default)]
    pub payload: Payload,
}

impl ReferenceEntity {
    /// Creates a reference entity.
    #[must_use]
    pub fn new(stable_key: impl Into<String>, remote_id: impl Into<RemoteId>) -> Self {
        Self {
            stable_key: stable_key.into(),
            remote_id: remote_id.into(),
            revision_id: None,
            payload: Payload::new(),
        }
    }

    /// Sets the revision handle.
    #[must_use]
    pub fn with_revision(mut self, revision_id: impl Into<String>) -> Self {
        self.revision_id = Some(revision_id.into());
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Reads a string field from the payload.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.payload.get(field).and_then(|v| v.as_str())
    }

    /// Reads a numeric field from the payload.
    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.payload.get(field).and_then(|v| v.as_f64())
    }
}
