//! Required baseline tables.
//!
//! The baseline is the fixed set of reference entities the application needs
//! before any domain feature may operate. It is supplied at service
//! construction and never mutated at runtime. Each class distinguishes the
//! full provisioning list (`records`) from the subset whose absence makes
//! the class unready (`required_keys`); the action vocabulary additionally
//! carries a smaller core subset (`core_keys`) because most backends define
//! actions as a fixed, non-authorable vocabulary and readiness can only
//! demand the core operations.

mod actions;
mod process_specifications;
mod resource_specifications;
mod units;

use serde::{Deserialize, Serialize};
use truecommons_types::{EntityClass, Payload};

/// One baseline item: a stable key plus the class-specific creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    /// Human-meaningful, class-unique key.
    pub stable_key: String,
    /// Creation payload, excluding the identity field (the repository maps
    /// the stable key into the wire identity field for its class).
    pub payload: Payload,
}

impl BaselineRecord {
    /// Creates a record from a key and a JSON object payload.
    #[must_use]
    pub fn new(stable_key: impl Into<String>, payload: serde_json::Value) -> Self {
        let payload = match payload {
            serde_json::Value::Object(map) => map,
            _ => Payload::new(),
        };
        Self {
            stable_key: stable_key.into(),
            payload,
        }
    }
}

/// The baseline for one reference class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBaseline {
    /// The class these records belong to.
    pub class: EntityClass,
    /// Every record to provision, in creation order.
    pub records: Vec<BaselineRecord>,
    /// Keys that must exist for the class to be fully provisioned.
    /// Missing-key detail is always reported against this list.
    pub required_keys: Vec<String>,
    /// Optional smaller subset that alone decides readiness. Used for the
    /// action vocabulary, where the backend commonly owns the list.
    pub core_keys: Option<Vec<String>>,
}

impl ClassBaseline {
    /// The keys that decide per-class readiness: the core subset when one
    /// is declared, otherwise the required keys.
    pub fn readiness_keys(&self) -> &[String] {
        self.core_keys.as_deref().unwrap_or(&self.required_keys)
    }

    /// Looks up a record by stable key.
    pub fn record(&self, stable_key: &str) -> Option<&BaselineRecord> {
        self.records.iter().find(|r| r.stable_key == stable_key)
    }
}

/// The complete required baseline, one class table per reference class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredBaseline {
    pub units: ClassBaseline,
    pub actions: ClassBaseline,
    pub resource_specifications: ClassBaseline,
    pub process_specifications: ClassBaseline,
}

impl RequiredBaseline {
    /// The class tables in reconciliation dependency order.
    pub fn classes(&self) -> [&ClassBaseline; 4] {
        [
            &self.units,
            &self.actions,
            &self.resource_specifications,
            &self.process_specifications,
        ]
    }

    /// The table for a reference class, if it is one.
    pub fn for_class(&self, class: EntityClass) -> Option<&ClassBaseline> {
        match class {
            EntityClass::Unit => Some(&self.units),
            EntityClass::Action => Some(&self.actions),
            EntityClass::ResourceSpecification => Some(&self.resource_specifications),
            EntityClass::ProcessSpecification => Some(&self.process_specifications),
            _ => None,
        }
    }
}

impl Default for RequiredBaseline {
    /// The standard True Commons baseline.
    fn default() -> Self {
        Self {
            units: units::baseline(),
            actions: actions::baseline(),
            resource_specifications: resource_specifications::baseline(),
            process_specifications: process_specifications::baseline(),
        }
    }
}
