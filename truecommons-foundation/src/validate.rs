//! Referential validation gate.
//!
//! Checks that a candidate transactional write only references entities the
//! cache knows to exist. Pure and synchronous: the gate reads the current
//! snapshots and performs no network calls, never submits anything, and
//! never rolls anything back. Callers must refuse to submit while the
//! violation list is non-empty; keeping the cache fresh enough is their
//! concern.

use crate::cache::EntityCache;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use truecommons_types::{EntityClass, Measure, WriteIntent};

/// Which quantity sub-object a unit reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityField {
    Resource,
    Effort,
}

impl fmt::Display for QuantityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityField::Resource => write!(f, "resource quantity"),
            QuantityField::Effort => write!(f, "effort quantity"),
        }
    }
}

/// A reason a candidate write cannot proceed.
///
/// Violations are data, never thrown. Each one names the offending
/// reference so callers can surface it or repair the intent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// The action key is not in the action vocabulary.
    #[error("Action \"{action}\" not found")]
    UnknownAction { action: String },

    /// The provider agent is not known.
    #[error("Provider agent \"{agent}\" not found")]
    UnknownProviderAgent { agent: String },

    /// The receiver agent is not known.
    #[error("Receiver agent \"{agent}\" not found")]
    UnknownReceiverAgent { agent: String },

    /// The scope agent is not known.
    #[error("Scope agent \"{agent}\" not found")]
    UnknownScopeAgent { agent: String },

    /// The resource specification is not known.
    #[error("Resource specification \"{spec}\" not found")]
    UnknownResourceSpecification { spec: String },

    /// The concrete resource is not known.
    #[error("Resource \"{resource}\" not found")]
    UnknownResource { resource: String },

    /// A quantity references a unit that is not known.
    #[error("Unit \"{unit}\" not found for {quantity}")]
    UnknownUnit {
        unit: String,
        quantity: QuantityField,
    },

    /// The interval start does not precede its end.
    #[error("Beginning time must be before end time")]
    BeginningAfterEnd {
        beginning: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The deadline already passed at validation time.
    #[error("Due date cannot be in the past")]
    DueInPast { due: DateTime<Utc> },
}

impl Violation {
    /// The stable key the violation names, for referential violations.
    /// Temporal violations name no entity and return `None`.
    #[must_use]
    pub fn offending_key(&self) -> Option<&str> {
        match self {
            Violation::UnknownAction { action } => Some(action),
            Violation::UnknownProviderAgent { agent }
            | Violation::UnknownReceiverAgent { agent }
            | Violation::UnknownScopeAgent { agent } => Some(agent),
            Violation::UnknownResourceSpecification { spec } => Some(spec),
            Violation::UnknownResource { resource } => Some(resource),
            Violation::UnknownUnit { unit, .. } => Some(unit),
            Violation::BeginningAfterEnd { .. } | Violation::DueInPast { .. } => None,
        }
    }
}

/// Validates a write intent against the current cache snapshots, using the
/// wall clock for temporal checks.
pub fn validate_intent(cache: &EntityCache, intent: &WriteIntent) -> Vec<Violation> {
    validate_intent_at(cache, intent, Utc::now())
}

/// Validates a write intent with an explicit validation time.
///
/// An empty list means the intent references only known entities and its
/// timestamps are coherent.
pub fn validate_intent_at(
    cache: &EntityCache,
    intent: &WriteIntent,
    now: DateTime<Utc>,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !cache.contains(EntityClass::Action, &intent.action) {
        violations.push(Violation::UnknownAction {
            action: intent.action.clone(),
        });
    }

    let agents = cache.snapshot(EntityClass::Agent);
    if let Some(provider) = &intent.provider {
        if !agents.contains(provider) {
            violations.push(Violation::UnknownProviderAgent {
                agent: provider.clone(),
            });
        }
    }
    if let Some(receiver) = &intent.receiver {
        if !agents.contains(receiver) {
            violations.push(Violation::UnknownReceiverAgent {
                agent: receiver.clone(),
            });
        }
    }
    if let Some(scope) = &intent.in_scope_of {
        if !agents.contains(scope) {
            violations.push(Violation::UnknownScopeAgent {
                agent: scope.clone(),
            });
        }
    }

    if let Some(spec) = &intent.resource_conforms_to {
        if !cache.contains(EntityClass::ResourceSpecification, spec) {
            violations.push(Violation::UnknownResourceSpecification { spec: spec.clone() });
        }
    }

    if let Some(resource) = &intent.resource_inventoried_as {
        if !cache.contains(EntityClass::EconomicResource, resource) {
            violations.push(Violation::UnknownResource {
                resource: resource.clone(),
            });
        }
    }

    let units = cache.snapshot(EntityClass::Unit);
    check_quantity(
        &intent.resource_quantity,
        QuantityField::Resource,
        |key| units.contains(key),
        &mut violations,
    );
    check_quantity(
        &intent.effort_quantity,
        QuantityField::Effort,
        |key| units.contains(key),
        &mut violations,
    );

    if let (Some(beginning), Some(end)) = (intent.has_beginning, intent.has_end) {
        if beginning >= end {
            violations.push(Violation::BeginningAfterEnd { beginning, end });
        }
    }

    if let Some(due) = intent.due {
        if due < now {
            violations.push(Violation::DueInPast { due });
        }
    }

    violations
}

fn check_quantity(
    quantity: &Option<Measure>,
    field: QuantityField,
    unit_known: impl Fn(&str) -> bool,
    violations: &mut Vec<Violation>,
) {
    let Some(unit) = quantity.as_ref().and_then(|q| q.has_unit.as_deref()) else {
        return;
    };
    if !unit_known(unit) {
        violations.push(Violation::UnknownUnit {
            unit: unit.to_string(),
            quantity: field,
        });
    }
}
