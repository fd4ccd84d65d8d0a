//! Write intents — candidate transactional records.
//!
//! A `WriteIntent` is an economic event, commitment, or intent record as
//! proposed by a caller, before submission. Every field that references
//! another entity does so by stable key; the validation gate checks each
//! reference against the entity cache. The intent carries the union of the
//! three record shapes — fields that do not apply to a given record kind
//! are simply left unset.

use crate::Measure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate transactional write (economic event / commitment / intent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteIntent {
    /// Stable key of the action performed (e.g. "produce", "transfer").
    pub action: String,

    /// Stable key of the providing agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Stable key of the receiving agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,

    /// Stable key of the agent in whose scope the record falls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_scope_of: Option<String>,

    /// Stable key of the concrete resource affected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_inventoried_as: Option<String>,

    /// Stable key of the resource specification conformed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_conforms_to: Option<String>,

    /// Quantity of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_quantity: Option<Measure>,

    /// Quantity of effort expended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_quantity: Option<Measure>,

    /// Instantaneous occurrence time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_point_in_time: Option<DateTime<Utc>>,

    /// Start of the occurrence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_beginning: Option<DateTime<Utc>>,

    /// End of the occurrence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_end: Option<DateTime<Utc>>,

    /// Deadline (commitments and intents).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,

    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WriteIntent {
    /// Creates an intent for the given action with no other fields set.
    #[must_use]
    pub fn for_action(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            provider: None,
            receiver: None,
            in_scope_of: None,
            resource_inventoried_as: None,
            resource_conforms_to: None,
            resource_quantity: None,
            effort_quantity: None,
            has_point_in_time: None,
            has_beginning: None,
            has_end: None,
            due: None,
            note: None,
        }
    }

    /// Sets the providing agent.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the receiving agent.
    #[must_use]
    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// Sets the scope agent.
    #[must_use]
    pub fn with_scope(mut self, agent: impl Into<String>) -> Self {
        self.in_scope_of = Some(agent.into());
        self
    }

    /// Sets the concrete resource reference.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource_inventoried_as = Some(resource.into());
        self
    }

    /// Sets the resource specification reference.
    #[must_use]
    pub fn conforming_to(mut self, spec: impl Into<String>) -> Self {
        self.resource_conforms_to = Some(spec.into());
        self
    }

    /// Sets the resource quantity.
    #[must_use]
    pub fn with_resource_quantity(mut self, quantity: Measure) -> Self {
        self.resource_quantity = Some(quantity);
        self
    }

    /// Sets the effort quantity.
    #[must_use]
    pub fn with_effort_quantity(mut self, quantity: Measure) -> Self {
        self.effort_quantity = Some(quantity);
        self
    }

    /// Sets the occurrence interval.
    #[must_use]
    pub fn spanning(mut self, beginning: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.has_beginning = Some(beginning);
        self.has_end = Some(end);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub fn due_at(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }
}
