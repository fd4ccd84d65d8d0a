//! Baseline reconciliation.
//!
//! Diffs the required baseline for one class against a freshly refreshed
//! cache snapshot and provisions whatever is missing. Item failures are
//! recorded and do not stop the pass; a structural rejection propagates,
//! because it means the whole class cannot be provisioned and the caller's
//! capability policy decides what that implies.

use crate::baseline::RequiredBaseline;
use crate::cache::EntityCache;
use crate::error::RepositoryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use truecommons_types::{EntityClass, Payload};

/// Payload fields that reference measurement units by stable key.
const UNIT_REFERENCE_FIELDS: [&str; 2] = ["defaultUnitOfResource", "defaultUnitOfEffort"];

/// One baseline item that could not be provisioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// The item's stable key.
    pub stable_key: String,
    /// The repository's (or resolver's) description of the failure.
    pub reason: String,
}

/// The result of one reconciliation pass over a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// The reconciled class.
    pub class: EntityClass,
    /// Keys created this pass.
    pub created: Vec<String>,
    /// Keys already present; no write attempted.
    pub skipped: Vec<String>,
    /// Keys whose creation failed transiently.
    pub failed: Vec<ItemFailure>,
}

impl ReconcileOutcome {
    fn new(class: EntityClass) -> Self {
        Self {
            class,
            created: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Whether the pass provisioned everything it attempted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Provisions missing baseline items class by class.
pub struct BaselineReconciler {
    cache: Arc<EntityCache>,
    baseline: Arc<RequiredBaseline>,
}

impl BaselineReconciler {
    /// Creates a reconciler over the cache and baseline tables.
    pub fn new(cache: Arc<EntityCache>, baseline: Arc<RequiredBaseline>) -> Self {
        Self { cache, baseline }
    }

    /// Reconciles one class: refresh, diff, create the difference.
    ///
    /// Idempotent with respect to backend state — when nothing is missing,
    /// no write is issued and every baseline key lands in `skipped`.
    /// A structural rejection propagates; any other creation failure is
    /// recorded and the pass continues with the next item.
    pub async fn reconcile(
        &self,
        class: EntityClass,
    ) -> Result<ReconcileOutcome, RepositoryError> {
        let mut outcome = ReconcileOutcome::new(class);

        let Some(table) = self.baseline.for_class(class) else {
            warn!("No baseline table for {}, nothing to reconcile", class);
            return Ok(outcome);
        };

        let snapshot = self.cache.refresh(class).await?;
        let existing_keys = snapshot.keys();
        let repository = self.cache.repository(class)?;

        for record in &table.records {
            if existing_keys.contains(&record.stable_key) {
                debug!("{} {} already exists, skipping", class, record.stable_key);
                outcome.skipped.push(record.stable_key.clone());
                continue;
            }

            let payload = match self.prepare_payload(class, &record.payload) {
                Ok(p) => p,
                Err(reason) => {
                    warn!(
                        "Cannot prepare {} {}: {}",
                        class, record.stable_key, reason
                    );
                    outcome.failed.push(ItemFailure {
                        stable_key: record.stable_key.clone(),
                        reason,
                    });
                    continue;
                }
            };

            match repository.create_one(&record.stable_key, &payload).await {
                Ok(_) => {
                    info!("Created {} {}", class, record.stable_key);
                    outcome.created.push(record.stable_key.clone());
                }
                Err(e) if e.is_structural() => {
                    warn!("{} creation rejected structurally: {}", class, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Failed to create {} {}: {}", class, record.stable_key, e);
                    outcome.failed.push(ItemFailure {
                        stable_key: record.stable_key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Fold this pass's creations into the snapshot so dependent classes
        // resolve against them.
        if !outcome.created.is_empty() {
            if let Err(e) = self.cache.refresh(class).await {
                warn!("Post-reconcile refresh of {} failed: {}", class, e);
            }
        }

        info!(
            "Reconciled {}: {} created, {} skipped, {} failed",
            class,
            outcome.created.len(),
            outcome.skipped.len(),
            outcome.failed.len()
        );

        Ok(outcome)
    }

    /// Rewrites unit stable-key references into backend unit ids.
    /// Only resource specifications carry unit references.
    fn prepare_payload(&self, class: EntityClass, payload: &Payload) -> Result<Payload, String> {
        if class != EntityClass::ResourceSpecification {
            return Ok(payload.clone());
        }

        let units = self.cache.snapshot(EntityClass::Unit);
        let mut prepared = payload.clone();
        for field in UNIT_REFERENCE_FIELDS {
            let Some(unit_key) = payload.get(field).and_then(Value::as_str) else {
                continue;
            };
            let Some(unit) = units.get(unit_key) else {
                return Err(format!("unit {unit_key} is not known to the backend"));
            };
            prepared.insert(field.into(), Value::String(unit.remote_id.to_string()));
        }
        Ok(prepared)
    }
}
