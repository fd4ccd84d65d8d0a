//! Capability probing.
//!
//! The backend's write capability is unknown at startup: some deployments
//! expose the full mutation surface, some are read-only mirrors of the
//! reference vocabulary. The prober finds out empirically — a read attempt
//! per class, then one disposable, uniquely-named sentinel write per class —
//! and classifies the outcome without ever propagating an error.

use crate::cache::EntityCache;
use crate::repository::ReferenceRepository;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use truecommons_types::{EntityClass, Payload};
use uuid::Uuid;

/// Read probes that must succeed before the schema is considered mapped.
const MIN_READABLE_CLASSES: usize = 3;

/// What the backend schema supports overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    /// Reads work and at least one reference class accepts writes.
    Full,
    /// Reads work but no reference class accepts writes.
    ReadOnly,
    /// The schema could not be mapped; assume nothing.
    Unknown,
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaType::Full => "full",
            SchemaType::ReadOnly => "read-only",
            SchemaType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Per-class write support plus the overall schema classification.
/// Computed once per initialization run and discarded on reset.
#[derive(Debug, Clone)]
pub struct SchemaCapabilities {
    /// Write support per reference class.
    pub class_support: HashMap<EntityClass, bool>,
    /// Classes whose read probe succeeded.
    pub readable_classes: Vec<EntityClass>,
    /// Overall classification.
    pub schema_type: SchemaType,
}

impl SchemaCapabilities {
    /// The pessimistic fallback used when probing itself fails: nothing
    /// readable, nothing writable, schema unknown.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            class_support: HashMap::new(),
            readable_classes: Vec::new(),
            schema_type: SchemaType::Unknown,
        }
    }

    /// Whether the class accepted the write probe.
    #[must_use]
    pub fn supports_writes(&self, class: EntityClass) -> bool {
        self.class_support.get(&class).copied().unwrap_or(false)
    }
}

/// Probes the backend for read and write capability per reference class.
pub struct CapabilityProber {
    cache: Arc<EntityCache>,
}

impl CapabilityProber {
    /// Creates a prober over the cache's registered repositories.
    pub fn new(cache: Arc<EntityCache>) -> Self {
        Self { cache }
    }

    /// Probes every reference class. Total: all failures are absorbed into
    /// the returned capability flags.
    pub async fn probe(&self) -> SchemaCapabilities {
        let mut class_support = HashMap::new();
        let mut readable_classes = Vec::new();

        for class in EntityClass::RECONCILE_ORDER {
            let repository = match self.cache.repository(class) {
                Ok(r) => r,
                Err(e) => {
                    debug!("Skipping probe for {}: {}", class, e);
                    class_support.insert(class, false);
                    continue;
                }
            };

            match repository.fetch_all().await {
                Ok(entities) => {
                    debug!("Read probe for {} succeeded ({} entities)", class, entities.len());
                    readable_classes.push(class);
                }
                Err(e) => debug!("Read probe for {} failed: {}", class, e),
            }

            let writable = self.probe_write(repository.as_ref(), class).await;
            class_support.insert(class, writable);
        }

        let any_writable = class_support.values().any(|&w| w);
        let schema_type = if readable_classes.len() >= MIN_READABLE_CLASSES {
            if any_writable {
                SchemaType::Full
            } else {
                SchemaType::ReadOnly
            }
        } else {
            SchemaType::Unknown
        };

        info!(
            "Schema capabilities: {} ({}/{} classes readable, writable: {:?})",
            schema_type,
            readable_classes.len(),
            EntityClass::RECONCILE_ORDER.len(),
            class_support
                .iter()
                .filter(|&(_, &w)| w)
                .map(|(c, _)| *c)
                .collect::<Vec<_>>()
        );

        SchemaCapabilities {
            class_support,
            readable_classes,
            schema_type,
        }
    }

    /// Attempts one disposable sentinel write. Only a structural rejection
    /// proves the write path absent; any other failure means the mutation
    /// exists and this particular attempt failed.
    async fn probe_write(&self, repository: &dyn ReferenceRepository, class: EntityClass) -> bool {
        let sentinel_key = format!("capability-probe-{}", Uuid::new_v4());
        let payload = sentinel_payload();

        match repository.create_one(&sentinel_key, &payload).await {
            Ok(entity) => {
                debug!("Write probe for {} succeeded", class);
                if let Err(e) = repository
                    .delete_one(&entity.remote_id, entity.revision_id.as_deref())
                    .await
                {
                    debug!("Ignoring sentinel cleanup failure for {}: {}", class, e);
                }
                true
            }
            Err(e) if e.is_structural() => {
                debug!("Write probe for {} rejected structurally: {}", class, e);
                false
            }
            Err(e) => {
                debug!(
                    "Write probe for {} failed for a non-structural reason, \
                     treating writes as supported: {}",
                    class, e
                );
                true
            }
        }
    }
}

fn sentinel_payload() -> Payload {
    let mut payload = Payload::new();
    payload.insert("label".into(), json!("Capability Probe"));
    payload.insert("note".into(), json!("disposable capability probe record"));
    payload
}
