//! Foundation reconciliation and referential validation for True Commons.
//!
//! The backend holds a graph-structured economic ledger whose write
//! capability is unknown at startup: some deployments expose the full
//! mutation surface, some are read-only mirrors of the reference
//! vocabulary. Before any domain feature may operate, this crate
//! guarantees a required baseline of reference data (measurement units, an
//! action vocabulary, resource and process classification specs) exists on
//! the backend, and gatekeeps subsequent writes by checking that every
//! entity they reference is already known.
//!
//! # Components
//!
//! - **Entity cache**: per-class snapshots of backend-known entities,
//!   replaced wholesale on refresh so readers never see a torn view
//! - **Capability prober**: empirically determines which classes the
//!   backend accepts writes for
//! - **Baseline reconciler**: diffs the required baseline against the
//!   cache and provisions whatever is missing, tolerant of per-item
//!   failure
//! - **Foundation service**: orchestrates probing and ordered per-class
//!   reconciliation into a terminal readiness state, single-flight
//! - **Validation gate**: pure check that a candidate write only
//!   references entities known to exist
//!
//! # Initialization sequence
//!
//! 1. **Probe**: a read attempt per class, then one disposable sentinel
//!    write per class, classifying the schema as full, read-only, or
//!    unknown
//! 2. **Reconcile**: units, then actions, then resource specifications
//!    (which reference unit keys), then process specifications
//! 3. **Verify**: re-fetch every class and recompute readiness
//!
//! A read-only backend is accepted with whatever subset already exists;
//! `check_readiness()` reports the unmet detail per class.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use truecommons_foundation::repository::mock::InMemoryRepository;
//! use truecommons_foundation::{
//!     EntityCache, FoundationService, ReferenceRepository, RequiredBaseline,
//! };
//! use truecommons_types::EntityClass;
//!
//! let repositories: Vec<Arc<dyn ReferenceRepository>> = EntityClass::RECONCILE_ORDER
//!     .iter()
//!     .map(|&class| Arc::new(InMemoryRepository::new(class)) as Arc<dyn ReferenceRepository>)
//!     .collect();
//! let cache = Arc::new(EntityCache::new(repositories));
//! let service = FoundationService::new(cache, RequiredBaseline::default());
//! ```

pub mod baseline;
mod cache;
mod error;
mod probe;
mod reconcile;
pub mod repository;
mod service;
mod validate;

pub use baseline::{BaselineRecord, ClassBaseline, RequiredBaseline};
pub use cache::{ClassSnapshot, EntityCache};
pub use error::{FoundationError, FoundationResult, RepositoryError};
pub use probe::{CapabilityProber, SchemaCapabilities, SchemaType};
pub use reconcile::{BaselineReconciler, ItemFailure, ReconcileOutcome};
pub use repository::ReferenceRepository;
pub use service::{ClassReadiness, FoundationService, InitStatus, InitStep, ReadinessReport};
pub use validate::{validate_intent, validate_intent_at, QuantityField, Violation};
