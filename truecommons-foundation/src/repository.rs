//! Backend entity repository abstraction.
//!
//! Defines the per-class collaborator the foundation core talks to. Each
//! repository owns the wire mapping for its class and, per the error
//! contract, classifies backend failures into the structured
//! [`RepositoryError`] taxonomy itself — the core never inspects failure
//! message text.

use crate::error::RepositoryError;
use async_trait::async_trait;
use truecommons_types::{EntityClass, Payload, ReferenceEntity, RemoteId};

/// A backend repository for one entity class.
///
/// All calls are network-bound and may fail at any time. `create_one`
/// receives the caller's stable key explicitly because the backend assigns
/// its own opaque id; the repository maps the key into whichever wire field
/// carries identity for its class (a unit's `omUnitIdentifier`, a
/// specification's `name`, ...).
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// The entity class this repository serves.
    fn class(&self) -> EntityClass;

    /// Fetches every record of the class.
    async fn fetch_all(&self) -> Result<Vec<ReferenceEntity>, RepositoryError>;

    /// Creates one record. Returns the stored entity with its
    /// backend-assigned id.
    async fn create_one(
        &self,
        stable_key: &str,
        payload: &Payload,
    ) -> Result<ReferenceEntity, RepositoryError>;

    /// Deletes one record by backend id and revision handle.
    async fn delete_one(
        &self,
        remote_id: &RemoteId,
        revision_id: Option<&str>,
    ) -> Result<(), RepositoryError>;
}

/// A deterministic in-memory repository for testing.
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Shared, ordered log of repository operations across mock instances.
    /// Entries look like `"fetch unit"` or `"create resourceSpecification Document"`.
    pub type OperationLog = Arc<Mutex<Vec<String>>>;

    /// Creates an empty shared operation log.
    pub fn operation_log() -> OperationLog {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// An in-memory repository with injectable failure modes.
    pub struct InMemoryRepository {
        class: EntityClass,
        entities: Mutex<Vec<ReferenceEntity>>,
        fail_reads: AtomicBool,
        structural_writes: AtomicBool,
        transient_writes: AtomicBool,
        fail_deletes: AtomicBool,
        transient_keys: Mutex<HashSet<String>>,
        fetch_calls: AtomicUsize,
        create_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        next_id: AtomicU64,
        log: Mutex<Option<OperationLog>>,
    }

    impl InMemoryRepository {
        /// Creates an empty repository for a class.
        pub fn new(class: EntityClass) -> Self {
            Self {
                class,
                entities: Mutex::new(Vec::new()),
                fail_reads: AtomicBool::new(false),
                structural_writes: AtomicBool::new(false),
                transient_writes: AtomicBool::new(false),
                fail_deletes: AtomicBool::new(false),
                transient_keys: Mutex::new(HashSet::new()),
                fetch_calls: AtomicUsize::new(0),
                create_calls: AtomicUsize::new(0),
                delete_calls: AtomicUsize::new(0),
                next_id: AtomicU64::new(1),
                log: Mutex::new(None),
            }
        }

        /// Pre-populates a record, as if the backend already held it.
        pub fn seed(&self, stable_key: impl Into<String>, payload: Payload) {
            let key = stable_key.into();
            let entity = ReferenceEntity::new(key, self.assign_id())
                .with_revision(self.assign_id())
                .with_payload(payload);
            self.entities.lock().unwrap().push(entity);
        }

        /// Attaches a shared operation log for ordering assertions.
        pub fn attach_log(&self, log: OperationLog) {
            *self.log.lock().unwrap() = Some(log);
        }

        /// Makes every `fetch_all` fail with a network error.
        pub fn set_fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// Makes every `create_one` fail with a structural rejection, as a
        /// schema without the mutation would.
        pub fn set_structural_writes(&self, structural: bool) {
            self.structural_writes.store(structural, Ordering::SeqCst);
        }

        /// Makes every `create_one` fail transiently, as a backend with the
        /// mutation but a rejecting validation layer would.
        pub fn set_transient_writes(&self, transient: bool) {
            self.transient_writes.store(transient, Ordering::SeqCst);
        }

        /// Makes every `delete_one` fail transiently.
        pub fn set_fail_deletes(&self, fail: bool) {
            self.fail_deletes.store(fail, Ordering::SeqCst);
        }

        /// Makes `create_one` for a specific key fail transiently.
        pub fn fail_create_for(&self, stable_key: impl Into<String>) {
            self.transient_keys.lock().unwrap().insert(stable_key.into());
        }

        /// Number of `fetch_all` calls observed.
        pub fn fetch_calls(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }

        /// Number of `create_one` calls observed.
        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        /// Number of `delete_one` calls observed.
        pub fn delete_calls(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }

        /// Current stored stable keys.
        pub fn stored_keys(&self) -> Vec<String> {
            self.entities
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.stable_key.clone())
                .collect()
        }

        fn assign_id(&self) -> String {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            format!("{}-{}", self.class, n)
        }

        fn record(&self, operation: &str, detail: &str) {
            if let Some(log) = self.log.lock().unwrap().as_ref() {
                let entry = if detail.is_empty() {
                    format!("{} {}", operation, self.class)
                } else {
                    format!("{} {} {}", operation, self.class, detail)
                };
                log.lock().unwrap().push(entry);
            }
        }
    }

    #[async_trait]
    impl ReferenceRepository for InMemoryRepository {
        fn class(&self) -> EntityClass {
            self.class
        }

        async fn fetch_all(&self) -> Result<Vec<ReferenceEntity>, RepositoryError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.record("fetch", "");

            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(RepositoryError::Network("backend unreachable".into()));
            }
            Ok(self.entities.lock().unwrap().clone())
        }

        async fn create_one(
            &self,
            stable_key: &str,
            payload: &Payload,
        ) -> Result<ReferenceEntity, RepositoryError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.record("create", stable_key);

            if self.structural_writes.load(Ordering::SeqCst) {
                return Err(RepositoryError::StructuralUnsupported(format!(
                    "unknown mutation for class {}",
                    self.class
                )));
            }
            if self.transient_writes.load(Ordering::SeqCst) {
                return Err(RepositoryError::Transient(format!(
                    "backend rejected {stable_key}"
                )));
            }
            if self.transient_keys.lock().unwrap().contains(stable_key) {
                return Err(RepositoryError::Transient(format!(
                    "backend rejected {stable_key}"
                )));
            }

            let mut entities = self.entities.lock().unwrap();
            if entities.iter().any(|e| e.stable_key == stable_key) {
                return Err(RepositoryError::Transient(format!(
                    "record {stable_key} already exists"
                )));
            }
            let entity = ReferenceEntity::new(stable_key, self.assign_id())
                .with_revision(self.assign_id())
                .with_payload(payload.clone());
            entities.push(entity.clone());
            Ok(entity)
        }

        async fn delete_one(
            &self,
            remote_id: &RemoteId,
            _revision_id: Option<&str>,
        ) -> Result<(), RepositoryError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.record("delete", remote_id.as_str());

            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(RepositoryError::Transient("delete rejected".into()));
            }

            let mut entities = self.entities.lock().unwrap();
            let before = entities.len();
            entities.retain(|e| &e.remote_id != remote_id);
            if entities.len() == before {
                return Err(RepositoryError::Transient(format!(
                    "no record with id {remote_id}"
                )));
            }
            Ok(())
        }
    }
}
