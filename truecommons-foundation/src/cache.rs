//! Entity cache — per-class snapshots of backend-known entities.
//!
//! Each class holds one immutable snapshot behind an `Arc`. A refresh
//! fetches the full class from its repository, builds a fresh snapshot, and
//! swaps the `Arc` wholesale — a reader holding the previous snapshot keeps
//! a consistent view and no reader can observe a half-refreshed class. The
//! read API is synchronous so the validation gate stays pure.

use crate::error::RepositoryError;
use crate::repository::ReferenceRepository;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use tracing::debug;
use truecommons_types::{EntityClass, ReferenceEntity};

/// An immutable, fully-populated view of one class.
#[derive(Debug)]
pub struct ClassSnapshot {
    class: EntityClass,
    entities: Vec<ReferenceEntity>,
    by_key: HashMap<String, usize>,
}

impl ClassSnapshot {
    /// Creates an empty snapshot for a class.
    #[must_use]
    pub fn empty(class: EntityClass) -> Self {
        Self {
            class,
            entities: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Builds a snapshot from fetched entities. Later duplicates of a
    /// stable key shadow earlier ones in the index.
    #[must_use]
    pub fn from_entities(class: EntityClass, entities: Vec<ReferenceEntity>) -> Self {
        let by_key = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.stable_key.clone(), i))
            .collect();
        Self {
            class,
            entities,
            by_key,
        }
    }

    /// The class this snapshot covers.
    #[must_use]
    pub fn class(&self) -> EntityClass {
        self.class
    }

    /// Looks up an entity by stable key.
    pub fn get(&self, stable_key: &str) -> Option<&ReferenceEntity> {
        self.by_key.get(stable_key).map(|&i| &self.entities[i])
    }

    /// Returns whether the key is present.
    pub fn contains(&self, stable_key: &str) -> bool {
        self.by_key.contains_key(stable_key)
    }

    /// All entities in fetch order.
    pub fn entities(&self) -> &[ReferenceEntity] {
        &self.entities
    }

    /// The set of stable keys present.
    pub fn keys(&self) -> HashSet<String> {
        self.by_key.keys().cloned().collect()
    }

    /// Number of entities held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// In-memory mirror of backend-known entities, one snapshot per class.
pub struct EntityCache {
    repositories: HashMap<EntityClass, Arc<dyn ReferenceRepository>>,
    snapshots: RwLock<HashMap<EntityClass, Arc<ClassSnapshot>>>,
}

impl EntityCache {
    /// Creates a cache over the given repositories, one per class.
    pub fn new(repositories: Vec<Arc<dyn ReferenceRepository>>) -> Self {
        let repositories = repositories
            .into_iter()
            .map(|r| (r.class(), r))
            .collect();
        Self {
            repositories,
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// The repository registered for a class, if any.
    pub fn repository(
        &self,
        class: EntityClass,
    ) -> Result<Arc<dyn ReferenceRepository>, RepositoryError> {
        self.repositories
            .get(&class)
            .cloned()
            .ok_or(RepositoryError::NotRegistered(class))
    }

    /// The current snapshot for a class. Empty before the first refresh.
    pub fn snapshot(&self, class: EntityClass) -> Arc<ClassSnapshot> {
        self.snapshots
            .read()
            .unwrap()
            .get(&class)
            .cloned()
            .unwrap_or_else(|| Arc::new(ClassSnapshot::empty(class)))
    }

    /// Looks up an entity by class and stable key.
    pub fn get_by_key(&self, class: EntityClass, stable_key: &str) -> Option<ReferenceEntity> {
        self.snapshot(class).get(stable_key).cloned()
    }

    /// All entities currently held for a class, in fetch order.
    pub fn list(&self, class: EntityClass) -> Vec<ReferenceEntity> {
        self.snapshot(class).entities().to_vec()
    }

    /// Returns whether the key exists in the class snapshot.
    pub fn contains(&self, class: EntityClass, stable_key: &str) -> bool {
        self.snapshot(class).contains(stable_key)
    }

    /// Re-fetches a class in full and swaps its snapshot atomically.
    /// A failed fetch leaves the previous snapshot in place.
    pub async fn refresh(
        &self,
        class: EntityClass,
    ) -> Result<Arc<ClassSnapshot>, RepositoryError> {
        let repository = self.repository(class)?;
        let entities = repository.fetch_all().await?;
        debug!("Refreshed {} cache: {} entities", class, entities.len());

        let snapshot = Arc::new(ClassSnapshot::from_entities(class, entities));
        self.snapshots
            .write()
            .unwrap()
            .insert(class, snapshot.clone());
        Ok(snapshot)
    }
}
