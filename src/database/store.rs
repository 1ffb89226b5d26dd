use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::container::{Container, ContainerFields, DEFAULT_ENTRYPOINT, DEFAULT_IMAGE};

/// Errors produced by container store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("missing required field: Hostname")]
    MissingHostname,
    #[error("containers are empty")]
    Empty,
    #[error("container {0} not found")]
    NotFound(u64),
}

/// Next free key: one past the largest live key, or 1 for an empty set.
///
/// Deleting the highest record frees its key for the next insert.
pub fn next_id<'a>(existing: impl IntoIterator<Item = &'a u64>) -> u64 {
    existing.into_iter().max().map_or(1, |max| max + 1)
}

/// Process-wide in-memory container registry.
///
/// Cloning shares the underlying map. Each operation holds the lock for its
/// whole duration, so concurrent callers never observe a half-applied write.
#[derive(Debug, Clone, Default)]
pub struct ContainerStore {
    records: Arc<Mutex<BTreeMap<u64, Container>>>,
}

impl ContainerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<u64, Container>> {
        // A panic mid-operation cannot leave a partial record behind, so the
        // map is still consistent after poisoning.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a record from `fields`. `Hostname` is mandatory; the other
    /// fields fall back to their defaults.
    pub fn insert(&self, fields: ContainerFields) -> Result<Container, StoreError> {
        let hostname = fields.hostname.ok_or(StoreError::MissingHostname)?;

        let mut records = self.lock();
        let id = next_id(records.keys());
        let container = Container {
            id,
            hostname,
            entrypoint: fields
                .entrypoint
                .unwrap_or_else(|| DEFAULT_ENTRYPOINT.to_string()),
            image: fields.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        };
        records.insert(id, container.clone());

        tracing::debug!(id, hostname = %container.hostname, "container created");
        Ok(container)
    }

    /// All records ordered by id. An empty store is reported as an error.
    pub fn list_all(&self) -> Result<Vec<Container>, StoreError> {
        let records = self.lock();
        if records.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(records.values().cloned().collect())
    }

    pub fn get(&self, id: u64) -> Result<Container, StoreError> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Merge the recognised fields present in `fields` over record `id`.
    /// An empty `fields` leaves the record as it was.
    pub fn update(&self, id: u64, fields: ContainerFields) -> Result<Container, StoreError> {
        let mut records = self.lock();
        let container = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if !fields.is_empty() {
            container.merge(fields);
            tracing::debug!(id, "container updated");
        }
        Ok(container.clone())
    }

    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.lock().remove(&id).ok_or(StoreError::NotFound(id))?;
        tracing::debug!(id, "container deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every record. Used to isolate test runs; not reachable over HTTP.
    pub fn reset(&self) {
        self.lock().clear();
    }
}
