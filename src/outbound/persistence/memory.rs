//! In-memory record store backed by a `BTreeMap`.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{Record, RecordStore, RecordStoreError};

/// Thread-safe in-memory [`RecordStore`] adapter.
///
/// Identifiers come from a per-store sequence starting at 1. Listing returns
/// records in ascending identifier order.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<BTreeMap<i64, T>>,
    sequence: AtomicI64,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(1),
        }
    }
}

impl<T> MemoryStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> RecordStoreError {
    RecordStoreError::backend("store lock poisoned")
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryStore<T> {
    async fn insert(&self, mut record: T) -> Result<T, RecordStoreError> {
        if let Some(id) = record.id() {
            return Err(RecordStoreError::identifier_already_present(id.into()));
        }
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        record.assign_id(T::Id::from(id));
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn save(&self, record: T) -> Result<T, RecordStoreError> {
        let Some(id) = record.id() else {
            return self.insert(record).await;
        };
        let mut records = self.records.write().map_err(|_| poisoned())?;
        match records.get_mut(&id.into()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(RecordStoreError::not_found(id.into())),
        }
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RecordStoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(&id.into()).cloned())
    }

    async fn exists_by_id(&self, id: T::Id) -> Result<bool, RecordStoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.contains_key(&id.into()))
    }

    async fn find_all(&self) -> Result<Vec<T>, RecordStoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<(), RecordStoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.remove(&id.into());
        Ok(())
    }
}
