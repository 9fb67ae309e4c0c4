//! Mock record store for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{entity::Entity, models::RecordId, ports::outbound::RecordStore, RecordError};

/// Mock record store backed by an in-memory map.
///
/// Every `create`, `update` and `delete` call is counted, whether or not it
/// changes anything, so tests can assert that a request never reached
/// persistence.
pub struct MockRecordStore<E> {
    records: Arc<RwLock<BTreeMap<RecordId, E>>>,
    next_id: Arc<AtomicI64>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    vanish_on_update: Arc<AtomicBool>,
}

impl<E> Clone for MockRecordStore<E> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            next_id: Arc::clone(&self.next_id),
            writes: Arc::clone(&self.writes),
            failing: Arc::clone(&self.failing),
            vanish_on_update: Arc::clone(&self.vanish_on_update),
        }
    }
}

impl<E> Default for MockRecordStore<E> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            writes: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
            vanish_on_update: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<E: Entity> MockRecordStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with a storage error.
    pub fn failing(self) -> Self {
        self.failing.store(true, Ordering::SeqCst);
        self
    }

    /// Deletes the record right before an update reaches it, as a concurrent
    /// delete between fetch and update would.
    pub fn vanish_on_update(self) -> Self {
        self.vanish_on_update.store(true, Ordering::SeqCst);
        self
    }

    /// Number of write calls received so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// All stored records in id order (for test assertions).
    pub fn all_records(&self) -> Vec<E> {
        self.records.read().unwrap().values().cloned().collect()
    }

    fn check(&self) -> Result<(), RecordError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RecordError::storage("connection refused"))
        } else {
            Ok(())
        }
    }

    fn record_write(&self) -> Result<(), RecordError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()
    }
}

#[async_trait]
impl<E: Entity> RecordStore<E> for MockRecordStore<E> {
    async fn find_all(&self) -> Result<Vec<E>, RecordError> {
        self.check()?;

        let mut records = self.all_records();
        records.sort_by(|a, b| {
            b.updated_at()
                .cmp(&a.updated_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(records)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<E>, RecordError> {
        self.check()?;
        Ok(self.records.read().unwrap().get(&id).cloned())
    }

    async fn create(&self, fields: &E::Fields) -> Result<E, RecordError> {
        self.record_write()?;

        let id = RecordId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = OffsetDateTime::now_utc();
        let record = E::from_parts(id, fields.clone(), now, now);

        self.records.write().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: &E) -> Result<bool, RecordError> {
        self.record_write()?;

        let mut records = self.records.write().unwrap();
        if self.vanish_on_update.load(Ordering::SeqCst) {
            records.remove(&record.id());
        }
        match records.get_mut(&record.id()) {
            Some(stored) => {
                *stored = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool, RecordError> {
        self.record_write()?;
        Ok(self.records.write().unwrap().remove(&id).is_some())
    }
}
