use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::{DashMap, Entry};

use super::error::StorageError;
use super::traits::{Record, RecordStore, Snapshot};
use crate::domain::{DomainError, Favorite, Payment};

impl Record for Payment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Favorite {
    fn id(&self) -> &str {
        &self.id
    }
}

struct Slot<R> {
    seq: u64,
    record: R,
}

/// DashMap-based concurrent record store that remembers insertion order
pub struct ConcurrentRecordStore<R: Record> {
    records: DashMap<String, Slot<R>>,
    next_seq: AtomicU64,
}

pub type PaymentStore = ConcurrentRecordStore<Payment>;
pub type FavoriteStore = ConcurrentRecordStore<Favorite>;

impl<R: Record> ConcurrentRecordStore<R> {
    /// Create a new empty concurrent record store
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }
}

impl<R: Record> Default for ConcurrentRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> for ConcurrentRecordStore<R> {
    fn insert(&self, record: R) {
        let seq = self.next_seq();
        self.records
            .insert(record.id().to_string(), Slot { seq, record });
    }

    fn upsert(&self, record: R) -> bool {
        match self.records.entry(record.id().to_string()) {
            Entry::Occupied(mut e) => {
                e.get_mut().record = record;
                false
            }
            Entry::Vacant(e) => {
                let seq = self.next_seq();
                e.insert(Slot { seq, record });
                true
            }
        }
    }

    fn get(&self, id: &str) -> Option<R> {
        self.records.get(id).map(|r| r.record.clone())
    }

    fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    fn try_update<F>(&self, id: &str, update_fn: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut R) -> Result<(), DomainError>,
    {
        let mut slot = self
            .records
            .get_mut(id)
            .ok_or_else(|| StorageError::RecordNotFound(id.to_string()))?;

        update_fn(&mut slot.record)?;
        Ok(slot.record.clone())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

impl<R: Record> Snapshot for ConcurrentRecordStore<R> {
    type Item = R;

    fn snapshot(&self) -> Vec<R> {
        let mut slots: Vec<(u64, R)> = self
            .records
            .iter()
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();

        slots.sort_by_key(|(seq, _)| *seq);
        slots.into_iter().map(|(_, record)| record).collect()
    }
}
