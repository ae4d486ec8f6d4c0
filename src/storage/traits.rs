use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::error::StorageError;
use crate::domain::{Account, DomainError, Phone};

/// A stored record addressed by a string id
pub trait Record: Clone + Send + Sync {
    fn id(&self) -> &str;
}

/// Insertion-ordered store of records (payments, favorites)
pub trait RecordStore<R: Record>: Send + Sync {
    /// Append a new record
    fn insert(&self, record: R);

    /// Insert or overwrite by id, keeping the original position on overwrite.
    /// Returns true if the record was new.
    fn upsert(&self, record: R) -> bool;

    /// Get a record by id (returns clone, not reference)
    fn get(&self, id: &str) -> Option<R>;

    /// Check if a record exists
    fn contains(&self, id: &str) -> bool;

    /// Atomic read-modify-write of one record, returning the updated copy
    fn try_update<F>(&self, id: &str, update_fn: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut R) -> Result<(), DomainError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for managing accounts with pluggable storage backends
pub trait AccountStore: Send + Sync {
    type Entry<'a>: AccountEntry<'a>
    where
        Self: 'a;

    /// Register a new account under a unique phone
    fn register(&self, phone: Phone) -> Result<Account, StorageError>;

    /// Get an entry for an existing account
    fn entry(&self, account_id: i64) -> Result<Self::Entry<'_>, StorageError>;

    /// Read-only copy of an account
    fn get(&self, account_id: i64) -> Option<Account>;

    /// Insert or overwrite an account restored from a dump
    fn restore(&self, account: Account);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entry pattern for atomic account operations
pub trait AccountEntry<'a> {
    /// Non-locking read (clones the account data)
    fn read(&self) -> Result<Account, StorageError>;

    /// Atomic read-modify-write with validation, returning the updated account
    fn try_update<F>(&mut self, update_fn: F) -> Result<Account, StorageError>
    where
        F: FnOnce(&mut Account) -> Result<(), DomainError>;
}

/// Ordered snapshot of a store's contents
#[async_trait]
pub trait Snapshot: Sync {
    type Item: Send + Sync;

    /// Copy of every item in store order
    fn snapshot(&self) -> Vec<Self::Item>;

    /// Write one formatted line per item to `writer`, returning the line count
    async fn write_snapshot<W>(
        &self,
        mut writer: W,
        format: for<'x> fn(&'x Self::Item) -> String,
    ) -> Result<usize, StorageError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let items = self.snapshot();

        for item in &items {
            writer.write_all(format(item).as_bytes()).await?;
        }

        writer.flush().await?;
        Ok(items.len())
    }
}
