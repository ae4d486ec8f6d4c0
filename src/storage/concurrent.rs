use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::{DashMap, Entry};

use super::error::StorageError;
use super::traits::{AccountEntry, AccountStore, Snapshot};
use crate::domain::{Account, DomainError, Phone};

/// Concurrent in-memory account store using DashMap
///
/// Ids are allocated sequentially starting at 1. A second map indexes
/// accounts by phone so registration can reject duplicates atomically.
pub struct ConcurrentAccountStore {
    accounts: DashMap<i64, Account>,
    phones: DashMap<Phone, i64>,
    last_id: AtomicI64,
}

impl ConcurrentAccountStore {
    /// Create a new empty concurrent account store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            phones: DashMap::new(),
            last_id: AtomicI64::new(0),
        }
    }

    /// Id of the most recently allocated or restored account
    pub fn last_id(&self) -> i64 {
        self.last_id.load(Ordering::SeqCst)
    }
}

impl Default for ConcurrentAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry for concurrent access
pub struct ConcurrentAccountEntry<'a> {
    account_id: i64,
    accounts: &'a DashMap<i64, Account>,
}

impl<'a> AccountEntry<'a> for ConcurrentAccountEntry<'a> {
    fn read(&self) -> Result<Account, StorageError> {
        self.accounts
            .get(&self.account_id)
            .map(|r| r.value().clone())
            .ok_or(StorageError::AccountNotFound(self.account_id))
    }

    fn try_update<F>(&mut self, update_fn: F) -> Result<Account, StorageError>
    where
        F: FnOnce(&mut Account) -> Result<(), DomainError>,
    {
        // The shard lock is held for the whole read-modify-write
        let mut account = self
            .accounts
            .get_mut(&self.account_id)
            .ok_or(StorageError::AccountNotFound(self.account_id))?;

        update_fn(account.value_mut())?;
        Ok(account.value().clone())
    }
}

impl AccountStore for ConcurrentAccountStore {
    type Entry<'a>
        = ConcurrentAccountEntry<'a>
    where
        Self: 'a;

    fn register(&self, phone: Phone) -> Result<Account, StorageError> {
        match self.phones.entry(phone.clone()) {
            Entry::Occupied(_) => Err(StorageError::PhoneRegistered(phone)),
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
                let account = Account::new(id, phone);

                self.accounts.insert(id, account.clone());
                slot.insert(id);
                Ok(account)
            }
        }
    }

    fn entry(&self, account_id: i64) -> Result<Self::Entry<'_>, StorageError> {
        if !self.accounts.contains_key(&account_id) {
            return Err(StorageError::AccountNotFound(account_id));
        }

        Ok(ConcurrentAccountEntry {
            account_id,
            accounts: &self.accounts,
        })
    }

    fn get(&self, account_id: i64) -> Option<Account> {
        self.accounts.get(&account_id).map(|r| r.value().clone())
    }

    fn restore(&self, account: Account) {
        let id = account.id();
        let phone = account.phone().clone();

        if let Some(previous) = self.accounts.insert(id, account)
            && previous.phone() != &phone
        {
            self.phones.remove(previous.phone());
        }

        self.phones.insert(phone, id);
        self.last_id.fetch_max(id, Ordering::SeqCst);
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}

impl Snapshot for ConcurrentAccountStore {
    type Item = Account;

    fn snapshot(&self) -> Vec<Account> {
        // DashMap holds brief per-shard locks during iteration
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        accounts.sort_by_key(Account::id);
        accounts
    }
}
