use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::domain::{DomainError, Phone};
use crate::storage::StorageError;

/// Engine-level errors for wallet operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("phone already registered: {0}")]
    PhoneRegistered(Phone),

    #[error("account not found: {0}")]
    AccountNotFound(i64),

    #[error("payment not found: {0}")]
    PaymentNotFound(String),

    #[error("favorite not found: {0}")]
    FavoriteNotFound(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregateError),
}

impl From<StorageError> for EngineError {
    /// Lift the not-found cases the caller can act on into their own variants
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AccountNotFound(id) => Self::AccountNotFound(id),
            StorageError::PhoneRegistered(phone) => Self::PhoneRegistered(phone),
            StorageError::DomainError(domain) => Self::Domain(domain),
            other => Self::Storage(other),
        }
    }
}
