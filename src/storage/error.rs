use std::io;
use thiserror::Error;

use crate::domain::{DomainError, Phone};

/// Storage-level errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("account not found: {0}")]
    AccountNotFound(i64),

    #[error("phone already registered: {0}")]
    PhoneRegistered(Phone),

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),
}
