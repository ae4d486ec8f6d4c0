use std::io;
use thiserror::Error;

use crate::engine::EngineError;
use crate::storage::StorageError;

/// IO-level errors for dump files
#[derive(Error, Debug)]
pub enum IoError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV async parsing error: {0}")]
    CsvAsync(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid number in field {field}: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid payment status: {0}")]
    InvalidStatus(String),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
