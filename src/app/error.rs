use std::io;
use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::engine::EngineError;
use crate::io::IoError;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Wallet dump error: {0}")]
    Wallet(#[from] IoError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregateError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            AppError::InvalidArguments("missing dump dir".to_string()).to_string(),
            "Invalid arguments: missing dump dir"
        );
        assert_eq!(
            AppError::Engine(EngineError::AccountNotFound(4)).to_string(),
            "Engine error: account not found: 4"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err = AppError::from(io_err);

        match app_err {
            AppError::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn dump_error_conversion() {
        let app_err = AppError::from(IoError::MissingField("phone".to_string()));

        match app_err {
            AppError::Wallet(IoError::MissingField(field)) => assert_eq!(field, "phone"),
            _ => panic!("Expected Wallet error variant"),
        }
    }

    #[test]
    fn aggregation_error_conversion() {
        let app_err = AppError::from(AggregateError::TotalOverflow);
        assert!(matches!(
            app_err,
            AppError::Aggregation(AggregateError::TotalOverflow)
        ));
    }
}
