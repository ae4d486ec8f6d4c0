use thiserror::Error;

/// Domain-level errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Invalid payment status: {0}")]
    InvalidStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            DomainError::InvalidAmount.to_string(),
            "amount must be greater than zero"
        );
        assert_eq!(DomainError::Overflow.to_string(), "Arithmetic overflow");
        assert_eq!(
            DomainError::InvalidStatus("DONE".to_string()).to_string(),
            "Invalid payment status: DONE"
        );
    }

    #[test]
    fn error_comparison_works() {
        assert_eq!(DomainError::InvalidAmount, DomainError::InvalidAmount);
        assert_ne!(DomainError::InvalidAmount, DomainError::Overflow);
    }
}
