pub mod account;
pub mod amount;
pub mod error;
pub mod operations;
pub mod payment;

// Re-export commonly used types
pub use account::{Account, Phone};
pub use amount::Money;
pub use error::DomainError;
pub use operations::{apply_deposit, apply_payment, apply_refund};
pub use payment::{Favorite, Payment, PaymentCategory, PaymentStatus};
