pub mod error;
pub mod service;

// Re-export commonly used types
pub use error::EngineError;
pub use service::WalletService;
