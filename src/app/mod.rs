pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use cli::{CliApp, EXIT_FAILURE, EXIT_SUCCESS};
pub use config::WalletConfig;
pub use error::AppError;
