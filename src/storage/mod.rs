pub mod concurrent;
pub mod error;
pub mod record_store;
pub mod traits;

// Re-export commonly used types
pub use concurrent::ConcurrentAccountStore;
pub use error::StorageError;
pub use record_store::{ConcurrentRecordStore, FavoriteStore, PaymentStore};
pub use traits::{AccountEntry, AccountStore, Record, RecordStore, Snapshot};
