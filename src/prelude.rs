//! Prelude module for convenient imports
//!
//! Import everything you need with: `use wallet::prelude::*;`

// Domain types
pub use crate::domain::{
    Account, DomainError, Favorite, Money, Payment, PaymentCategory, PaymentStatus, Phone,
};

// Storage types
pub use crate::storage::{
    AccountEntry, AccountStore, ConcurrentAccountStore, ConcurrentRecordStore, FavoriteStore,
    PaymentStore, Record, RecordStore, Snapshot, StorageError,
};

// Aggregation types
pub use crate::aggregate::{
    AggregateError, Aggregator, Amount, Partition, Progress, ProgressStream, default_workers,
    partition,
};

// Engine types
pub use crate::engine::{EngineError, WalletService};

// IO types
pub use crate::io::{
    DumpSummary, IoError, export_accounts_to_file, export_dir, import_accounts_from_file,
    import_dir,
};

// App types
pub use crate::app::{AppError, CliApp, WalletConfig};
