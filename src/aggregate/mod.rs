//! Concurrent aggregation of payment amounts with progress reporting
//!
//! The input is split into balanced contiguous partitions, one worker sums
//! each partition, and the partial sums are folded into a total as they
//! arrive. Progress events come in completion order, never index order.

pub mod aggregator;
pub mod error;
pub mod partition;
pub mod progress;
pub mod stream;

// Re-export commonly used types
pub use aggregator::Aggregator;
pub use error::AggregateError;
pub use partition::{Partition, default_workers, partition};
pub use progress::{Amount, Progress};
pub use stream::ProgressStream;
