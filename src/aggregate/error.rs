use thiserror::Error;

/// Errors that abort a whole aggregation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("worker for partition {part} panicked: {message}")]
    WorkerPanicked { part: usize, message: String },

    #[error("expected {expected} partial sums, received {received}")]
    MissingPartials { expected: usize, received: usize },

    #[error("could not start worker for partition {part}: {message}")]
    SpawnFailed { part: usize, message: String },

    #[error("total does not fit in a 64-bit amount")]
    TotalOverflow,
}
