use crate::domain::{Money, Payment};

/// Completion notice for one partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Index of the partition that just completed
    pub part: usize,
    /// Sum of amounts in that partition only
    ///
    /// Partials are exact while they fit in an `i64` and wrap otherwise, so
    /// the wrapping sum of all partials always equals an in-range total.
    pub result: Money,
}

/// Anything the aggregator can sum
pub trait Amount {
    fn amount(&self) -> Money;
}

impl Amount for Money {
    fn amount(&self) -> Money {
        *self
    }
}

impl Amount for Payment {
    fn amount(&self) -> Money {
        self.amount
    }
}
