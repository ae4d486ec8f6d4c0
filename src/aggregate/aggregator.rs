use std::any::Any;
use std::sync::mpsc;
use std::thread;

use tracing::{debug, trace, warn};

use super::error::AggregateError;
use super::partition::{Partition, default_workers, partition};
use super::progress::{Amount, Progress};
use crate::domain::Money;

/// Exact partial sum of one partition as sent by its worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Partial {
    pub(crate) part: usize,
    pub(crate) sum: i128,
}

/// One worker's outcome as sent over the result channel
pub(crate) type Report = Result<Partial, AggregateError>;

/// Fan-out / fan-in summation of payment amounts
///
/// Every call partitions its input, runs one worker per partition and
/// collects exactly one report per partition through a private channel with
/// one slot per worker, so no worker ever blocks on send.
///
/// Sums are accumulated in `i128` and range-checked once at the end, so the
/// outcome depends only on the input, never on the worker count or on the
/// order in which partitions finish.
///
/// # Example
/// ```rust,ignore
/// let aggregator = Aggregator::with_workers(8);
/// let total = aggregator.sum_with_progress(&payments, |progress| {
///     println!("partition {} done: {}", progress.part, progress.result);
/// })?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    workers: usize,
}

impl Aggregator {
    /// Aggregator with one worker per logical CPU
    pub fn new() -> Self {
        Self {
            workers: default_workers(),
        }
    }

    /// Aggregator with a fixed worker count (clamped to at least 1)
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sum all amounts, blocking until every worker has reported
    pub fn simple_sum<T>(&self, records: &[T]) -> Result<Money, AggregateError>
    where
        T: Amount + Sync,
    {
        self.sum_with_progress(records, |_| {})
    }

    /// Sum all amounts, handing each partial result to `sink` as it arrives
    ///
    /// `sink` runs on the calling thread once per partition, in completion
    /// order. That order is NOT partition-index order.
    pub fn sum_with_progress<T, F>(&self, records: &[T], sink: F) -> Result<Money, AggregateError>
    where
        T: Amount + Sync,
        F: FnMut(Progress),
    {
        self.fan_out(records, |_, slice| Ok(sum_partition(slice)), sink)
    }

    /// Run `worker` over every partition on scoped threads and fold the reports
    pub(crate) fn fan_out<T, W, F>(
        &self,
        records: &[T],
        worker: W,
        mut sink: F,
    ) -> Result<Money, AggregateError>
    where
        T: Sync,
        W: Fn(&Partition, &[T]) -> Result<i128, AggregateError> + Sync,
        F: FnMut(Progress),
    {
        trace!(records = records.len(), workers = self.workers, "Partitioning");
        let partitions = partition(records.len(), self.workers);
        let expected = partitions.len();

        if expected == 0 {
            debug!("Empty input, nothing to aggregate");
            return Ok(Money::zero());
        }

        thread::scope(|scope| {
            let (tx, rx) = mpsc::sync_channel::<Report>(expected);
            let worker = &worker;
            let mut collector = Collector::new(expected);
            let mut handles = Vec::with_capacity(expected);

            for part in &partitions {
                let tx = tx.clone();
                let part = *part;
                let slice = &records[part.range()];

                let spawned = thread::Builder::new()
                    .name(format!("aggregate-{}", part.index))
                    .spawn_scoped(scope, move || {
                        let report = worker(&part, slice).map(|sum| Partial {
                            part: part.index,
                            sum,
                        });
                        if tx.send(report).is_err() {
                            warn!(part = part.index, "Collector gone before report was sent");
                        }
                    });

                match spawned {
                    Ok(handle) => handles.push((part.index, handle)),
                    Err(err) => {
                        warn!(part = part.index, %err, "Could not start partition worker");
                        collector.fail(AggregateError::SpawnFailed {
                            part: part.index,
                            message: err.to_string(),
                        });
                        break;
                    }
                }
            }

            // Only worker-owned senders remain, so the receive loop ends once
            // every started worker has either reported or unwound
            drop(tx);
            debug!(partitions = expected, started = handles.len(), "Dispatched partition workers");

            for report in rx {
                match collector.accept(report) {
                    Ok(progress) => sink(progress),
                    Err(err) => collector.fail(err),
                }
            }

            for (part, handle) in handles {
                if let Err(payload) = handle.join() {
                    collector.fail(AggregateError::WorkerPanicked {
                        part,
                        message: panic_message(payload.as_ref()),
                    });
                }
            }

            collector.finish()
        })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact sequential sum of one partition
///
/// `i128` cannot overflow here: it would take more than 2^63 maximal
/// amounts.
pub(crate) fn sum_partition<T: Amount>(records: &[T]) -> i128 {
    records
        .iter()
        .map(|record| i128::from(record.amount().minor()))
        .sum()
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Fan-in bookkeeping shared by the blocking and streaming front ends
#[derive(Debug)]
pub(crate) struct Collector {
    expected: usize,
    received: usize,
    total: i128,
    error: Option<AggregateError>,
}

impl Collector {
    pub(crate) fn new(expected: usize) -> Self {
        Self {
            expected,
            received: 0,
            total: 0,
            error: None,
        }
    }

    /// Count one report and fold its partial sum into the exact total
    pub(crate) fn accept(&mut self, report: Report) -> Result<Progress, AggregateError> {
        self.received += 1;
        let partial = report?;
        self.total += partial.sum;

        trace!(
            part = partial.part,
            received = self.received,
            expected = self.expected,
            "Collected partial sum"
        );
        Ok(Progress {
            part: partial.part,
            // wraps when the partial alone leaves the i64 range
            result: Money::from_minor(partial.sum as i64),
        })
    }

    /// Remember the first failure; later ones are logged and dropped
    pub(crate) fn fail(&mut self, err: AggregateError) {
        match &self.error {
            None => self.error = Some(err),
            Some(first) => debug!(%err, %first, "Additional aggregation failure"),
        }
    }

    pub(crate) fn expected(&self) -> usize {
        self.expected
    }

    pub(crate) fn received(&self) -> usize {
        self.received
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.received == self.expected
    }

    pub(crate) fn finish(self) -> Result<Money, AggregateError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if !self.is_complete() {
            return Err(AggregateError::MissingPartials {
                expected: self.expected,
                received: self.received,
            });
        }

        let total = i64::try_from(self.total)
            .map(Money::from_minor)
            .map_err(|_| AggregateError::TotalOverflow)?;

        debug!(total = %total, partitions = self.expected, "Aggregation completed");
        Ok(total)
    }
}
