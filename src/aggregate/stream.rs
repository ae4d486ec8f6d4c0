use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::aggregator::{Aggregator, Collector, Partial, Report, panic_message, sum_partition};
use super::error::AggregateError;
use super::partition::{Partition, partition};
use super::progress::Progress;
use crate::domain::Money;

impl Aggregator {
    /// Start summing `amounts` on tokio's blocking pool and return the
    /// progress as a single-pass stream
    ///
    /// Must be called from within a tokio runtime. Items arrive in completion
    /// order; the final total is available from [`ProgressStream::total`]
    /// once the stream has ended without error.
    pub fn progress_stream(&self, amounts: Arc<[Money]>) -> ProgressStream {
        self.stream_with(amounts, |_, slice| Ok(sum_partition(slice)))
    }

    /// Stream `worker` over every partition of `amounts`
    pub(crate) fn stream_with<W>(&self, amounts: Arc<[Money]>, worker: W) -> ProgressStream
    where
        W: Fn(&Partition, &[Money]) -> Result<i128, AggregateError> + Send + Sync + 'static,
    {
        let partitions = partition(amounts.len(), self.workers());
        let expected = partitions.len();
        // tokio channels need at least one slot
        let (tx, rx) = mpsc::channel::<Report>(expected.max(1));
        let worker = Arc::new(worker);

        let workers = partitions
            .into_iter()
            .map(|part| {
                let tx = tx.clone();
                let amounts = Arc::clone(&amounts);
                let worker = Arc::clone(&worker);

                let handle = tokio::task::spawn_blocking(move || {
                    let report = worker(&part, &amounts[part.range()]).map(|sum| Partial {
                        part: part.index,
                        sum,
                    });
                    if tx.blocking_send(report).is_err() {
                        trace!(part = part.index, "Progress stream dropped before report");
                    }
                });
                (part.index, handle)
            })
            .collect();

        debug!(partitions = expected, "Dispatched streaming partition workers");

        ProgressStream {
            receiver: rx,
            collector: Some(Collector::new(expected)),
            workers,
            total: None,
            failure: None,
        }
    }
}

/// Finite, non-restartable stream of [`Progress`] events
///
/// Yields one `Ok(Progress)` per partition. The first failure is yielded as
/// an `Err` item and ends the stream.
pub struct ProgressStream {
    receiver: mpsc::Receiver<Report>,
    collector: Option<Collector>,
    workers: Vec<(usize, JoinHandle<()>)>,
    total: Option<Money>,
    failure: Option<AggregateError>,
}

impl ProgressStream {
    /// Grand total, once the stream has been drained successfully
    pub fn total(&self) -> Option<Money> {
        self.total
    }

    /// Drain the stream, discarding progress, and return the total
    ///
    /// On a stream that already ended with an error, returns that error.
    pub async fn into_total(mut self) -> Result<Money, AggregateError> {
        while let Some(item) = self.next().await {
            item?;
        }

        match (self.total, self.failure) {
            (Some(total), _) => Ok(total),
            (None, Some(err)) => Err(err),
            (None, None) => Err(AggregateError::MissingPartials {
                expected: self.workers.len(),
                received: 0,
            }),
        }
    }

    /// End the stream with `err`, remembering it for [`Self::into_total`]
    fn fail(&mut self, err: AggregateError) -> Poll<Option<Result<Progress, AggregateError>>> {
        self.collector = None;
        self.failure = Some(err.clone());
        Poll::Ready(Some(Err(err)))
    }

    /// Workers are all gone but reports are missing: find out why
    fn poll_failed_workers(&mut self, cx: &mut Context<'_>) -> Poll<AggregateError> {
        let mut panicked = None;

        self.workers.retain_mut(|(part, handle)| match Pin::new(handle).poll(cx) {
            Poll::Pending => true,
            Poll::Ready(Ok(())) => false,
            Poll::Ready(Err(err)) => {
                if panicked.is_none() {
                    let message = if err.is_panic() {
                        panic_message(err.into_panic().as_ref())
                    } else {
                        err.to_string()
                    };
                    panicked = Some(AggregateError::WorkerPanicked {
                        part: *part,
                        message,
                    });
                }
                false
            }
        });

        if let Some(err) = panicked {
            return Poll::Ready(err);
        }

        if !self.workers.is_empty() {
            return Poll::Pending;
        }

        let (expected, received) = self
            .collector
            .as_ref()
            .map(|c| (c.expected(), c.received()))
            .unwrap_or_default();
        Poll::Ready(AggregateError::MissingPartials { expected, received })
    }
}

impl Stream for ProgressStream {
    type Item = Result<Progress, AggregateError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        let Some(collector) = this.collector.as_mut() else {
            return Poll::Ready(None);
        };

        if collector.is_complete() {
            return match this.collector.take().map(Collector::finish) {
                Some(Ok(total)) => {
                    this.total = Some(total);
                    Poll::Ready(None)
                }
                Some(Err(err)) => this.fail(err),
                None => Poll::Ready(None),
            };
        }

        match this.receiver.poll_recv(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(report)) => match collector.accept(report) {
                Ok(progress) => Poll::Ready(Some(Ok(progress))),
                Err(err) => this.fail(err),
            },
            Poll::Ready(None) => match this.poll_failed_workers(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(err) => this.fail(err),
            },
        }
    }
}
