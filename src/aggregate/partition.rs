use std::num::NonZeroUsize;
use std::ops::Range;
use std::thread;

/// Contiguous slice of the input assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    /// Inclusive offset
    pub start: usize,
    /// Exclusive offset
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Number of logical CPUs, or 1 when it cannot be determined
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Split `0..len` into `min(workers, len)` balanced contiguous partitions
///
/// The first `len % n` partitions get one extra element, so sizes differ by at
/// most one. `workers` is clamped to at least 1. Empty input yields no
/// partitions at all.
pub fn partition(len: usize, workers: usize) -> Vec<Partition> {
    let count = workers.max(1).min(len);
    if count == 0 {
        return Vec::new();
    }

    let base = len / count;
    let remainder = len % count;

    let mut start = 0;
    (0..count)
        .map(|index| {
            let size = base + usize::from(index < remainder);
            let part = Partition {
                index,
                start,
                end: start + size,
            };
            start += size;
            part
        })
        .collect()
}
