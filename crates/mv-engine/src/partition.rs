//! Row-block partitioning.
//!
//! `n` rows are split into `p` contiguous blocks, one per worker, in
//! increasing worker order. Worker `r` owns rows
//! `floor(r*n/p) ..= floor((r+1)*n/p) - 1`; block sizes differ by at most
//! one and a block is empty whenever `p > n` leaves a worker without rows.
//! The first-touch and compute phases both go through this module, so a
//! worker touches exactly the rows it later computes.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use crate::error::{EngineError, Result};

/// Strongly typed index of a worker, `0 <= index < count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerIndex(usize);

impl WorkerIndex {
    pub fn new(index: usize) -> Self {
        WorkerIndex(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for WorkerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of workers in a phase. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerCount(NonZeroUsize);

impl WorkerCount {
    /// # Errors
    /// Returns `InvalidThreadCount` for zero.
    pub fn new(count: usize) -> Result<Self> {
        NonZeroUsize::new(count)
            .map(WorkerCount)
            .ok_or(EngineError::InvalidThreadCount(count))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Iterate over every worker index in increasing order.
    pub fn indices(self) -> impl Iterator<Item = WorkerIndex> {
        (0..self.get()).map(WorkerIndex)
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First row owned by `rank`: `floor(rank * n / p)`.
///
/// The product is formed in 128 bits so it cannot overflow.
pub fn block_low(rank: usize, p: usize, n: usize) -> usize {
    (rank as u128 * n as u128 / p as u128) as usize
}

/// Last row (inclusive) owned by `rank`, or `None` if its block is empty.
pub fn block_high(rank: usize, p: usize, n: usize) -> Option<usize> {
    let low = block_low(rank, p, n);
    block_low(rank + 1, p, n)
        .checked_sub(1)
        .filter(|&high| high >= low)
}

/// Number of rows owned by `rank`.
pub fn block_size(rank: usize, p: usize, n: usize) -> usize {
    block_low(rank + 1, p, n) - block_low(rank, p, n)
}

/// Worker that owns `row`: `floor((p * (row + 1) - 1) / n)`.
///
/// # Panics
/// Panics if `n == 0` (there is no row to own).
pub fn block_owner(row: usize, p: usize, n: usize) -> usize {
    ((p as u128 * (row as u128 + 1) - 1) / n as u128) as usize
}

/// The contiguous block of rows assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPartition {
    worker: WorkerIndex,
    low: usize,
    end: usize,
}

impl BlockPartition {
    /// Compute the block of `worker` out of `count` workers over `n` rows.
    pub fn for_worker(worker: WorkerIndex, count: WorkerCount, n: usize) -> Self {
        let (r, p) = (worker.get(), count.get());
        BlockPartition {
            worker,
            low: block_low(r, p, n),
            end: block_low(r + 1, p, n),
        }
    }

    pub fn worker(&self) -> WorkerIndex {
        self.worker
    }

    /// First row of the block. Equal to the next block's first row when empty.
    pub fn first_row(&self) -> usize {
        self.low
    }

    /// Last row (inclusive), `None` for an empty block.
    pub fn last_row(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.low
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.low
    }

    /// Rows of the block as a half-open range.
    pub fn rows(&self) -> Range<usize> {
        self.low..self.end
    }
}

/// Blocks for every worker, ordered by worker index.
pub fn partitions(count: WorkerCount, n: usize) -> Vec<BlockPartition> {
    count
        .indices()
        .map(|w| BlockPartition::for_worker(w, count, n))
        .collect()
}

/// Split a row-major buffer into one mutable slice per block.
///
/// `parts` must come from [`partitions`] over the buffer's rows, and
/// `row_len` is the number of elements in one row. The slices are disjoint,
/// so each worker can only ever write its own rows.
///
/// # Panics
/// Panics if the blocks cover more rows than `buf` holds.
pub fn split_rows_mut<'a>(
    buf: &'a mut [f64],
    parts: &[BlockPartition],
    row_len: usize,
) -> Vec<&'a mut [f64]> {
    let mut rest = buf;
    let mut out = Vec::with_capacity(parts.len());
    for part in parts {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(part.len() * row_len);
        out.push(head);
        rest = tail;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn count(p: usize) -> WorkerCount {
        WorkerCount::new(p).unwrap()
    }

    #[test]
    fn test_even_split() {
        let parts = partitions(count(4), 8);
        let ranges: Vec<_> = parts.iter().map(|b| b.rows()).collect();
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_uneven_split() {
        // 10 rows over 4 workers: floor(r*10/4) = 0, 2, 5, 7, 10
        let parts = partitions(count(4), 10);
        let sizes: Vec<_> = parts.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![2, 3, 2, 3]);
        assert_eq!(parts[1].first_row(), 2);
        assert_eq!(parts[1].last_row(), Some(4));
    }

    #[test]
    fn test_inclusive_bounds() {
        assert_eq!(block_low(1, 3, 7), 2);
        assert_eq!(block_high(1, 3, 7), Some(3));
        assert_eq!(block_size(1, 3, 7), 2);
        assert_eq!(block_high(2, 3, 7), Some(6));
    }

    #[test]
    fn test_more_workers_than_rows() {
        let parts = partitions(count(4), 2);
        let empty = parts.iter().filter(|b| b.is_empty()).count();
        assert_eq!(empty, 2);
        assert_eq!(parts[0].last_row(), None);
        assert_eq!(block_high(0, 4, 2), None);
        assert_eq!(parts.iter().map(|b| b.len()).sum::<usize>(), 2);
    }

    #[test]
    fn test_single_worker() {
        let b = BlockPartition::for_worker(WorkerIndex::new(0), count(1), 5);
        assert_eq!(b.rows(), 0..5);
        assert_eq!(b.worker().get(), 0);
    }

    #[test]
    fn test_no_overflow() {
        let n = usize::MAX / 2;
        assert_eq!(block_low(3, 4, n), (3 * (n as u128) / 4) as usize);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            WorkerCount::new(0),
            Err(EngineError::InvalidThreadCount(0))
        ));
    }

    #[test]
    fn test_split_rows_mut() {
        let mut buf: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let parts = partitions(count(3), 4);
        let chunks = split_rows_mut(&mut buf, &parts, 3);
        let lens: Vec<_> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![3, 3, 6]);
        assert_eq!(chunks[2][0], 6.0);
    }

    proptest! {
        #[test]
        fn partitions_cover_rows_exactly(n in 1usize..2000, p in 1usize..64) {
            let parts = partitions(count(p), n);
            let mut next = 0;
            for (r, b) in parts.iter().enumerate() {
                prop_assert_eq!(b.worker().get(), r);
                prop_assert_eq!(b.first_row(), next);
                next = b.rows().end;
            }
            prop_assert_eq!(next, n);
            prop_assert_eq!(parts.iter().map(|b| b.len()).sum::<usize>(), n);
        }

        #[test]
        fn partitions_are_balanced(n in 1usize..2000, p in 1usize..64) {
            let sizes: Vec<usize> = (0..p).map(|r| block_size(r, p, n)).collect();
            let max = *sizes.iter().max().unwrap();
            let min = *sizes.iter().min().unwrap();
            prop_assert!(max - min <= 1);
        }

        #[test]
        fn owner_matches_partition(n in 1usize..500, p in 1usize..40) {
            for row in 0..n {
                let owner = block_owner(row, p, n);
                prop_assert!(owner < p);
                prop_assert!(BlockPartition::for_worker(WorkerIndex::new(owner), count(p), n)
                    .rows()
                    .contains(&row));
            }
        }
    }
}
