//! Batch distribution for parallel simulation.
//!
//! Splits trials into batches so each Rayon task owns a contiguous slice of the
//! run and its own random stream.

use crate::error::Result;
use crate::parallel::pool::WorkerPool;
use crate::simulator::{simulate_parallel, AggregateResult, BattleParams};

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use risk_odds::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + usize::from(i < remainder);
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Run a parallel simulation inside `pool`.
/// Calls [crate::simulator::simulate_parallel] under [WorkerPool::install].
pub fn run_simulation_batches(
    params: &BattleParams,
    seed: u64,
    pool: &WorkerPool,
) -> Result<AggregateResult> {
    pool.install(|| simulate_parallel(params, seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_ranges_even_split() {
        let r = batch_ranges(100, 4);
        assert_eq!(r, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
    }

    #[test]
    fn batch_ranges_with_remainder() {
        let r = batch_ranges(10, 3);
        assert_eq!(r, vec![(0, 4), (4, 7), (7, 10)]);
    }

    #[test]
    fn batch_ranges_more_batches_than_items() {
        let r = batch_ranges(3, 10);
        assert_eq!(r.len(), 3);
        assert_eq!(r, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn batch_ranges_empty() {
        assert!(batch_ranges(0, 5).is_empty());
        assert!(batch_ranges(10, 0).is_empty());
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let params = BattleParams::new(7, 6, 1_500).expect("valid params");
        let single = run_simulation_batches(&params, 9, &WorkerPool::with_workers(1))
            .expect("single-thread pool");
        let several = run_simulation_batches(&params, 9, &WorkerPool::with_workers(3))
            .expect("three-thread pool");
        assert_eq!(single, several);
    }
}
