//! Map-reduce maximum selection.
//!
//! The input is cut into one contiguous shard per worker. Each shard is
//! scanned by its own task, which writes the local maximum into a slot that
//! no other task touches; the caller then folds the slots sequentially,
//! starting from [`Comparable::minimum`].

use super::pool::WorkerPool;
use super::split::shard_ranges;
use crate::types::Comparable;

/// Returns a maximal element of `data`, or `None` when it is empty.
///
/// When several elements compare equal to the maximum, which of them is
/// returned is unspecified.
pub(crate) fn max_parallel<T: Comparable>(pool: &WorkerPool, data: &[T]) -> Option<T> {
    if data.is_empty() {
        return None;
    }
    let ranges = shard_ranges(data.len(), pool.workers());
    let mut partials: Vec<Option<T>> = vec![None; ranges.len()];

    let shards: Vec<(&[T], &mut Option<T>)> = ranges
        .into_iter()
        .map(|range| &data[range])
        .zip(partials.iter_mut())
        .collect();

    pool.scope(|s| {
        for (shard, slot) in shards {
            s.spawn(move |_| *slot = shard.iter().max().cloned());
        }
    });

    Some(partials.into_iter().flatten().fold(T::minimum(), Ord::max))
}
