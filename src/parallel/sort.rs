//! Parallel merge sort.
//!
//! The range is cut at a worker-proportional point, the right part stays on
//! the calling worker while the left part is offered to the pool, and once
//! both are sorted they are merged in place. Ranges no longer than
//! `len / workers + 1` are sorted directly with [`slice::sort`].

use super::pool::{fork_join, WorkerPool};
use super::split::{bisect, leaf_len};
use crate::types::Orderable;

/// Sorts `data` in place into non-decreasing order.
pub(crate) fn sort_parallel<T: Orderable>(pool: &WorkerPool, data: &mut [T]) {
    let workers = pool.workers();
    let cutoff = leaf_len(data.len(), workers);
    pool.run(|| sort_range(data, workers, cutoff));
}

fn sort_range<T: Orderable>(data: &mut [T], allotment: usize, cutoff: usize) {
    if data.len() <= cutoff {
        data.sort();
        return;
    }
    let split = bisect(data.len(), allotment);
    {
        let (left, right) = data.split_at_mut(split.mid);
        fork_join(
            || sort_range(right, split.right, cutoff),
            || sort_range(left, split.left, cutoff),
        );
    }
    merge_halves(data, split.mid);
}

/// Stable in-place merge of the sorted runs `data[..mid]` and `data[mid..]`.
///
/// The left run is buffered; right-run elements are moved down by swapping,
/// which leaves only already-consumed slots behind the read position.
pub(crate) fn merge_halves<T: Ord + Clone>(data: &mut [T], mid: usize) {
    if mid == 0 || mid >= data.len() || data[mid - 1] <= data[mid] {
        return;
    }
    let left = data[..mid].to_vec();
    let mut read = mid;
    let mut write = 0;
    for value in left {
        while read < data.len() && data[read] < value {
            data.swap(write, read);
            read += 1;
            write += 1;
        }
        data[write] = value;
        write += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- merge ----

    #[test]
    fn test_merge_interleaved() {
        let mut data = vec![1, 4, 7, 2, 3, 8, 9];
        merge_halves(&mut data, 3);
        assert_eq!(data, vec![1, 2, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn test_merge_right_before_left() {
        let mut data = vec![5, 6, 1, 2, 3];
        merge_halves(&mut data, 2);
        assert_eq!(data, vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn test_merge_is_stable() {
        // Ordered by key only; the tag records the original run.
        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Tagged(u8, char);
        impl PartialOrd for Tagged {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Tagged {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }

        let mut data = vec![
            Tagged(1, 'l'),
            Tagged(3, 'l'),
            Tagged(1, 'r'),
            Tagged(2, 'r'),
            Tagged(3, 'r'),
        ];
        merge_halves(&mut data, 2);
        let tags: Vec<(u8, char)> = data.iter().map(|t| (t.0, t.1)).collect();
        assert_eq!(tags, vec![(1, 'l'), (1, 'r'), (2, 'r'), (3, 'l'), (3, 'r')]);
    }

    #[test]
    fn test_merge_degenerate_mid() {
        let mut data = vec![2, 1];
        merge_halves(&mut data, 0);
        merge_halves(&mut data, 2);
        assert_eq!(data, vec![2, 1]);
    }

    // ---- sort ----

    #[test]
    fn test_sort_sample() {
        let pool = WorkerPool::new(2).unwrap();
        let mut data = vec![5, 3, 1, 4, 2];
        sort_parallel(&pool, &mut data);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_many_workers_small_input() {
        let pool = WorkerPool::new(8).unwrap();
        let mut data = vec![3, 3, 1];
        sort_parallel(&pool, &mut data);
        assert_eq!(data, vec![1, 3, 3]);
    }

    #[test]
    fn test_sort_empty_and_single() {
        let pool = WorkerPool::new(4).unwrap();
        let mut empty: Vec<i32> = Vec::new();
        sort_parallel(&pool, &mut empty);
        assert!(empty.is_empty());

        let mut one = vec![42];
        sort_parallel(&pool, &mut one);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_sort_matches_std() {
        for workers in [1, 3, 8] {
            let pool = WorkerPool::new(workers).unwrap();
            let mut data: Vec<i64> = (0..2_000).map(|i| (i * 7919) % 1013 - 500).collect();
            let mut expected = data.clone();
            expected.sort();
            sort_parallel(&pool, &mut data);
            assert_eq!(data, expected, "workers={workers}");
        }
    }

    #[test]
    fn test_sort_strings() {
        let pool = WorkerPool::new(3).unwrap();
        let mut data: Vec<String> = ["pear", "apple", "fig", "banana", "apple"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_parallel(&pool, &mut data);
        assert_eq!(data, vec!["apple", "apple", "banana", "fig", "pear"]);
    }
}
