//! Parallel knapsack strategies.
//!
//! - [`dp_parallel`]: rows are filled strictly in item order; within a row
//!   the capacity columns are bisected into shards that touch disjoint
//!   cells, so no locking is needed.
//! - [`bnb_parallel`]: every internal node of the decision tree above the
//!   spawn depth submits its children to the pool; leaves report to a
//!   lock-guarded [`BestRegister`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use super::pool::{fork_join, WorkerPool};
use super::split::{bisect, leaf_len};
use crate::knapsack::{backtrack, explore_sequential, fill_cells, DecisionTree, Node, Packing};
use crate::types::Item;

// ============================================================================
// Dynamic programming
// ============================================================================

/// Dynamic-programming packing with capacity-sharded rows.
pub(crate) fn dp_parallel(pool: &WorkerPool, items: &[Item], columns: usize) -> Packing {
    let workers = pool.workers();
    let shard_len = leaf_len(columns, workers);
    let mut prev = vec![0u64; columns];
    let mut cur = vec![0u64; columns];
    let mut taken = vec![vec![false; columns]; items.len()];

    pool.run(|| {
        for (row, &item) in taken.iter_mut().zip(items) {
            // Returns only after every shard of this row has joined.
            fill_shard(&prev, &mut cur, row, item, 0, workers, shard_len);
            std::mem::swap(&mut prev, &mut cur);
        }
    });

    backtrack(items, &taken, prev[columns - 1], columns - 1)
}

fn fill_shard(
    prev: &[u64],
    cur: &mut [u64],
    taken: &mut [bool],
    item: Item,
    start: usize,
    allotment: usize,
    shard_len: usize,
) {
    if cur.len() <= shard_len {
        fill_cells(prev, cur, taken, item, start);
        return;
    }
    let split = bisect(cur.len(), allotment);
    tracing::trace!(
        "DP row shard {}..{} split at {} ({}+{} workers)",
        start,
        start + cur.len(),
        start + split.mid,
        split.left,
        split.right
    );
    let (cur_left, cur_right) = cur.split_at_mut(split.mid);
    let (taken_left, taken_right) = taken.split_at_mut(split.mid);
    fork_join(
        || fill_shard(prev, cur_right, taken_right, item, start + split.mid, split.right, shard_len),
        || fill_shard(prev, cur_left, taken_left, item, start, split.left, shard_len),
    );
}

// ============================================================================
// Branch-and-bound
// ============================================================================

/// Best leaf seen so far, shared by every task of one search.
///
/// The value is mirrored in an atomic so strictly worse leaves return
/// without touching the lock. Comparison and update happen together under
/// the mutex.
#[derive(Debug, Default)]
pub(crate) struct BestRegister {
    value: AtomicU64,
    best: Mutex<Packing>,
}

impl BestRegister {
    pub fn offer(&self, value: u64, chosen: Vec<usize>) {
        if value < self.value.load(Ordering::Acquire) {
            return;
        }
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        if best.is_beaten_by(value, &chosen) {
            *best = Packing { value, chosen };
            self.value.store(value, Ordering::Release);
        }
    }

    pub fn into_packing(self) -> Packing {
        self.best.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Search<'a> {
    tree: DecisionTree<'a>,
    register: BestRegister,
    spawn_depth: usize,
}

/// Branch-and-bound packing over the pool.
///
/// The pool scope is the completion barrier: it returns once the last
/// spawned node has exited, however many were created.
pub(crate) fn bnb_parallel(
    pool: &WorkerPool,
    items: &[Item],
    capacity: u64,
    spawn_depth: usize,
) -> Packing {
    let search = Search {
        tree: DecisionTree::new(items),
        register: BestRegister::default(),
        spawn_depth,
    };
    let root = Node::root(capacity);
    pool.scope(|s| explore(s, &search, root));
    search.register.into_packing()
}

fn explore<'s>(scope: &rayon::Scope<'s>, search: &'s Search<'_>, node: Node) {
    if search.tree.is_leaf(&node) {
        search.register.offer(node.value, node.chosen);
        return;
    }
    if node.next >= search.spawn_depth {
        let mut local = Packing::default();
        explore_sequential(&search.tree, node, &mut local);
        search.register.offer(local.value, local.chosen);
        return;
    }
    let (take, skip) = search.tree.branch(node);
    if let Some(take) = take {
        scope.spawn(move |s| explore(s, search, take));
    }
    scope.spawn(move |s| explore(s, search, skip));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knapsack::{bnb_sequential, dp_sequential};

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new(2, 3),
            Item::new(3, 4),
            Item::new(4, 5),
            Item::new(5, 6),
        ]
    }

    fn mixed_items() -> Vec<Item> {
        (0..14u64)
            .map(|i| Item::new(1 + (i * 7) % 11, 2 + (i * 5) % 13))
            .collect()
    }

    // ---- dynamic programming ----

    #[test]
    fn test_dp_parallel_sample() {
        let pool = WorkerPool::new(4).unwrap();
        let packing = dp_parallel(&pool, &sample_items(), 6);
        assert_eq!(packing.value, 7);
        assert_eq!(packing.chosen, vec![0, 1]);
    }

    #[test]
    fn test_dp_parallel_matches_sequential_table() {
        let items = mixed_items();
        for workers in [1, 2, 3, 8] {
            let pool = WorkerPool::new(workers).unwrap();
            for columns in [1, 2, 17, 40, 101] {
                assert_eq!(
                    dp_parallel(&pool, &items, columns),
                    dp_sequential(&items, columns),
                    "workers={workers} columns={columns}"
                );
            }
        }
    }

    // ---- branch-and-bound ----

    #[test]
    fn test_bnb_parallel_sample() {
        let pool = WorkerPool::new(4).unwrap();
        let packing = bnb_parallel(&pool, &sample_items(), 5, 8);
        assert_eq!(packing.value, 7);
        assert_eq!(packing.chosen, vec![0, 1]);
    }

    #[test]
    fn test_bnb_parallel_matches_sequential() {
        let items = mixed_items();
        for workers in [1, 2, 8] {
            let pool = WorkerPool::new(workers).unwrap();
            for spawn_depth in [1, 4, 20] {
                for capacity in [0, 9, 30] {
                    assert_eq!(
                        bnb_parallel(&pool, &items, capacity, spawn_depth),
                        bnb_sequential(&items, capacity),
                        "workers={workers} depth={spawn_depth} capacity={capacity}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bnb_parallel_empty() {
        let pool = WorkerPool::new(2).unwrap();
        assert_eq!(bnb_parallel(&pool, &[], 10, 4), Packing::default());
    }

    // ---- register ----

    #[test]
    fn test_register_keeps_best() {
        let register = BestRegister::default();
        register.offer(5, vec![2]);
        register.offer(3, vec![0]);
        register.offer(5, vec![1]);
        register.offer(5, vec![1, 3]);
        assert_eq!(
            register.into_packing(),
            Packing {
                value: 5,
                chosen: vec![1]
            }
        );
    }

    #[test]
    fn test_register_concurrent_offers() {
        let pool = WorkerPool::new(8).unwrap();
        let register = BestRegister::default();
        let register_ref = &register;
        pool.scope(|s| {
            for v in 0..200u64 {
                s.spawn(move |_| register_ref.offer(v % 50, vec![(v % 7) as usize]));
            }
        });
        let best = register.into_packing();
        assert_eq!(best.value, 49);
        assert_eq!(best.chosen, vec![0]);
    }
}
