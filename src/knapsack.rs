//! 0/1 knapsack kernels shared by both engines.
//!
//! # Dynamic programming
//!
//! `A[i][c]` is the best value using the first `i` items within capacity
//! `c`. Only two value rows are kept alive; the companion "taken" table
//! `B[i][c]` is kept in full so the chosen subset can be recovered by
//! walking back from `(n, capacity)`. A cell is marked taken only when
//! taking the item strictly improves the value.
//!
//! # Branch-and-bound
//!
//! An implicit take/skip decision tree over the items in input order. A
//! node is a leaf when every item is decided or no undecided item fits the
//! remaining capacity. Leaves compete for a single best register; ties on
//! value go to the lexicographically smaller index list, so the chosen
//! subset does not depend on the order in which leaves arrive.
//!
//! # References
//!
//! Kellerer, Pferschy & Pisinger (2004), *Knapsack Problems*, ch. 2

use crate::error::{AdventureError, Result};
use crate::types::{Container, Item};

/// Outcome of a packing search: total weight and chosen item indices
/// in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Packing {
    pub value: u64,
    pub chosen: Vec<usize>,
}

impl Packing {
    /// Whether a candidate leaf should replace this packing.
    pub fn is_beaten_by(&self, value: u64, chosen: &[usize]) -> bool {
        value > self.value || (value == self.value && chosen < self.chosen.as_slice())
    }

    /// Adds the chosen items to `container` and returns the packed value.
    pub fn deliver<C: Container>(self, items: &[Item], container: &mut C) -> u64 {
        for &idx in &self.chosen {
            container.add_item(items[idx]);
        }
        self.value
    }
}

/// Number of capacity columns (`capacity + 1`) as an index bound.
pub(crate) fn capacity_columns(capacity: u64) -> Result<usize> {
    usize::try_from(capacity)
        .ok()
        .and_then(|c| c.checked_add(1))
        .ok_or_else(|| AdventureError::InvalidInput {
            operation: "pack",
            reason: format!("capacity {capacity} does not fit in memory-addressable columns"),
        })
}

/// Rejects item lists longer than the configured branch-and-bound limit.
pub(crate) fn check_item_limit(items: &[Item], limit: Option<usize>) -> Result<()> {
    let Some(limit) = limit else {
        return Ok(());
    };
    if items.len() > limit {
        return Err(AdventureError::InvalidInput {
            operation: "pack",
            reason: format!(
                "branch-and-bound accepts at most {limit} items, got {}",
                items.len()
            ),
        });
    }
    Ok(())
}

// ============================================================================
// Dynamic programming
// ============================================================================

/// Fills the cells of one table row.
///
/// `cur` and `taken` cover columns `start..start + cur.len()` of the row for
/// `item`; `prev` is the complete previous row.
pub(crate) fn fill_cells(prev: &[u64], cur: &mut [u64], taken: &mut [bool], item: Item, start: usize) {
    for (offset, (cell, took)) in cur.iter_mut().zip(taken.iter_mut()).enumerate() {
        let c = start + offset;
        let skip = prev[c];
        if item.size > c as u64 {
            *cell = skip;
            continue;
        }
        let with = prev[c - item.size as usize] + item.weight;
        if with > skip {
            *cell = with;
            *took = true;
        } else {
            *cell = skip;
        }
    }
}

/// Walks the taken table back from `(n, capacity)`.
pub(crate) fn backtrack(items: &[Item], taken: &[Vec<bool>], value: u64, capacity: usize) -> Packing {
    let mut c = capacity;
    let mut chosen = Vec::new();
    for (idx, row) in taken.iter().enumerate().rev() {
        if row[c] {
            chosen.push(idx);
            c -= items[idx].size as usize;
        }
    }
    chosen.reverse();
    Packing { value, chosen }
}

/// Single-threaded dynamic-programming packing.
pub(crate) fn dp_sequential(items: &[Item], columns: usize) -> Packing {
    let mut prev = vec![0u64; columns];
    let mut cur = vec![0u64; columns];
    let mut taken = vec![vec![false; columns]; items.len()];

    for (row, &item) in taken.iter_mut().zip(items) {
        fill_cells(&prev, &mut cur, row, item, 0);
        std::mem::swap(&mut prev, &mut cur);
    }

    backtrack(items, &taken, prev[columns - 1], columns - 1)
}

// ============================================================================
// Branch-and-bound
// ============================================================================

/// One node of the decision tree.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Index of the next undecided item (also the node depth).
    pub next: usize,
    pub remaining: u64,
    pub value: u64,
    pub chosen: Vec<usize>,
}

impl Node {
    pub fn root(capacity: u64) -> Self {
        Self {
            next: 0,
            remaining: capacity,
            value: 0,
            chosen: Vec::new(),
        }
    }
}

/// Read-only view of the item list shared by every node.
#[derive(Debug)]
pub(crate) struct DecisionTree<'a> {
    items: &'a [Item],
    /// `suffix_min[i]` is the smallest size among `items[i..]`.
    suffix_min: Vec<u64>,
}

impl<'a> DecisionTree<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        let mut suffix_min = vec![u64::MAX; items.len() + 1];
        for i in (0..items.len()).rev() {
            suffix_min[i] = suffix_min[i + 1].min(items[i].size);
        }
        Self { items, suffix_min }
    }

    pub fn is_leaf(&self, node: &Node) -> bool {
        node.next == self.items.len() || self.suffix_min[node.next] > node.remaining
    }

    /// Splits an internal node into its (take, skip) children.
    ///
    /// The take child is absent when the next item does not fit.
    pub fn branch(&self, node: Node) -> (Option<Node>, Node) {
        let item = self.items[node.next];
        let skip = Node {
            next: node.next + 1,
            chosen: node.chosen.clone(),
            ..node
        };
        let take = (item.size <= node.remaining).then(|| {
            let mut chosen = node.chosen;
            chosen.push(node.next);
            Node {
                next: node.next + 1,
                remaining: node.remaining - item.size,
                value: node.value + item.weight,
                chosen,
            }
        });
        (take, skip)
    }
}

/// Depth-first exhaustive search on the current thread.
pub(crate) fn explore_sequential(tree: &DecisionTree<'_>, node: Node, best: &mut Packing) {
    if tree.is_leaf(&node) {
        if best.is_beaten_by(node.value, &node.chosen) {
            *best = Packing {
                value: node.value,
                chosen: node.chosen,
            };
        }
        return;
    }
    let (take, skip) = tree.branch(node);
    if let Some(take) = take {
        explore_sequential(tree, take, best);
    }
    explore_sequential(tree, skip, best);
}

/// Single-threaded branch-and-bound packing.
pub(crate) fn bnb_sequential(items: &[Item], capacity: u64) -> Packing {
    let tree = DecisionTree::new(items);
    let mut best = Packing::default();
    explore_sequential(&tree, Node::root(capacity), &mut best);
    best
}
