//! Worker-pool engine.
//!
//! [`ParallelEngine`] owns a fixed-size [`WorkerPool`] and decomposes each
//! operation into a fork-join task tree bounded by the worker count:
//!
//! - **Packing (DP)**: rows in strict item order, capacity shards within a
//!   row bisected in proportion to the remaining worker allotment
//! - **Packing (branch-and-bound)**: one task per decision node above the
//!   spawn depth, a lock-guarded best register, the pool scope as the
//!   completion barrier
//! - **Sorting**: recursive merge sort with worker-proportional cut points
//! - **Maximum**: one shard per worker, partial maxima reduced by the caller
//!
//! Results are identical to [`SequentialEngine`](crate::SequentialEngine)
//! at the value level for every worker count.
//!
//! # References
//!
//! - Blumofe & Leiserson (1999), *Scheduling Multithreaded Computations by
//!   Work Stealing*
//! - Cormen et al. (2009), *Introduction to Algorithms*, ch. 27

mod knapsack;
mod pool;
mod reduce;
mod sort;
mod split;

pub use pool::WorkerPool;

use crate::adventure::Adventure;
use crate::config::{EngineConfig, PackingStrategy};
use crate::error::{AdventureError, Result};
use crate::knapsack::{capacity_columns, check_item_limit};
use crate::types::{Comparable, Container, Item, Orderable};

/// Runs all three operations over a fixed-size worker pool.
///
/// A single-worker engine still pays the fork-join overhead; use
/// [`SequentialEngine`](crate::SequentialEngine) when that matters.
///
/// # Examples
///
/// ```
/// use u_forkjoin::{Adventure, ParallelEngine};
///
/// let engine = ParallelEngine::new(4).unwrap();
/// let mut grains: Vec<u32> = (0..1_000).rev().collect();
/// engine.arrange(&mut grains).unwrap();
/// assert!(grains.windows(2).all(|w| w[0] <= w[1]));
/// ```
#[derive(Debug)]
pub struct ParallelEngine {
    pool: WorkerPool,
    packing: PackingStrategy,
    bnb_item_limit: Option<usize>,
    spawn_depth: usize,
}

impl ParallelEngine {
    /// Creates an engine with `workers` workers and default settings.
    pub fn new(workers: usize) -> Result<Self> {
        Self::with_config(&EngineConfig::parallel(workers))
    }

    /// Creates an engine from `config`.
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pool: WorkerPool::new(config.workers)?,
            packing: config.packing,
            bnb_item_limit: config.bnb_item_limit,
            spawn_depth: config.effective_spawn_depth(),
        })
    }

    /// Number of pool workers.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Packing strategy in use.
    pub fn packing(&self) -> PackingStrategy {
        self.packing
    }
}

impl Adventure for ParallelEngine {
    fn name(&self) -> &str {
        "parallel"
    }

    fn pack<C: Container>(&self, items: &[Item], container: &mut C) -> Result<u64> {
        let capacity = container.capacity();
        tracing::debug!(
            "Packing {} items into capacity {} ({:?}, {} workers)",
            items.len(),
            capacity,
            self.packing,
            self.workers()
        );
        if items.is_empty() {
            return Ok(0);
        }

        let packing = match self.packing {
            PackingStrategy::DynamicProgramming => {
                knapsack::dp_parallel(&self.pool, items, capacity_columns(capacity)?)
            }
            PackingStrategy::BranchAndBound => {
                check_item_limit(items, self.bnb_item_limit)?;
                knapsack::bnb_parallel(&self.pool, items, capacity, self.spawn_depth)
            }
        };

        tracing::debug!(
            "Packed value {} with {} items",
            packing.value,
            packing.chosen.len()
        );
        Ok(packing.deliver(items, container))
    }

    fn arrange<T: Orderable>(&self, tokens: &mut [T]) -> Result<()> {
        tracing::debug!(
            "Arranging {} tokens ({} workers)",
            tokens.len(),
            self.workers()
        );
        sort::sort_parallel(&self.pool, tokens);
        Ok(())
    }

    fn select_best<T: Comparable>(&self, tokens: &[T]) -> Result<T> {
        tracing::debug!(
            "Selecting best of {} tokens ({} workers)",
            tokens.len(),
            self.workers()
        );
        reduce::max_parallel(&self.pool, tokens)
            .ok_or_else(|| AdventureError::empty_input("select_best"))
    }
}
