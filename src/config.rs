//! Engine configuration.
//!
//! [`EngineConfig`] fixes the worker count and packing strategy for the
//! lifetime of an engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{AdventureError, Result};

/// How [`pack`](crate::Adventure::pack) searches for the optimal subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PackingStrategy {
    /// Exact table over (items × capacity) with a backtracking table.
    ///
    /// Runs in O(n · capacity) time and space.
    #[default]
    DynamicProgramming,

    /// Exhaustive take/skip search over the item list.
    ///
    /// Only capacity-infeasible branches are cut, so the cost grows
    /// exponentially with the item count. Suited to large capacities with
    /// few items.
    BranchAndBound,
}

/// Configuration for an adventure engine.
///
/// # Defaults
///
/// ```
/// use u_forkjoin::{EngineConfig, PackingStrategy};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.workers, 1);
/// assert_eq!(config.packing, PackingStrategy::DynamicProgramming);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_forkjoin::{EngineConfig, PackingStrategy};
///
/// let config = EngineConfig::parallel(8)
///     .with_packing(PackingStrategy::BranchAndBound)
///     .with_bnb_item_limit(24);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Number of pool workers. Drives the fan-out of every operation.
    pub workers: usize,

    /// Whether to use the worker-pool engine.
    ///
    /// A parallel engine with one worker still pays fork-join overhead.
    pub parallel: bool,

    /// Packing strategy.
    pub packing: PackingStrategy,

    /// Largest item count accepted by branch-and-bound packing.
    ///
    /// `None` accepts any item count. Longer inputs are rejected with
    /// [`AdventureError::InvalidInput`] instead of being searched.
    pub bnb_item_limit: Option<usize>,

    /// Decision depth below which branch-and-bound nodes are submitted to
    /// the pool. Deeper nodes are explored depth-first on the current
    /// worker.
    ///
    /// `None` derives the depth from the worker count.
    pub bnb_spawn_depth: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            parallel: false,
            packing: PackingStrategy::default(),
            bnb_item_limit: None,
            bnb_spawn_depth: None,
        }
    }
}

impl EngineConfig {
    /// Preset for the single-threaded reference engine.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Preset for the worker-pool engine with `workers` workers.
    pub fn parallel(workers: usize) -> Self {
        Self {
            workers,
            parallel: true,
            ..Self::default()
        }
    }

    /// Sets the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Selects the worker-pool engine (`true`) or the sequential one.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the packing strategy.
    pub fn with_packing(mut self, packing: PackingStrategy) -> Self {
        self.packing = packing;
        self
    }

    /// Caps the item count accepted by branch-and-bound packing.
    pub fn with_bnb_item_limit(mut self, limit: usize) -> Self {
        self.bnb_item_limit = Some(limit);
        self
    }

    /// Sets the branch-and-bound spawn depth.
    pub fn with_bnb_spawn_depth(mut self, depth: usize) -> Self {
        self.bnb_spawn_depth = Some(depth);
        self
    }

    /// Spawn depth actually used for branch-and-bound.
    ///
    /// Defaults to `2 * ceil(log2(workers)) + 4`, enough tasks to keep
    /// every worker busy without flooding the queue with tiny subtrees.
    pub fn effective_spawn_depth(&self) -> usize {
        self.bnb_spawn_depth.unwrap_or_else(|| {
            let log = usize::BITS - self.workers.max(1).saturating_sub(1).leading_zeros();
            2 * log as usize + 4
        })
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(AdventureError::InvalidConfig {
                parameter: "workers",
                reason: "must be at least 1".into(),
            });
        }
        if self.bnb_spawn_depth == Some(0) {
            return Err(AdventureError::InvalidConfig {
                parameter: "bnb_spawn_depth",
                reason: "must be positive or None".into(),
            });
        }
        Ok(())
    }
}
