//! Single-threaded reference engine.
//!
//! [`SequentialEngine`] runs every operation on the calling thread. It is
//! the correctness oracle for [`ParallelEngine`](crate::ParallelEngine) and
//! the cheapest choice for small inputs or a single worker.

use crate::adventure::Adventure;
use crate::config::{EngineConfig, PackingStrategy};
use crate::error::{AdventureError, Result};
use crate::knapsack::{bnb_sequential, capacity_columns, check_item_limit, dp_sequential};
use crate::types::{Comparable, Container, Item, Orderable};

/// Runs all three operations on the calling thread.
#[derive(Debug, Clone)]
pub struct SequentialEngine {
    packing: PackingStrategy,
    bnb_item_limit: Option<usize>,
}

impl Default for SequentialEngine {
    fn default() -> Self {
        Self::with_config(&EngineConfig::sequential())
    }
}

impl SequentialEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine using the packing settings of `config`.
    ///
    /// The worker count is ignored.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            packing: config.packing,
            bnb_item_limit: config.bnb_item_limit,
        }
    }

    /// Packing strategy in use.
    pub fn packing(&self) -> PackingStrategy {
        self.packing
    }
}

impl Adventure for SequentialEngine {
    fn name(&self) -> &str {
        "sequential"
    }

    fn pack<C: Container>(&self, items: &[Item], container: &mut C) -> Result<u64> {
        let capacity = container.capacity();
        tracing::debug!(
            "Packing {} items into capacity {} ({:?}, sequential)",
            items.len(),
            capacity,
            self.packing
        );
        if items.is_empty() {
            return Ok(0);
        }

        let packing = match self.packing {
            PackingStrategy::DynamicProgramming => {
                dp_sequential(items, capacity_columns(capacity)?)
            }
            PackingStrategy::BranchAndBound => {
                check_item_limit(items, self.bnb_item_limit)?;
                bnb_sequential(items, capacity)
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
        tracing::debug!("Arranging {} tokens (sequential)", tokens.len());
        tokens.sort();
        Ok(())
    }

    fn select_best<T: Comparable>(&self, tokens: &[T]) -> Result<T> {
        tracing::debug!("Selecting best of {} tokens (sequential)", tokens.len());
        let mut iter = tokens.iter();
        let mut best = iter
            .next()
            .ok_or_else(|| AdventureError::empty_input("select_best"))?;
        for token in iter {
            if best < token {
                best = token;
            }
        }
        Ok(best.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Knapsack;

    fn sample_items() -> Vec<Item> {
        vec![
            Item::new(2, 3),
            Item::new(3, 4),
            Item::new(4, 5),
            Item::new(5, 6),
        ]
    }

    // ---- pack ----

    #[test]
    fn test_pack_sample_dp() {
        let engine = SequentialEngine::new();
        let mut bag = Knapsack::new(5);
        assert_eq!(engine.pack(&sample_items(), &mut bag).unwrap(), 7);
        assert_eq!(bag.items(), &[Item::new(2, 3), Item::new(3, 4)]);
    }

    #[test]
    fn test_pack_sample_bnb() {
        let config = EngineConfig::sequential().with_packing(PackingStrategy::BranchAndBound);
        let engine = SequentialEngine::with_config(&config);
        assert_eq!(engine.packing(), PackingStrategy::BranchAndBound);
        let mut bag = Knapsack::new(5);
        assert_eq!(engine.pack(&sample_items(), &mut bag).unwrap(), 7);
        assert_eq!(bag.items(), &[Item::new(2, 3), Item::new(3, 4)]);
    }

    #[test]
    fn test_pack_empty_items() {
        let engine = SequentialEngine::new();
        let mut bag = Knapsack::new(10);
        assert_eq!(engine.pack(&[], &mut bag).unwrap(), 0);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_pack_zero_capacity() {
        let engine = SequentialEngine::new();
        let mut bag = Knapsack::new(0);
        assert_eq!(engine.pack(&sample_items(), &mut bag).unwrap(), 0);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_pack_zero_capacity_takes_zero_size_items() {
        let items = vec![Item::new(0, 9), Item::new(0, 4), Item::new(1, 1)];
        for packing in [PackingStrategy::DynamicProgramming, PackingStrategy::BranchAndBound] {
            let config = EngineConfig::sequential().with_packing(packing);
            let engine = SequentialEngine::with_config(&config);
            let mut bag = Knapsack::new(0);
            assert_eq!(engine.pack(&items, &mut bag).unwrap(), 13, "{packing:?}");
            assert_eq!(bag.items(), &[Item::new(0, 9), Item::new(0, 4)]);
        }
    }

    #[test]
    fn test_pack_everything_fits() {
        let engine = SequentialEngine::new();
        let mut bag = Knapsack::new(100);
        assert_eq!(engine.pack(&sample_items(), &mut bag).unwrap(), 18);
        assert_eq!(bag.items().len(), 4);
    }

    #[test]
    fn test_pack_bnb_item_limit() {
        let config = EngineConfig::sequential()
            .with_packing(PackingStrategy::BranchAndBound)
            .with_bnb_item_limit(3);
        let engine = SequentialEngine::with_config(&config);
        let mut bag = Knapsack::new(5);
        let err = engine.pack(&sample_items(), &mut bag).unwrap_err();
        assert!(matches!(err, AdventureError::InvalidInput { .. }));
        assert!(bag.is_empty());
    }

    #[test]
    fn test_pack_bnb_no_item_limit_by_default() {
        // At most one item fits, so the search stays linear in the item count.
        let items: Vec<Item> = (0..64u64).map(|i| Item::new(10, i % 23)).collect();
        let config = EngineConfig::sequential().with_packing(PackingStrategy::BranchAndBound);
        let engine = SequentialEngine::with_config(&config);
        let mut bag = Knapsack::new(15);
        assert_eq!(engine.pack(&items, &mut bag).unwrap(), 22);
        assert_eq!(bag.items(), &[Item::new(10, 22)]);
    }

    // ---- arrange ----

    #[test]
    fn test_arrange_sample() {
        let mut sand = vec![5, 3, 1, 4, 2];
        SequentialEngine::new().arrange(&mut sand).unwrap();
        assert_eq!(sand, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_arrange_empty() {
        let mut sand: Vec<u8> = Vec::new();
        SequentialEngine::new().arrange(&mut sand).unwrap();
        assert!(sand.is_empty());
    }

    // ---- select_best ----

    #[test]
    fn test_select_best_sample() {
        let best = SequentialEngine::new().select_best(&[5, 3, 1, 4, 2]).unwrap();
        assert_eq!(best, 5);
    }

    #[test]
    fn test_select_best_empty_fails() {
        let empty: Vec<i32> = Vec::new();
        let err = SequentialEngine::new().select_best(&empty).unwrap_err();
        assert_eq!(err, AdventureError::empty_input("select_best"));
    }

    #[test]
    fn test_select_best_single() {
        let best = SequentialEngine::new().select_best(&['q']).unwrap();
        assert_eq!(best, 'q');
    }
}
