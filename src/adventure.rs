//! The capability contract and construction-time engine selection.

use crate::config::EngineConfig;
use crate::error::{AdventureError, Result};
use crate::parallel::ParallelEngine;
use crate::sequential::SequentialEngine;
use crate::types::{Comparable, Container, Item, Orderable};

/// Three operations behind one contract.
///
/// Every call is synchronous: it returns only after all work it started
/// has finished, even when that work fans out over a worker pool.
///
/// Each operation has a default body returning
/// [`AdventureError::Unimplemented`], so a partial engine fails loudly at
/// the call site instead of silently doing nothing.
///
/// # Examples
///
/// ```
/// use u_forkjoin::{Adventure, Engine, EngineConfig, Item, Knapsack};
///
/// let engine = Engine::new(&EngineConfig::parallel(4)).unwrap();
///
/// let items = [Item::new(2, 3), Item::new(3, 4), Item::new(4, 5), Item::new(5, 6)];
/// let mut bag = Knapsack::new(5);
/// assert_eq!(engine.pack(&items, &mut bag).unwrap(), 7);
///
/// let mut sand = vec![5, 3, 1, 4, 2];
/// engine.arrange(&mut sand).unwrap();
/// assert_eq!(sand, vec![1, 2, 3, 4, 5]);
///
/// assert_eq!(engine.select_best(&[5, 3, 1, 4, 2]).unwrap(), 5);
/// ```
pub trait Adventure {
    /// Short engine name, used in logs.
    fn name(&self) -> &str;

    /// Packs the maximum-weight subset of `items` whose sizes fit in
    /// `container`, adds that subset to the container, and returns its
    /// total weight.
    ///
    /// Empty `items` yields 0 and leaves the container untouched. With zero
    /// capacity only zero-size items can be packed.
    fn pack<C: Container>(&self, _items: &[Item], _container: &mut C) -> Result<u64> {
        Err(AdventureError::Unimplemented { operation: "pack" })
    }

    /// Reorders `tokens` in place into non-decreasing order.
    fn arrange<T: Orderable>(&self, _tokens: &mut [T]) -> Result<()> {
        Err(AdventureError::Unimplemented { operation: "arrange" })
    }

    /// Returns an element of `tokens` no smaller than any other.
    ///
    /// Fails with [`AdventureError::InvalidInput`] on empty input. Among
    /// equal maxima, which instance is returned is unspecified.
    fn select_best<T: Comparable>(&self, _tokens: &[T]) -> Result<T> {
        Err(AdventureError::Unimplemented {
            operation: "select_best",
        })
    }
}

/// An engine chosen once, at construction, from an [`EngineConfig`].
#[derive(Debug)]
pub enum Engine {
    /// Single-threaded reference engine.
    Sequential(SequentialEngine),
    /// Worker-pool engine.
    Parallel(ParallelEngine),
}

impl Engine {
    /// Validates `config` and builds the engine it selects.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        if config.parallel {
            Ok(Self::Parallel(ParallelEngine::with_config(config)?))
        } else {
            Ok(Self::Sequential(SequentialEngine::with_config(config)))
        }
    }
}

impl Adventure for Engine {
    fn name(&self) -> &str {
        match self {
            Self::Sequential(engine) => engine.name(),
            Self::Parallel(engine) => engine.name(),
        }
    }

    fn pack<C: Container>(&self, items: &[Item], container: &mut C) -> Result<u64> {
        match self {
            Self::Sequential(engine) => engine.pack(items, container),
            Self::Parallel(engine) => engine.pack(items, container),
        }
    }

    fn arrange<T: Orderable>(&self, tokens: &mut [T]) -> Result<()> {
        match self {
            Self::Sequential(engine) => engine.arrange(tokens),
            Self::Parallel(engine) => engine.arrange(tokens),
        }
    }

    fn select_best<T: Comparable>(&self, tokens: &[T]) -> Result<T> {
        match self {
            Self::Sequential(engine) => engine.select_best(tokens),
            Self::Parallel(engine) => engine.select_best(tokens),
        }
    }
}
