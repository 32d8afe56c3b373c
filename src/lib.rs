//! Fork-join engines for packing, arranging, and selecting.
//!
//! One contract, [`Adventure`], offers three operations:
//!
//! - **pack**: capacity-constrained maximum-value subset selection
//!   (0/1 knapsack), by dynamic programming or branch-and-bound
//! - **arrange**: in-place comparison sort
//! - **select_best**: maximum selection, failing on empty input
//!
//! Two interchangeable engines implement it:
//!
//! - [`SequentialEngine`]: single-threaded reference and correctness oracle
//! - [`ParallelEngine`]: decomposes each operation into a fork-join task
//!   tree over a fixed-size [`WorkerPool`]
//!
//! [`Engine`] picks one of them at construction from an [`EngineConfig`].
//! Every call is synchronous end-to-end and returns the same value-level
//! result for any worker count.
//!
//! # Architecture
//!
//! Scheduling is delegated to rayon. The crate only decides how work is
//! split (worker allotments passed down the recursion), when it joins, and
//! how shared state is guarded.

mod adventure;
mod config;
mod error;
mod knapsack;
mod parallel;
mod sequential;
mod types;

pub use adventure::{Adventure, Engine};
pub use config::{EngineConfig, PackingStrategy};
pub use error::{AdventureError, Result};
pub use parallel::{ParallelEngine, WorkerPool};
pub use sequential::SequentialEngine;
pub use types::{Comparable, Container, Item, Knapsack, Orderable};
