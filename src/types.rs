//! Value records and token traits consumed by the engines.
//!
//! The records carry no behavior of their own. [`Item`] and [`Container`]
//! feed packing, [`Orderable`] tokens are sorted in place, and
//! [`Comparable`] tokens are reduced to their maximum.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable (size, weight) pair, candidate for packing.
///
/// `weight` is the value gained by packing the item; `size` is the
/// capacity it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Capacity consumed when packed.
    pub size: u64,
    /// Value gained when packed.
    pub weight: u64,
}

impl Item {
    /// Creates a new item.
    pub fn new(size: u64, weight: u64) -> Self {
        Self { size, weight }
    }
}

/// A capacity bound that accumulates chosen items.
///
/// The container does not enforce its own capacity: the packing algorithm
/// guarantees that the sizes of added items never exceed [`capacity`].
///
/// [`capacity`]: Container::capacity
pub trait Container {
    /// Maximum total size of the items this container may receive.
    fn capacity(&self) -> u64;

    /// Records one chosen item.
    fn add_item(&mut self, item: Item);
}

/// A plain container that remembers every item added to it.
///
/// # Examples
///
/// ```
/// use u_forkjoin::{Container, Item, Knapsack};
///
/// let mut bag = Knapsack::new(10);
/// bag.add_item(Item::new(4, 7));
/// assert_eq!(bag.total_size(), 4);
/// assert_eq!(bag.total_weight(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Knapsack {
    capacity: u64,
    items: Vec<Item>,
}

impl Knapsack {
    /// Creates an empty knapsack with the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Items added so far, in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Sum of the sizes of all added items.
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|i| i.size).sum()
    }

    /// Sum of the weights of all added items.
    pub fn total_weight(&self) -> u64 {
        self.items.iter().map(|i| i.weight).sum()
    }

    /// Whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Container for Knapsack {
    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }
}

/// A value under a total order that can be sorted in place.
///
/// `Clone` is required by the parallel merge, which buffers one half of the
/// range being merged. `Send + Sync` lets ranges cross worker threads.
pub trait Orderable: Ord + Clone + Send + Sync {}

impl<T: Ord + Clone + Send + Sync> Orderable for T {}

/// A totally ordered value with a minimum sentinel for reductions.
///
/// Reductions start from [`minimum`](Comparable::minimum) and fold every
/// element in with `max`, so the sentinel must not compare greater than
/// any real value.
pub trait Comparable: Orderable {
    /// Returns the smallest value of the type.
    fn minimum() -> Self;
}

macro_rules! impl_comparable_for_ints {
    ($($t:ty),* $(,)?) => {
        $(
            impl Comparable for $t {
                fn minimum() -> Self {
                    <$t>::MIN
                }
            }
        )*
    };
}

impl_comparable_for_ints!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Comparable for char {
    fn minimum() -> Self {
        '\0'
    }
}

impl Comparable for bool {
    fn minimum() -> Self {
        false
    }
}

impl Comparable for String {
    fn minimum() -> Self {
        String::new()
    }
}

impl<A: Comparable, B: Comparable> Comparable for (A, B) {
    fn minimum() -> Self {
        (A::minimum(), B::minimum())
    }
}
