//! Ordered collection types backed by a binary search tree. Primarily revolves around [`TreeMap`]
//! and [`TreeSet`].
//!
//! # Balancing
//! Both containers take a balancing mode as a type parameter, chosen once and compiled in rather
//! than branched on at runtime:
//! - [`RedBlack`] (the default) maintains the classic red-black invariants, bounding the height at
//!   `2 * log2(n + 1)` so that lookups, insertions and removals stay logarithmic regardless of
//!   insertion order. This is what `std::map` implementations use.
//! - [`Unbalanced`] performs no rebalancing. It is cheaper per insertion on friendly input, but
//!   inserting keys in sorted order degrades the tree into a height-`n` list. It exists mostly to
//!   make that failure mode easy to observe next to the balanced variant.

pub mod map;
pub mod set;

mod mode;

pub use mode::*;

#[doc(inline)]
pub use map::TreeMap;
#[doc(inline)]
pub use set::TreeSet;
