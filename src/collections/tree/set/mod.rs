//! A module containing [`TreeSet`] and associated types.
//!
//! The other included types are for iteration: plain in-order iteration plus the lazy set-algebra
//! iterators ([`Difference`], [`Intersection`], [`Union`], [`SymmetricDifference`]).
//!
//! [`TreeSet`] is also re-exported under the parent module.

mod iter;
mod tests;
mod tree_set;

pub use iter::*;
pub use tree_set::*;
