//! A module containing [`TreeMap`] and associated types.
//!
//! The other included types are for iteration (owned and borrowed iteration over entries, keys or
//! values, always in key order) and the [`KeyNotFound`] error returned by the checked accessors.
//!
//! As a note, there is no mutable iterator over entries or keys because mutating the keys of a
//! TreeMap in place would cause a logic error.
//!
//! [`TreeMap`] is also re-exported under the parent module.

mod error;
mod iter;
mod node;
mod tests;
mod tree_map;

pub use error::*;
pub use iter::*;
pub(crate) use node::*;
pub use tree_map::*;
