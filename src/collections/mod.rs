//! General-purpose collection types.
//!
//! # Purpose
//! I wrote these types to learn about ordered containers and the trees that back them, but also
//! concepts such as pointers, ownership across back-references and iterators.

pub mod tree;
