//! This crate is my attempt at writing a standard-library-style ordered map and set from scratch.
//!
//! # Purpose
//! This repo / crate is a project that I'm working on as a learning experience, with no expectation
//! for it to be used in production. The interesting part of an ordered map is the self-balancing
//! tree underneath it, so that is where almost all of the effort here has gone: red-black
//! insertion fixup, the four-case deletion fixup, rotations and in-order iteration. Writing these
//! helps me to understand and appreciate them properly as well as scratching my "I could write
//! that" itch.
//!
//! # Method
//! Both containers are backed by one binary search tree which can be compiled in two modes,
//! selected by a type parameter: [`RedBlack`](collections::tree::RedBlack) keeps the height
//! bounded at `2 * log2(n + 1)` no matter the insertion order, while
//! [`Unbalanced`](collections::tree::Unbalanced) performs no rebalancing at all and degenerates
//! into a linked list under sequential insertion. Keeping both around makes the cost of *not*
//! balancing easy to demonstrate, and keeps the fixup logic physically separate from the plain
//! BST logic.
//!
//! This project isn't intended to copy Rust's [`std`] but takes a lot of inspiration from its
//! APIs, in particular `BTreeMap` and `BTreeSet`.
//!
//! # Error Handling
//! Lookups that can reasonably fail return [`Option`]s or booleans, because a missing key isn't an
//! error for most callers. The checked accessors ([`at`](collections::tree::TreeMap::at) and
//! friends) come in pairs: a `try_` variant returning a strongly typed [`Result`] and a panicking
//! variant for callers who have already ensured the key exists. Error types are structs
//! implementing [`Error`](std::error::Error), derived where that removes repetitive code.
//!
//! # Dependencies
//! This crate uses `std`, plus some derive macros because they're helpful and remove the need for
//! some very repetitive programming. There is deliberately no dependency for the data structure
//! itself - that would defeat the point.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
