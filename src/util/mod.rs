#![warn(missing_docs)]

pub mod fmt;
pub mod option;
pub mod result;
