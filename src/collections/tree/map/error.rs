use derive_more::{Display, Error};

/// The error produced when a checked accessor is invoked with a key that the map doesn't contain.
#[derive(Debug, Display, Error)]
#[display("Key not found in ordered collection!")]
pub struct KeyNotFound;
