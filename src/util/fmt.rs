use std::fmt::{self, Debug, Formatter};

/// Wraps a pre-rendered string so that [`Debug`] emits it verbatim, with no quoting or escaping.
/// Used to embed the sideways tree drawing inside a `debug_struct` field.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
