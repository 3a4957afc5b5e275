use std::hint;

pub(crate) trait OptionExtension<T> {
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    /// Unwraps an [`Option`] that the surrounding tree logic guarantees is [`Some`], such as the
    /// grandparent of a red node or the sibling on the deficient side of a removal. Debug builds
    /// hit [`unreachable!`] if a guarantee is ever wrong; release builds compile the [`None`]
    /// branch out with [`unreachable_unchecked`](hint::unreachable_unchecked).
    ///
    /// Each call site states its guarantee in an UNREACHABLE: comment, which serves as the safety
    /// documentation for this method. There is deliberately no panics section: a panic here means
    /// the fixup logic itself is broken, not that the caller misused the API.
    unsafe fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None if cfg!(debug_assertions) => unreachable!(),
            // SAFETY: The caller guarantees that None cannot occur here.
            None => unsafe { hint::unreachable_unchecked() },
        }
    }
}
