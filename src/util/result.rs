use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// Unwraps the [`Result`], panicking with the error's own [`Display`](std::fmt::Display)
    /// message rather than the debug formatting that [`Result::unwrap`] would produce.
    ///
    /// This backs the panicking halves of the checked accessor pairs: `at` is `try_at` plus a
    /// throw.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{error}"),
        }
    }
}
