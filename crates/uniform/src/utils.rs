//! Utility macros used across the crate.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but yields `Err($error)` instead of panicking.
///
/// ```ignore
/// ensure!(is_scheme_char(b), ReferenceError::invalid_scheme(scheme));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
