//! Redacting wrapper for credentials
//!
//! The access token lives inside `ClientConfig`, which is `Debug` and may be
//! logged. Wrapping it in [`Sensitive`] keeps it out of that output.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Value that never prints itself
///
/// ```
/// use envx_core_types::Sensitive;
///
/// let token = Sensitive::new("pul-0123".to_string());
/// assert_eq!(format!("{:?} {}", token, token), "***REDACTED*** ***REDACTED***");
/// assert_eq!(token.expose(), "pul-0123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the secret, e.g. to build an `Authorization` header
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl Sensitive<String> {
    /// Empty or whitespace-only, checked without exposing the value
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
