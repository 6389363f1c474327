//! Secret wrapper for bearer tokens and other sensitive strings

use std::fmt;
use zeroize::Zeroize;

/// Sensitive value, redacted in Debug/Display and zeroed on drop.
///
/// Bearer tokens travel through the token store, the driver, and the HTTP
/// client wrapped in this type so an accidental `{:?}` in a log line never
/// leaks them.
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the inner value (only at the point of use)
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let token = Secret::new(String::from("eyJhbGciOi-bearer-token"));
        let debug = format!("{token:?}");
        assert_eq!(debug, "[REDACTED]");
        assert!(!debug.contains("bearer-token"));
    }

    #[test]
    fn display_is_redacted() {
        let token = Secret::new(String::from("tok"));
        assert_eq!(format!("{token}"), "[REDACTED]");
    }

    #[test]
    fn expose_returns_inner_value() {
        let token = Secret::new(String::from("tok-123"));
        assert_eq!(token.expose(), "tok-123");
    }

    #[test]
    fn clone_preserves_value() {
        let token = Secret::new(String::from("tok-123"));
        let copy = token.clone();
        assert_eq!(copy.expose(), token.expose());
    }
}
