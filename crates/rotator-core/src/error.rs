//! Error types for driver construction
//!
//! Once running, the driver has no fatal error category: every per-cycle
//! failure is absorbed at the cycle boundary. The only error the crate
//! surfaces is the unrecoverable startup condition.

/// Errors from building a driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no tokens loaded — save at least one token before starting")]
    NoTokens,
}

/// Result alias for driver construction.
pub type Result<T> = std::result::Result<T, Error>;
