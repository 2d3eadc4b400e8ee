use thiserror::Error;

/// Errors returned by the integer layer and the hash contexts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A buffer or parameter had the wrong length.
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    Size {
        /// What was measured.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Length given.
        actual: usize,
    },

    /// A numeric argument fell outside its accepted range.
    #[error("value out of range: {0}")]
    Range(String),

    /// A value could not be interpreted as a non-negative integer.
    #[error("not a non-negative integer: {0}")]
    EnforceType(String),

    /// The operation is intentionally not implemented for this type.
    #[error("operation not supported: {0}")]
    NotSupported(&'static str),

    /// `update` was called on a finalized context without a `reset`.
    #[error("hash context is finalized, reset it before writing")]
    Finalized,
}

impl Error {
    pub(crate) fn size(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::Size {
            what,
            expected,
            actual,
        }
    }

    pub(crate) fn shift_range(by: u32, bits: u32) -> Self {
        Error::Range(format!("shift amount {} outside [0, {}]", by, bits))
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
