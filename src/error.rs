//! Error types for trueno-axes operations.
//!
//! Every failure in this crate is an argument problem reported synchronously
//! to the immediate caller. There is no I/O and nothing is retried.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-axes operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Data length mismatch between paired arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of the first array.
        x_len: usize,
        /// Length of the second array.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., log of non-positive value).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Any other malformed argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Build an [`Error::InvalidArgument`] from anything displayable.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether this error belongs to the invalid-argument class.
    ///
    /// Always true today; kept so callers do not have to enumerate variants
    /// when they only care about the class.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::DataLengthMismatch { .. }
                | Self::EmptyData
                | Self::ScaleDomain(_)
                | Self::InvalidArgument(_)
        )
    }
}

/// Check that two paired slices have the same length.
pub(crate) fn check_lengths(x_len: usize, y_len: usize) -> Result<()> {
    if x_len == y_len {
        Ok(())
    } else {
        Err(Error::DataLengthMismatch { x_len, y_len })
    }
}
