//! Core error types (deterministic only)

use thiserror::Error;

/// Core errors (no I/O, no external failures)
///
/// Segmentation itself never fails; these only come out of validating
/// user-supplied limits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A size limit was zero
    #[error("{name} must be at least 1")]
    ZeroLimit {
        /// Name of the offending limit
        name: &'static str,
    },

    /// Context overlap does not fit inside a chunk
    #[error("overlap limit {overlap} must be smaller than chunk limit {chunk}")]
    OverlapTooLarge {
        /// Configured overlap limit
        overlap: usize,
        /// Configured chunk limit
        chunk: usize,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
