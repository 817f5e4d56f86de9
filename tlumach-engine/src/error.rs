//! Layered error types
//!
//! [`CoreError`] covers invalid limits, [`TranslateError`] covers one
//! backend call and [`DeliveryError`] one delivered unit. [`EngineError`]
//! wraps whatever reaches the caller of the engine.

use std::time::Duration;
use thiserror::Error;
use tlumach_core::CoreError;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core limit validation error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Delivery of a unit failed
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Failure of a single translation call
///
/// Never escapes the dispatcher; it is logged and the chunk falls back to
/// its original text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The backend answered with an error
    #[error("backend error: {0}")]
    Backend(String),

    /// The request could not be sent or the response read
    #[error("transport error: {0}")]
    Transport(String),

    /// The call did not finish in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The backend asked us to slow down
    #[error("rate limited by backend")]
    RateLimited,

    /// The backend answered with nothing usable
    #[error("empty translation")]
    EmptyResult,

    /// The response could not be parsed
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TranslateError {
    /// Whether repeating the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslateError::Transport(_) => true,
            TranslateError::Timeout(_) => true,
            TranslateError::Backend(_) => true,
            TranslateError::RateLimited => true,
            TranslateError::EmptyResult => false,
            TranslateError::Malformed(_) => false,
        }
    }

    /// Short label used in logs and outcome reasons
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::Backend(_) => "backend",
            TranslateError::Transport(_) => "transport",
            TranslateError::Timeout(_) => "timeout",
            TranslateError::RateLimited => "rate_limited",
            TranslateError::EmptyResult => "empty",
            TranslateError::Malformed(_) => "malformed",
        }
    }
}

/// Failure to hand one unit to the delivery channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unit {index} not delivered: {reason}")]
pub struct DeliveryError {
    /// Index of the unit that failed
    pub index: usize,
    /// Channel-specific reason
    pub reason: String,
}

impl DeliveryError {
    /// Create a delivery error for unit `index`
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
