//! Size limits shared by the pipeline stages

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Default max chars per translation call
pub const DEFAULT_CHUNK_LIMIT: usize = 1500;
/// Default max chars of leading context
pub const DEFAULT_OVERLAP_LIMIT: usize = 200;
/// Default max chars per delivered message
pub const DEFAULT_TRANSPORT_LIMIT: usize = 4000;

/// The three char limits of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Max chars handed to the translation backend per call
    pub chunk_limit: usize,
    /// Max chars of context carried across a chunk boundary
    pub overlap_limit: usize,
    /// Max chars handed to the delivery channel per message
    pub transport_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            overlap_limit: DEFAULT_OVERLAP_LIMIT,
            transport_limit: DEFAULT_TRANSPORT_LIMIT,
        }
    }
}

impl Limits {
    /// Create limits from explicit values
    pub fn new(chunk_limit: usize, overlap_limit: usize, transport_limit: usize) -> Self {
        Self {
            chunk_limit,
            overlap_limit,
            transport_limit,
        }
    }

    /// Check that every limit is usable
    ///
    /// `overlap_limit` may be zero, which disables context.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_limit == 0 {
            return Err(CoreError::ZeroLimit {
                name: "chunk_limit",
            });
        }
        if self.transport_limit == 0 {
            return Err(CoreError::ZeroLimit {
                name: "transport_limit",
            });
        }
        if self.overlap_limit >= self.chunk_limit {
            return Err(CoreError::OverlapTooLarge {
                overlap: self.overlap_limit,
                chunk: self.chunk_limit,
            });
        }
        Ok(())
    }
}
