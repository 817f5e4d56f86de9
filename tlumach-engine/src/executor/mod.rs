//! Strategies for dispatching a message's chunks

use crate::dispatcher::{TranslationDispatcher, TranslationOutcome};
use crate::language::LanguagePair;
use async_trait::async_trait;
use tlumach_core::SequencedChunk;

pub mod concurrent;
pub mod sequential;

pub use concurrent::ConcurrentExecutor;
pub use sequential::SequentialExecutor;

/// Dispatch mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One translate call at a time, in chunk order
    Sequential,
    /// Up to `max_in_flight` calls at once, results kept in chunk order
    Concurrent {
        /// Calls allowed in flight
        max_in_flight: usize,
    },
    /// Pick per message with [`auto_select`]
    Auto,
}

impl DispatchMode {
    /// Resolve [`DispatchMode::Auto`] for a message of `chunk_count` chunks
    pub fn resolve(self, chunk_count: usize, threshold: usize, max_in_flight: usize) -> Self {
        match self {
            DispatchMode::Auto => auto_select(chunk_count, threshold, max_in_flight),
            other => other,
        }
    }

    /// Short name for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchMode::Sequential => "sequential",
            DispatchMode::Concurrent { .. } => "concurrent",
            DispatchMode::Auto => "auto",
        }
    }
}

/// A way of running the dispatcher over all chunks of a message
///
/// Implementations return exactly one outcome per chunk, ordered by chunk
/// index, whatever order the calls complete in.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Dispatch every chunk
    async fn run(
        &self,
        dispatcher: &TranslationDispatcher,
        chunks: &[SequencedChunk],
        pair: &LanguagePair,
    ) -> Vec<TranslationOutcome>;

    /// The mode this executor implements
    fn mode(&self) -> DispatchMode;
}

/// Choose a concrete mode from the chunk count
pub fn auto_select(chunk_count: usize, threshold: usize, max_in_flight: usize) -> DispatchMode {
    if chunk_count < 2 || chunk_count < threshold || max_in_flight < 2 {
        // A single call or a handful of them gains nothing from overlap
        DispatchMode::Sequential
    } else {
        DispatchMode::Concurrent { max_in_flight }
    }
}
