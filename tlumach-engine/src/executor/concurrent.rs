//! Bounded concurrent execution strategy

use crate::dispatcher::{TranslationDispatcher, TranslationOutcome};
use crate::executor::{DispatchMode, Executor};
use crate::language::LanguagePair;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tlumach_core::SequencedChunk;

/// Keeps up to `max_in_flight` translate calls running
///
/// Outcomes are yielded in chunk order; a slow early chunk holds back the
/// later ones but never reorders them.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentExecutor {
    max_in_flight: usize,
}

impl ConcurrentExecutor {
    /// Create an executor; a bound of 0 is treated as 1
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Calls allowed in flight
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }
}

#[async_trait]
impl Executor for ConcurrentExecutor {
    async fn run(
        &self,
        dispatcher: &TranslationDispatcher,
        chunks: &[SequencedChunk],
        pair: &LanguagePair,
    ) -> Vec<TranslationOutcome> {
        // Futures are lazy, so building them up front starts no call early
        let calls: Vec<_> = chunks
            .iter()
            .map(|chunk| dispatcher.dispatch(chunk, pair))
            .collect();

        stream::iter(calls)
            .buffered(self.max_in_flight)
            .collect()
            .await
    }

    fn mode(&self) -> DispatchMode {
        DispatchMode::Concurrent {
            max_in_flight: self.max_in_flight,
        }
    }
}
