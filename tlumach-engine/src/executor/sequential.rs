//! Sequential execution strategy

use crate::dispatcher::{TranslationDispatcher, TranslationOutcome};
use crate::executor::{DispatchMode, Executor};
use crate::language::LanguagePair;
use async_trait::async_trait;
use tlumach_core::SequencedChunk;

/// Translates chunks one after another
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

#[async_trait]
impl Executor for SequentialExecutor {
    async fn run(
        &self,
        dispatcher: &TranslationDispatcher,
        chunks: &[SequencedChunk],
        pair: &LanguagePair,
    ) -> Vec<TranslationOutcome> {
        let mut outcomes = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            outcomes.push(dispatcher.dispatch(chunk, pair).await);
        }
        outcomes
    }

    fn mode(&self) -> DispatchMode {
        DispatchMode::Sequential
    }
}
