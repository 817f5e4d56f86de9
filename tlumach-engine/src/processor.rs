//! Relay processor and builder
//!
//! [`RelayProcessor`] runs the whole pipeline for one message: sequence the
//! text into chunks with leading context, dispatch every chunk, reassemble
//! the outcomes and re-split the result for delivery.

use crate::config::{EngineConfig, EngineConfigBuilder};
use crate::delivery::{deliver_units, Deliverer, DeliveryReport, DeliveryTarget};
use crate::dispatcher::{OutcomeStatus, TranslationDispatcher, TranslationOutcome};
use crate::error::{EngineError, Result};
use crate::executor::{ConcurrentExecutor, DispatchMode, Executor, SequentialExecutor};
use crate::language::LanguagePair;
use crate::routing::{route, InboundMessage, SkipReason};
use crate::settings::SettingsStore;
use crate::translator::Translator;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tlumach_core::{reassemble, DeliveryUnit, OutputSplitter, Sequencer};
use tracing::{debug, info};

/// Rich output with metadata
#[derive(Debug, Clone, Serialize)]
pub struct RelayOutput {
    /// The text as received
    pub source: String,
    /// Per-chunk translation outcomes, in chunk order
    pub outcomes: Vec<TranslationOutcome>,
    /// Outcomes joined back into one text
    pub assembled: String,
    /// The assembled text split for the delivery channel
    pub units: Vec<DeliveryUnit>,
    /// Processing metadata
    pub metadata: ProcessingMetadata,
}

impl RelayOutput {
    /// Whether the assembled text equals the source, ignoring case and
    /// whitespace runs
    ///
    /// Reassembly normalizes separators at chunk boundaries, so both sides
    /// are compared word by word. Such results are not worth relaying.
    pub fn is_unchanged(&self) -> bool {
        normalized(&self.assembled) == normalized(&self.source)
    }

    /// Whether any chunk kept its original text
    pub fn has_fallbacks(&self) -> bool {
        self.metadata.fallbacks > 0
    }
}

fn normalized(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Processing metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingMetadata {
    /// Number of chunks dispatched
    pub chunks: usize,
    /// Chunks translated cleanly
    pub translated: usize,
    /// Chunks translated whose context could not be removed
    pub context_uncertain: usize,
    /// Chunks that kept their original text
    pub fallbacks: usize,
    /// Dispatch mode that was actually used
    #[serde(serialize_with = "serialize_mode")]
    pub mode_used: DispatchMode,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
    /// Total chars processed
    pub chars_processed: usize,
}

fn serialize_mode<S: serde::Serializer>(
    mode: &DispatchMode,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(mode.as_str())
}

impl ProcessingMetadata {
    fn collect(
        outcomes: &[TranslationOutcome],
        mode_used: DispatchMode,
        elapsed: Duration,
        chars_processed: usize,
    ) -> Self {
        let count = |wanted: fn(&OutcomeStatus) -> bool| {
            outcomes.iter().filter(|o| wanted(&o.status)).count()
        };
        Self {
            chunks: outcomes.len(),
            translated: count(|s| matches!(s, OutcomeStatus::Translated)),
            context_uncertain: count(|s| matches!(s, OutcomeStatus::ContextUncertain)),
            fallbacks: count(|s| matches!(s, OutcomeStatus::Fallback(_))),
            mode_used,
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
            chars_processed,
        }
    }
}

/// What happened to an inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum RelayAction {
    /// Not relayed
    Skipped(SkipReason),
    /// Translated, but identical to the source
    Unchanged,
    /// Translated and handed to the deliverer
    Delivered(DeliveryReport),
}

/// Executor for a resolved mode; `Auto` falls back to sequential
fn executor_for(mode: DispatchMode) -> Box<dyn Executor> {
    match mode {
        DispatchMode::Concurrent { max_in_flight } => {
            Box::new(ConcurrentExecutor::new(max_in_flight))
        }
        DispatchMode::Sequential | DispatchMode::Auto => Box::new(SequentialExecutor),
    }
}

/// Main relay processor
///
/// Cheap to share behind an `Arc`; every call works on its own message.
pub struct RelayProcessor {
    config: EngineConfig,
    sequencer: Sequencer,
    output: OutputSplitter,
    dispatcher: TranslationDispatcher,
}

impl std::fmt::Debug for RelayProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayProcessor")
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl RelayProcessor {
    /// Create a processor with the default configuration
    pub fn new(translator: Arc<dyn Translator>) -> Result<Self> {
        Self::with_config(translator, EngineConfig::default())
    }

    /// Create a processor with a custom configuration
    pub fn with_config(translator: Arc<dyn Translator>, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let sequencer = Sequencer::from_limits(&config.limits())?;
        let output =
            OutputSplitter::new(config.transport_limit).oversized(config.oversized_delivery);
        let dispatcher = TranslationDispatcher::from_config(translator, &config);

        Ok(Self {
            config,
            sequencer,
            output,
            dispatcher,
        })
    }

    /// Start a builder
    pub fn builder() -> RelayProcessorBuilder {
        RelayProcessorBuilder::new()
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the pipeline with the configured dispatch mode
    pub async fn process(&self, text: &str, pair: &LanguagePair) -> RelayOutput {
        self.process_with_mode(text, pair, self.config.dispatch_mode)
            .await
    }

    /// Run the pipeline with a specific dispatch mode
    pub async fn process_with_mode(
        &self,
        text: &str,
        pair: &LanguagePair,
        mode: DispatchMode,
    ) -> RelayOutput {
        let started = Instant::now();
        let chunks = self.sequencer.sequence(text);
        let mode = mode.resolve(
            chunks.len(),
            self.config.concurrent_threshold,
            self.config.max_in_flight,
        );

        debug!(
            chunks = chunks.len(),
            mode = mode.as_str(),
            pair = %pair,
            "sequenced message"
        );

        let executor = executor_for(mode);
        let outcomes = executor.run(&self.dispatcher, &chunks, pair).await;

        let assembled = reassemble(&outcomes);
        let units = self.output.split(&assembled);
        let metadata = ProcessingMetadata::collect(
            &outcomes,
            executor.mode(),
            started.elapsed(),
            text.chars().count(),
        );

        info!(
            chunks = metadata.chunks,
            fallbacks = metadata.fallbacks,
            context_uncertain = metadata.context_uncertain,
            units = units.len(),
            elapsed_ms = metadata.processing_time_ms,
            "message processed"
        );

        RelayOutput {
            source: text.to_string(),
            outcomes,
            assembled,
            units,
            metadata,
        }
    }

    /// Split arbitrary text for the delivery channel
    pub fn delivery_units(&self, text: &str) -> Vec<DeliveryUnit> {
        self.output.split(text)
    }

    /// Send already computed units
    pub async fn deliver<D>(
        &self,
        units: &[DeliveryUnit],
        deliverer: &D,
        target: &DeliveryTarget,
    ) -> DeliveryReport
    where
        D: Deliverer + ?Sized,
    {
        deliver_units(deliverer, target, units, self.config.inter_unit_delay).await
    }

    /// Process `text` and deliver the result
    pub async fn relay<D>(
        &self,
        text: &str,
        pair: &LanguagePair,
        deliverer: &D,
        target: &DeliveryTarget,
    ) -> DeliveryReport
    where
        D: Deliverer + ?Sized,
    {
        let output = self.process(text, pair).await;
        self.deliver(&output.units, deliverer, target).await
    }

    /// Route, translate and deliver one inbound message
    ///
    /// The first unit replies to the message when it has an id. With
    /// `announce_direction` set the text is headed by a direction banner.
    pub async fn handle_message<D>(
        &self,
        message: &InboundMessage,
        settings: &SettingsStore,
        deliverer: &D,
    ) -> RelayAction
    where
        D: Deliverer + ?Sized,
    {
        let route = match route(message, &settings.get(message.conversation)) {
            Ok(route) => route,
            Err(reason) => {
                debug!(
                    conversation = message.conversation,
                    reason = ?reason,
                    "message skipped"
                );
                return RelayAction::Skipped(reason);
            }
        };

        let output = self.process(&message.text, &route.pair).await;
        if output.is_unchanged() {
            debug!(
                conversation = message.conversation,
                "translation equals source, not relaying"
            );
            return RelayAction::Unchanged;
        }

        let units = if self.config.announce_direction {
            self.delivery_units(&format!("{}\n{}", route.banner(), output.assembled))
        } else {
            output.units
        };

        let mut target = DeliveryTarget::new(message.conversation);
        target.reply_to = message.message_id;

        RelayAction::Delivered(self.deliver(&units, deliverer, &target).await)
    }
}

/// Builder for RelayProcessor
///
/// Provides a fluent interface for configuring the processor.
#[derive(Default)]
pub struct RelayProcessorBuilder {
    translator: Option<Arc<dyn Translator>>,
    config_builder: EngineConfigBuilder,
}

impl RelayProcessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the translation backend (required)
    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config_builder = EngineConfigBuilder::from(config);
        self
    }

    /// Set the chunk limit
    pub fn chunk_limit(mut self, chars: usize) -> Self {
        self.config_builder = self.config_builder.chunk_limit(chars);
        self
    }

    /// Set the overlap limit
    pub fn overlap_limit(mut self, chars: usize) -> Self {
        self.config_builder = self.config_builder.overlap_limit(chars);
        self
    }

    /// Set the transport limit
    pub fn transport_limit(mut self, chars: usize) -> Self {
        self.config_builder = self.config_builder.transport_limit(chars);
        self
    }

    /// Set the per-call timeout
    pub fn translate_timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.translate_timeout(timeout);
        self
    }

    /// Set the dispatch mode
    pub fn dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.config_builder = self.config_builder.dispatch_mode(mode);
        self
    }

    /// Enable or disable the direction banner
    pub fn announce_direction(mut self, enabled: bool) -> Self {
        self.config_builder = self.config_builder.announce_direction(enabled);
        self
    }

    /// Use fast configuration preset
    pub fn fast(mut self) -> Self {
        self.config_builder = self.config_builder.fast();
        self
    }

    /// Use conservative configuration preset
    pub fn conservative(mut self) -> Self {
        self.config_builder = self.config_builder.conservative();
        self
    }

    /// Build the processor
    pub fn build(self) -> Result<RelayProcessor> {
        let translator = self
            .translator
            .ok_or_else(|| EngineError::ConfigError("a translator is required".to_string()))?;
        RelayProcessor::with_config(translator, self.config_builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::IdentityTranslator;

    fn identity() -> Arc<dyn Translator> {
        Arc::new(IdentityTranslator)
    }

    #[test]
    fn test_builder_requires_translator() {
        assert!(RelayProcessor::builder().build().is_err());
        assert!(RelayProcessor::builder()
            .translator(identity())
            .chunk_limit(100)
            .overlap_limit(100)
            .build()
            .is_err());

        let processor = RelayProcessor::builder()
            .translator(identity())
            .chunk_limit(300)
            .overlap_limit(40)
            .build()
            .unwrap();
        assert_eq!(processor.config().chunk_limit, 300);
    }

    #[tokio::test]
    async fn test_identity_output_is_unchanged() {
        let processor = RelayProcessor::new(identity()).unwrap();
        let output = processor
            .process("Hello there. How are you?", &LanguagePair::auto("uk"))
            .await;
        assert!(output.is_unchanged());
        assert!(!output.has_fallbacks());
        assert_eq!(output.metadata.chunks, 1);
        assert_eq!(output.metadata.translated, 1);
        assert_eq!(output.metadata.mode_used, DispatchMode::Sequential);
        assert_eq!(output.units.len(), 1);
    }

    #[tokio::test]
    async fn test_separator_normalization_counts_as_unchanged() {
        let processor = RelayProcessor::builder()
            .translator(identity())
            .chunk_limit(30)
            .overlap_limit(10)
            .build()
            .unwrap();

        let source = "First paragraph is here.\n\n\nSecond  paragraph follows.";
        let output = processor.process(source, &LanguagePair::auto("uk")).await;
        assert_eq!(output.metadata.chunks, 2);
        assert_ne!(output.assembled, source);
        assert!(output.is_unchanged());
    }

    #[tokio::test]
    async fn test_mode_used_comes_from_the_executor() {
        let processor = RelayProcessor::new(identity()).unwrap();
        let output = processor
            .process_with_mode(
                "One. Two.",
                &LanguagePair::auto("uk"),
                DispatchMode::Concurrent { max_in_flight: 0 },
            )
            .await;
        // A bound of 0 is clamped by the executor
        assert_eq!(
            output.metadata.mode_used,
            DispatchMode::Concurrent { max_in_flight: 1 }
        );
    }

    #[tokio::test]
    async fn test_auto_mode_resolves() {
        let processor = RelayProcessor::builder()
            .translator(identity())
            .config(
                EngineConfigBuilder::new()
                    .chunk_limit(20)
                    .overlap_limit(0)
                    .auto_concurrency(2, 4)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let short = processor.process("Tiny.", &LanguagePair::auto("en")).await;
        assert_eq!(short.metadata.mode_used, DispatchMode::Sequential);

        let long = processor
            .process(
                "First sentence here. Second sentence here. Third one.",
                &LanguagePair::auto("en"),
            )
            .await;
        assert_eq!(
            long.metadata.mode_used,
            DispatchMode::Concurrent { max_in_flight: 4 }
        );
        assert_eq!(long.assembled, long.source);
    }
}
