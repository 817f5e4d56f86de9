//! Async orchestration for the tlumach relay
//!
//! This crate drives the text pipeline of `tlumach-core` against a
//! translation backend and a delivery channel: dispatch strategies,
//! fail-open translation, ordered delivery, per-conversation settings and
//! language routing.

#![warn(missing_docs)]

pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod language;
pub mod processor;
pub mod routing;
pub mod settings;
pub mod translator;

// Re-export key types
pub use config::{EngineConfig, EngineConfigBuilder};
pub use delivery::{deliver_units, Deliverer, DeliveryReport, DeliveryTarget};
pub use dispatcher::{OutcomeStatus, TranslationDispatcher, TranslationOutcome};
pub use error::{DeliveryError, EngineError, Result, TranslateError};
pub use executor::{DispatchMode, Executor};
pub use language::{detect, Language, LanguagePair};
pub use processor::{
    ProcessingMetadata, RelayAction, RelayOutput, RelayProcessor, RelayProcessorBuilder,
};
pub use routing::{route, InboundMessage, Route, SkipReason};
pub use settings::{ConversationId, ConversationSettings, SettingsStore};
pub use translator::{
    IdentityTranslator, RetryPolicy, RetryingTranslator, TranslationRequest, Translator,
};

// Re-export from core for convenience
pub use tlumach_core::{DeliveryUnit, Limits, OversizedToken, SequencedChunk};
