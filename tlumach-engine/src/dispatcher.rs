//! Per-chunk translation with fail-open fallback
//!
//! Each sequenced chunk gets exactly one [`Translator::translate`] call,
//! bounded by a timeout. Failures never propagate: the outcome then carries
//! the chunk's original text. Leading context either travels as a separate
//! request field or is inlined as `context ⁂ chunk` and cut out again.

use crate::config::EngineConfig;
use crate::error::TranslateError;
use crate::language::LanguagePair;
use crate::translator::{TranslationRequest, Translator};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tlumach_core::{Reassemble, SequencedChunk};
use tracing::{debug, warn};

/// How a chunk's translation went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Translated, context (if any) cleanly removed
    Translated,
    /// Translated, but the context marker was lost so the whole output was kept
    ContextUncertain,
    /// Translation failed; the original text is used
    Fallback(TranslateError),
}

impl OutcomeStatus {
    /// Whether the backend produced the text
    pub fn is_translated(&self) -> bool {
        !matches!(self, OutcomeStatus::Fallback(_))
    }

    /// Lowercase label for logs and serialized output
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeStatus::Translated => "translated",
            OutcomeStatus::ContextUncertain => "context_uncertain",
            OutcomeStatus::Fallback(_) => "fallback",
        }
    }
}

impl Serialize for OutcomeStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutcomeStatus::Fallback(err) => serializer.serialize_str(&format!("fallback: {err}")),
            other => serializer.serialize_str(other.label()),
        }
    }
}

/// Result of dispatching one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationOutcome {
    /// Index of the chunk
    pub index: usize,
    /// The chunk's original text
    pub original: String,
    /// Final text: translated, or `original` on fallback
    pub text: String,
    /// How the translation went
    pub status: OutcomeStatus,
    /// Whether the chunk was preceded by a paragraph break
    pub crosses_paragraph: bool,
}

impl Reassemble for TranslationOutcome {
    fn text(&self) -> &str {
        &self.text
    }

    fn crosses_paragraph(&self) -> bool {
        self.crosses_paragraph
    }
}

/// Translates sequenced chunks one call each
#[derive(Clone)]
pub struct TranslationDispatcher {
    translator: Arc<dyn Translator>,
    timeout: Duration,
    marker: String,
}

impl std::fmt::Debug for TranslationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationDispatcher")
            .field("translator", &self.translator.name())
            .field("timeout", &self.timeout)
            .field("marker", &self.marker)
            .finish()
    }
}

impl TranslationDispatcher {
    /// Create a dispatcher with explicit timeout and marker
    pub fn new(
        translator: Arc<dyn Translator>,
        timeout: Duration,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            timeout,
            marker: marker.into(),
        }
    }

    /// Create a dispatcher from an engine configuration
    pub fn from_config(translator: Arc<dyn Translator>, config: &EngineConfig) -> Self {
        Self::new(
            translator,
            config.translate_timeout,
            config.context_marker.clone(),
        )
    }

    /// The wrapped translator
    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    /// Translate one chunk; never fails
    pub async fn dispatch(
        &self,
        chunk: &SequencedChunk,
        pair: &LanguagePair,
    ) -> TranslationOutcome {
        let structured = self.translator.supports_context();
        let mut context = chunk.leading_context.as_deref();
        if !structured && context.is_some_and(|c| self.marker_clashes(c, chunk.text())) {
            // The marker in the text would make excision cut at the wrong place
            debug!(
                chunk = chunk.index(),
                "source contains the context marker, sending chunk without context"
            );
            context = None;
        }
        let inline = context.is_some() && !structured;

        let request = match context {
            Some(context) if inline => {
                TranslationRequest::new(self.compose(context, chunk.text()), pair.clone())
            }
            Some(context) => {
                TranslationRequest::new(chunk.text(), pair.clone()).with_context(context)
            }
            None => TranslationRequest::new(chunk.text(), pair.clone()),
        };

        debug!(
            chunk = chunk.index(),
            chars = chunk.chunk.char_len,
            context = context.is_some(),
            inline,
            backend = self.translator.name(),
            "dispatching chunk"
        );

        let call = self.translator.translate(&request);
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TranslateError::Timeout(self.timeout)),
        };

        let (text, status) = match result {
            Ok(output) if inline => self.excise(&output, chunk.index()),
            Ok(output) => match output.trim() {
                "" => (None, OutcomeStatus::Fallback(TranslateError::EmptyResult)),
                text => (Some(text.to_string()), OutcomeStatus::Translated),
            },
            Err(err) => (None, OutcomeStatus::Fallback(err)),
        };

        if let OutcomeStatus::Fallback(err) = &status {
            warn!(
                chunk = chunk.index(),
                reason = err.kind(),
                error = %err,
                "translation failed, keeping original text"
            );
        }

        TranslationOutcome {
            index: chunk.index(),
            original: chunk.text().to_string(),
            text: text.unwrap_or_else(|| chunk.text().to_string()),
            status,
            crosses_paragraph: chunk.crosses_paragraph(),
        }
    }

    fn marker_clashes(&self, context: &str, chunk: &str) -> bool {
        context.contains(&self.marker) || chunk.contains(&self.marker)
    }

    /// Inline context in front of the chunk
    fn compose(&self, context: &str, chunk: &str) -> String {
        format!("{context}\n\n{}\n\n{chunk}", self.marker)
    }

    /// Drop everything up to and including the first marker
    fn excise(&self, output: &str, index: usize) -> (Option<String>, OutcomeStatus) {
        if output.trim().is_empty() {
            return (None, OutcomeStatus::Fallback(TranslateError::EmptyResult));
        }

        match output.find(&self.marker) {
            Some(position) => {
                let rest = output[position + self.marker.len()..].trim();
                if rest.is_empty() {
                    (None, OutcomeStatus::Fallback(TranslateError::EmptyResult))
                } else {
                    (Some(rest.to_string()), OutcomeStatus::Translated)
                }
            }
            None => {
                warn!(
                    chunk = index,
                    marker = %self.marker,
                    "context marker lost, keeping whole output"
                );
                (Some(output.trim().to_string()), OutcomeStatus::ContextUncertain)
            }
        }
    }
}
