//! Configuration module
//!
//! A TOML file with four optional sections; anything left out keeps its
//! default. Command-line flags override file values.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tlumach_core::OversizedToken;
use tlumach_engine::{
    ConversationSettings, DispatchMode, EngineConfig, EngineConfigBuilder, RetryPolicy,
};

/// Public Google translate endpoint
pub const GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Chunking configuration
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Translation backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Delivery configuration
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Language routing configuration
    #[serde(default)]
    pub languages: LanguagesConfig,
}

/// Chunking-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Max chars per translate call
    pub chunk_limit: usize,

    /// Max chars of leading context
    pub overlap_limit: usize,

    /// Delimiter between inline context and chunk
    pub context_marker: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            chunk_limit: engine.chunk_limit,
            overlap_limit: engine.overlap_limit,
            context_marker: engine.context_marker,
        }
    }
}

/// Which translation backend to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Google's public translate endpoint
    #[default]
    Google,
    /// Echo the input back (dry run)
    Identity,
}

/// Backend-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend to use
    pub kind: BackendKind,

    /// Endpoint URL for the Google backend
    pub endpoint: String,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per call including the first
    pub max_attempts: u32,

    /// Translate calls in flight per message (1 = sequential)
    pub max_in_flight: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Google,
            endpoint: GOOGLE_ENDPOINT.to_string(),
            timeout_secs: 10,
            max_attempts: 3,
            max_in_flight: 1,
        }
    }
}

impl BackendConfig {
    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy for the backend
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            ..RetryPolicy::default()
        }
    }

    /// Dispatch mode implied by `max_in_flight`
    pub fn dispatch_mode(&self) -> DispatchMode {
        match self.max_in_flight {
            0 | 1 => DispatchMode::Sequential,
            max_in_flight => DispatchMode::Concurrent { max_in_flight },
        }
    }
}

/// Delivery-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Max chars per delivered unit
    pub transport_limit: usize,

    /// Pause between units in milliseconds
    pub inter_unit_delay_ms: u64,

    /// What to do with a single token longer than the limit
    pub oversized: OversizedToken,

    /// Head relayed text with a direction banner
    pub announce_direction: bool,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            transport_limit: EngineConfig::default().transport_limit,
            inter_unit_delay_ms: 0,
            oversized: OversizedToken::Isolate,
            announce_direction: true,
        }
    }
}

/// Language routing configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// Source language handed to the backend
    pub source_lang: String,

    /// Target for Ukrainian and undetermined text
    pub target_lang_en: String,

    /// Target for English text
    pub target_lang_uk: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        let settings = ConversationSettings::default();
        Self {
            source_lang: settings.source_lang,
            target_lang_en: settings.target_lang_en,
            target_lang_uk: settings.target_lang_uk,
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load `path` if given, the defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line limit overrides
    ///
    /// A chunk limit given without an overlap shrinks a configured overlap
    /// that no longer fits to a fifth of the chunk limit.
    pub fn override_limits(
        &mut self,
        chunk_limit: Option<usize>,
        overlap_limit: Option<usize>,
        transport_limit: Option<usize>,
    ) {
        if let Some(chars) = chunk_limit {
            self.segmentation.chunk_limit = chars;
            if overlap_limit.is_none() && self.segmentation.overlap_limit >= chars {
                self.segmentation.overlap_limit = chars / 5;
            }
        }
        if let Some(chars) = overlap_limit {
            self.segmentation.overlap_limit = chars;
        }
        if let Some(chars) = transport_limit {
            self.delivery.transport_limit = chars;
        }
    }

    /// Engine configuration described by this file
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let config = EngineConfigBuilder::new()
            .chunk_limit(self.segmentation.chunk_limit)
            .overlap_limit(self.segmentation.overlap_limit)
            .context_marker(self.segmentation.context_marker.clone())
            .transport_limit(self.delivery.transport_limit)
            .translate_timeout(self.backend.timeout())
            .dispatch_mode(self.backend.dispatch_mode())
            .oversized_delivery(self.delivery.oversized)
            .inter_unit_delay(Duration::from_millis(self.delivery.inter_unit_delay_ms))
            .announce_direction(self.delivery.announce_direction)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Settings used for routing messages without an explicit target
    pub fn conversation_settings(&self) -> ConversationSettings {
        ConversationSettings {
            source_lang: self.languages.source_lang.clone(),
            target_lang_en: self.languages.target_lang_en.clone(),
            target_lang_uk: self.languages.target_lang_uk.clone(),
            ..ConversationSettings::default()
        }
    }
}
