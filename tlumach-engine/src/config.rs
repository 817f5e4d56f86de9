//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::executor::DispatchMode;
use std::time::Duration;
use tlumach_core::{Limits, OversizedToken};

/// Default per-call translation timeout
pub const DEFAULT_TRANSLATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delimiter between inline context and chunk
pub const DEFAULT_CONTEXT_MARKER: &str = "⁂";

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Max chars handed to the translator per call
    pub chunk_limit: usize,
    /// Max chars of leading context per chunk (0 disables context)
    pub overlap_limit: usize,
    /// Max chars handed to the deliverer per unit
    pub transport_limit: usize,
    /// Bound on every translate call
    pub translate_timeout: Duration,
    /// Delimiter separating inline context from the chunk
    pub context_marker: String,
    /// Chunk dispatch strategy
    pub dispatch_mode: DispatchMode,
    /// Chunk count from which [`DispatchMode::Auto`] goes concurrent
    pub concurrent_threshold: usize,
    /// In-flight calls when [`DispatchMode::Auto`] goes concurrent
    pub max_in_flight: usize,
    /// Policy for single tokens longer than the transport limit
    pub oversized_delivery: OversizedToken,
    /// Pause between two delivered units
    pub inter_unit_delay: Duration,
    /// Prefix relayed messages with a direction banner
    pub announce_direction: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            chunk_limit: limits.chunk_limit,
            overlap_limit: limits.overlap_limit,
            transport_limit: limits.transport_limit,
            translate_timeout: DEFAULT_TRANSLATE_TIMEOUT,
            context_marker: DEFAULT_CONTEXT_MARKER.to_string(),
            dispatch_mode: DispatchMode::Sequential,
            concurrent_threshold: 4,
            max_in_flight: 4,
            oversized_delivery: OversizedToken::Isolate,
            inter_unit_delay: Duration::ZERO,
            announce_direction: true,
        }
    }
}

impl EngineConfig {
    /// Create a fast configuration translating chunks concurrently
    pub fn fast() -> Self {
        Self {
            dispatch_mode: DispatchMode::Concurrent { max_in_flight: 8 },
            max_in_flight: 8,
            ..Self::default()
        }
    }

    /// Create a balanced configuration
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create a conservative configuration for strict backends and channels
    pub fn conservative() -> Self {
        Self {
            chunk_limit: 1000,
            overlap_limit: 150,
            translate_timeout: Duration::from_secs(20),
            inter_unit_delay: Duration::from_millis(500),
            oversized_delivery: OversizedToken::Break,
            ..Self::default()
        }
    }

    /// The three size limits
    pub fn limits(&self) -> Limits {
        Limits::new(self.chunk_limit, self.overlap_limit, self.transport_limit)
    }

    /// Check every option
    pub fn validate(&self) -> Result<()> {
        self.limits().validate()?;

        if self.context_marker.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "context marker cannot be empty".to_string(),
            ));
        }
        if self.translate_timeout.is_zero() {
            return Err(EngineError::ConfigError(
                "translate timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_in_flight == 0 {
            return Err(EngineError::ConfigError(
                "max_in_flight must be at least 1".to_string(),
            ));
        }
        if let DispatchMode::Concurrent { max_in_flight: 0 } = self.dispatch_mode {
            return Err(EngineError::ConfigError(
                "concurrent dispatch needs at least 1 call in flight".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl From<EngineConfig> for EngineConfigBuilder {
    fn from(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl EngineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk limit
    pub fn chunk_limit(mut self, chars: usize) -> Self {
        self.config.chunk_limit = chars;
        self
    }

    /// Set the overlap limit
    pub fn overlap_limit(mut self, chars: usize) -> Self {
        self.config.overlap_limit = chars;
        self
    }

    /// Set the transport limit
    pub fn transport_limit(mut self, chars: usize) -> Self {
        self.config.transport_limit = chars;
        self
    }

    /// Set the per-call timeout
    pub fn translate_timeout(mut self, timeout: Duration) -> Self {
        self.config.translate_timeout = timeout;
        self
    }

    /// Set the inline context marker
    pub fn context_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.config.context_marker = marker.into();
        self
    }

    /// Set the dispatch mode
    pub fn dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.config.dispatch_mode = mode;
        self
    }

    /// Set the auto-mode threshold and concurrency
    pub fn auto_concurrency(mut self, threshold: usize, max_in_flight: usize) -> Self {
        self.config.dispatch_mode = DispatchMode::Auto;
        self.config.concurrent_threshold = threshold;
        self.config.max_in_flight = max_in_flight;
        self
    }

    /// Set the oversized-token policy for delivery
    pub fn oversized_delivery(mut self, policy: OversizedToken) -> Self {
        self.config.oversized_delivery = policy;
        self
    }

    /// Set the pause between delivered units
    pub fn inter_unit_delay(mut self, delay: Duration) -> Self {
        self.config.inter_unit_delay = delay;
        self
    }

    /// Enable or disable the direction banner
    pub fn announce_direction(mut self, enabled: bool) -> Self {
        self.config.announce_direction = enabled;
        self
    }

    /// Use fast preset
    pub fn fast(mut self) -> Self {
        self.config = EngineConfig::fast();
        self
    }

    /// Use balanced preset
    pub fn balanced(self) -> Self {
        // Already the default
        self
    }

    /// Use conservative preset
    pub fn conservative(mut self) -> Self {
        self.config = EngineConfig::conservative();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
