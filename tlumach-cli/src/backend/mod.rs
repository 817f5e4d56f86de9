//! Translation backends available from the command line

use crate::config::{BackendConfig, BackendKind};
use crate::error::CliError;
use anyhow::Result;
use std::sync::Arc;
use tlumach_engine::{IdentityTranslator, RetryingTranslator, Translator};

pub mod google;

pub use google::GoogleTranslator;

/// Build the configured backend, wrapped with retries
pub fn build_translator(config: &BackendConfig) -> Result<Arc<dyn Translator>> {
    let translator: Arc<dyn Translator> = match config.kind {
        BackendKind::Identity => Arc::new(IdentityTranslator),
        BackendKind::Google => {
            let google = GoogleTranslator::new(config.endpoint.clone(), config.timeout())
                .map_err(|e| CliError::BackendError(e.to_string()))?;
            Arc::new(RetryingTranslator::with_policy(google, config.retry_policy()))
        }
    };

    log::debug!("Using translation backend: {}", translator.name());
    Ok(translator)
}
