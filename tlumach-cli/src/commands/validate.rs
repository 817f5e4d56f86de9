//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        let checked = CliConfig::from_file(&self.config)
            .and_then(|config| config.engine_config().map(|engine| (config, engine)));

        match checked {
            Ok((config, engine)) => {
                println!("✓ Configuration is valid!");
                println!(
                    "  Chunks: {} chars, context {} chars",
                    engine.chunk_limit, engine.overlap_limit
                );
                println!(
                    "  Delivery: {} chars per unit, oversized tokens: {:?}",
                    engine.transport_limit, engine.oversized_delivery
                );
                println!(
                    "  Backend: {:?}, timeout {:?}, dispatch {}",
                    config.backend.kind,
                    engine.translate_timeout,
                    engine.dispatch_mode.as_str()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {:#}", e))
            }
        }
    }
}
