//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the limits, backend and target languages");
        println!("2. Validate your configuration:");
        println!("   tlumach validate --config {}", self.output.display());
        println!("3. Use it for translation:");
        println!(
            "   tlumach translate -i message.txt --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template configuration content, listing every default
    pub fn template() -> &'static str {
        r#"# tlumach configuration
#
# Every key is optional; removed keys keep the value shown here.
# Sizes are counted in characters.

[segmentation]
# Max chars handed to the translator per call
chunk_limit = 1500
# Max chars of preceding text sent along as context (0 disables context)
# Must be smaller than chunk_limit
overlap_limit = 200
# Separates inline context from the chunk for backends without a context field
context_marker = "⁂"

[backend]
# "google" or "identity" (echoes the input, for dry runs)
kind = "google"
endpoint = "https://translate.googleapis.com/translate_a/single"
timeout_secs = 10
# Attempts per call including the first; only transient errors are retried
max_attempts = 3
# Translate calls in flight per message (1 = one after another)
max_in_flight = 1

[delivery]
# Max chars per delivered message
transport_limit = 4000
# Pause between two delivered messages
inter_unit_delay_ms = 0
# Single tokens longer than the limit: "isolate" keeps them whole, "break" cuts them
oversized = "isolate"
# Head routed translations with a line like "🌍 Ukrainian → English"
announce_direction = true

[languages]
# Source language handed to the backend
source_lang = "auto"
# Target for Ukrainian (and undetermined) text
target_lang_en = "en"
# Target for English text
target_lang_uk = "uk"
"#
    }
}
