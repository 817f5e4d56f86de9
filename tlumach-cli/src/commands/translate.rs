//! Translate command implementation

use crate::backend::build_translator;
use crate::commands::{init_logging, load_inputs};
use crate::config::{BackendKind, CliConfig};
use crate::delivery::ConsoleDeliverer;
use crate::input::InputText;
use crate::output::{create_formatter, create_writer, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tlumach_engine::{
    DeliveryTarget, InboundMessage, LanguagePair, RelayAction, RelayProcessor, SettingsStore,
};

/// Arguments for the translate command
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Input files or patterns (supports glob, `-` reads stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required_unless_present = "text")]
    pub input: Vec<String>,

    /// Literal text instead of input files
    #[arg(short, long, value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Target language code; without it the language is detected and
    /// routed like a chat message
    #[arg(long, value_name = "LANG")]
    pub to: Option<String>,

    /// Source language code (default from config, usually `auto`)
    #[arg(long, value_name = "LANG")]
    pub from: Option<String>,

    /// Translation backend
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Max chars per translate call
    #[arg(long, value_name = "CHARS")]
    pub chunk_limit: Option<usize>,

    /// Max chars of leading context per chunk
    #[arg(long, value_name = "CHARS")]
    pub overlap_limit: Option<usize>,

    /// Max chars per delivered unit
    #[arg(long, value_name = "CHARS")]
    pub transport_limit: Option<usize>,

    /// Translate calls in flight per input
    #[arg(long, value_name = "N", env = "TLUMACH_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Do not head routed translations with a direction banner
    #[arg(long)]
    pub no_banner: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "TLUMACH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl TranslateArgs {
    /// Execute the translate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let inputs = load_inputs(&self.input, self.text.as_deref())?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        runtime.block_on(self.run(&config, &inputs))
    }

    async fn run(&self, config: &CliConfig, inputs: &[InputText]) -> Result<()> {
        let translator = build_translator(&config.backend)?;
        let processor = RelayProcessor::with_config(translator, config.engine_config()?)?;
        let settings = SettingsStore::with_defaults(config.conversation_settings());

        let formatter = create_formatter(self.format, create_writer(self.output.as_deref())?);
        let names = inputs.iter().map(|input| input.name.clone()).collect();
        let deliverer = ConsoleDeliverer::new(formatter, names);

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_inputs(inputs.len() as u64);

        for (id, input) in inputs.iter().enumerate() {
            let conversation = id as i64;

            match &self.to {
                Some(target) => {
                    let pair = LanguagePair::new(config.languages.source_lang.clone(), target);
                    let output = processor.process(&input.text, &pair).await;
                    log::info!(
                        "{}: {} chunk(s), {} fallback(s), {} unit(s) in {:.1} ms",
                        input.name,
                        output.metadata.chunks,
                        output.metadata.fallbacks,
                        output.units.len(),
                        output.metadata.processing_time_ms
                    );
                    processor
                        .deliver(&output.units, &deliverer, &DeliveryTarget::new(conversation))
                        .await
                        .into_result()?;
                }
                None => {
                    let message = InboundMessage::new(conversation, input.text.clone());
                    match processor.handle_message(&message, &settings, &deliverer).await {
                        RelayAction::Skipped(reason) => {
                            log::warn!("{}: skipped ({:?})", input.name, reason);
                        }
                        RelayAction::Unchanged => {
                            log::info!("{}: translation equals the source", input.name);
                        }
                        RelayAction::Delivered(report) => {
                            report.into_result()?;
                        }
                    }
                }
            }

            progress.input_completed(&input.name);
        }

        progress.finish();
        deliverer.finish()
    }

    /// File configuration with command-line overrides applied
    fn effective_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;
        config.override_limits(self.chunk_limit, self.overlap_limit, self.transport_limit);
        if let Some(kind) = self.backend {
            config.backend.kind = kind;
        }
        if let Some(max_in_flight) = self.concurrency {
            config.backend.max_in_flight = max_in_flight;
        }
        if let Some(source) = &self.from {
            config.languages.source_lang = source.clone();
        }
        if self.no_banner {
            config.delivery.announce_direction = false;
        }
        Ok(config)
    }
}
