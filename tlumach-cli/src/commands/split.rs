//! Split command implementation

use crate::commands::{init_logging, load_inputs};
use crate::config::CliConfig;
use crate::output::{create_formatter, create_writer, OutputFormat, Segment};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use tlumach_core::{OutputSplitter, OversizedToken, Sequencer};

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
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

    /// Max chars per chunk
    #[arg(long, value_name = "CHARS")]
    pub chunk_limit: Option<usize>,

    /// Max chars of leading context per chunk
    #[arg(long, value_name = "CHARS")]
    pub overlap_limit: Option<usize>,

    /// Split into delivery units instead of translation chunks
    #[arg(long)]
    pub delivery: bool,

    /// Max chars per delivery unit
    #[arg(long, value_name = "CHARS")]
    pub transport_limit: Option<usize>,

    /// Cut single tokens longer than the limit instead of isolating them
    #[arg(long)]
    pub break_oversized: bool,

    /// Worker threads for splitting several inputs (default: CPU count)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let engine = config.engine_config()?;
        let inputs = load_inputs(&self.input, self.text.as_deref())?;
        log::info!("Splitting {} input(s)", inputs.len());

        let policy = if self.break_oversized {
            OversizedToken::Break
        } else {
            engine.oversized_delivery
        };
        let sequencer = Sequencer::from_limits(&engine.limits())?.oversized(policy);
        let output_splitter = OutputSplitter::new(engine.transport_limit).oversized(policy);

        let threads = self.threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to start worker threads")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_inputs(inputs.len() as u64);

        let per_input: Vec<Vec<Segment>> = pool.install(|| {
            inputs
                .par_iter()
                .map(|input| {
                    let segments: Vec<Segment> = if self.delivery {
                        output_splitter
                            .split(&input.text)
                            .iter()
                            .map(|unit| Segment::from_unit(&input.name, unit))
                            .collect()
                    } else {
                        sequencer
                            .sequence(&input.text)
                            .iter()
                            .map(|chunk| Segment::from_chunk(&input.name, chunk))
                            .collect()
                    };
                    progress.input_completed(&input.name);
                    segments
                })
                .collect()
        });
        progress.finish();

        let mut formatter = create_formatter(self.format, create_writer(self.output.as_deref())?);
        for segment in per_input.iter().flatten() {
            formatter.write_segment(segment)?;
        }
        formatter.finish()?;

        Ok(())
    }

    /// File configuration with command-line overrides applied
    fn effective_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;
        config.override_limits(self.chunk_limit, self.overlap_limit, self.transport_limit);
        Ok(config)
    }
}
