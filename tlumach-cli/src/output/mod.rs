//! Output formatting module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tlumach_core::{DeliveryUnit, SequencedChunk};

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// One piece of output: a chunk or a delivery unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Input the segment came from
    pub source: String,
    /// 0-based position within that input
    pub index: usize,
    /// Segment text
    pub text: String,
    /// Length in chars
    pub chars: usize,
    /// Leading context handed along with a chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Short annotation such as `reply` or `oversized`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Segment {
    /// Segment describing a sequenced chunk
    pub fn from_chunk(source: &str, chunk: &SequencedChunk) -> Self {
        Self {
            source: source.to_string(),
            index: chunk.index(),
            text: chunk.text().to_string(),
            chars: chunk.chunk.char_len,
            context: chunk.leading_context.clone(),
            note: chunk.chunk.oversized.then(|| "oversized".to_string()),
        }
    }

    /// Segment describing a delivery unit
    pub fn from_unit(source: &str, unit: &DeliveryUnit) -> Self {
        let note = match (unit.reply_to_origin, unit.oversized) {
            (true, false) => "reply",
            (false, false) => "follow-up",
            (true, true) => "reply, oversized",
            (false, true) => "follow-up, oversized",
        };
        Self {
            source: source.to_string(),
            index: unit.index,
            text: unit.text.clone(),
            chars: unit.text.chars().count(),
            context: None,
            note: Some(note.to_string()),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single segment
    fn write_segment(&mut self, segment: &Segment) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text, segments separated by a blank line
    Text,
    /// JSON array of segments with metadata
    Json,
    /// Markdown formatted output
    Markdown,
}

/// Writer for `output`, stdout when absent
pub fn create_writer(output: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}
