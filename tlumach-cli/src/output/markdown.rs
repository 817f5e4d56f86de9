//! Markdown output formatter

use super::{OutputFormatter, Segment};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - one section per segment
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    segment_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            segment_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn write_segment(&mut self, segment: &Segment) -> Result<()> {
        self.segment_count += 1;
        write!(
            self.writer,
            "### {} #{} ({} chars",
            segment.source,
            segment.index + 1,
            segment.chars
        )?;
        if let Some(note) = &segment.note {
            write!(self.writer, ", {note}")?;
        }
        writeln!(self.writer, ")")?;
        writeln!(self.writer)?;
        if let Some(context) = &segment.context {
            writeln!(self.writer, "> {}", context.replace('\n', " "))?;
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "{}", segment.text)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total segments: {}*", self.segment_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
