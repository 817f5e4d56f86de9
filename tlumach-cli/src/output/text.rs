//! Plain text output formatter

use super::{OutputFormatter, Segment};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - segments separated by a blank line
pub struct TextFormatter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn write_segment(&mut self, segment: &Segment) -> Result<()> {
        if self.written > 0 {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "{}", segment.text)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
