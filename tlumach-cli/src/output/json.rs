//! JSON output formatter

use super::{OutputFormatter, Segment};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - outputs segments as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    segments: Vec<Segment>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            segments: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn write_segment(&mut self, segment: &Segment) -> Result<()> {
        self.segments.push(segment.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.segments)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let mut buffer = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut buffer);
            formatter
                .write_segment(&Segment {
                    source: "in.txt".to_string(),
                    index: 0,
                    text: "Hello.".to_string(),
                    chars: 6,
                    context: None,
                    note: Some("reply".to_string()),
                })
                .unwrap();
            formatter.finish().unwrap();
        }

        let parsed: Vec<Segment> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].note.as_deref(), Some("reply"));
        assert!(!String::from_utf8(buffer).unwrap().contains("context"));
    }
}
