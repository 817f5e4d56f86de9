//! Chunk sequencing
//!
//! Turns one input string into the ordered chunk list handed to translation,
//! attaching to every chunk after the first a leading context taken from the
//! previous chunk's original text.

use crate::context::extract_context;
use crate::error::Result;
use crate::limits::Limits;
use crate::splitter::Splitter;
use crate::types::{Chunk, OversizedToken};
use serde::{Deserialize, Serialize};

/// A chunk with its optional leading context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedChunk {
    /// The chunk itself
    pub chunk: Chunk,
    /// Excerpt of the previous chunk's original text, if any
    pub leading_context: Option<String>,
}

impl SequencedChunk {
    /// 0-based position in the sequence
    pub fn index(&self) -> usize {
        self.chunk.index
    }

    /// Original chunk text
    pub fn text(&self) -> &str {
        &self.chunk.text
    }

    /// Whether the cut before this chunk was a paragraph break
    pub fn crosses_paragraph(&self) -> bool {
        self.chunk.crosses_paragraph()
    }
}

/// Produce chunks with leading context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    splitter: Splitter,
    overlap_limit: usize,
}

impl Sequencer {
    /// Create a sequencer for the given chunk and overlap limits
    pub fn new(chunk_limit: usize, overlap_limit: usize) -> Self {
        Self {
            splitter: Splitter::new(chunk_limit),
            overlap_limit,
        }
    }

    /// Create a sequencer from validated limits
    pub fn from_limits(limits: &Limits) -> Result<Self> {
        limits.validate()?;
        Ok(Self::new(limits.chunk_limit, limits.overlap_limit))
    }

    /// Set the oversized-token policy of the underlying splitter
    pub fn oversized(mut self, policy: OversizedToken) -> Self {
        self.splitter = self.splitter.oversized(policy);
        self
    }

    /// Max chars per chunk
    pub fn chunk_limit(&self) -> usize {
        self.splitter.limit()
    }

    /// Max chars of leading context
    pub fn overlap_limit(&self) -> usize {
        self.overlap_limit
    }

    /// Split `text` and attach leading context
    pub fn sequence(&self, text: &str) -> Vec<SequencedChunk> {
        let chunks = self.splitter.split(text);
        let mut sequenced: Vec<SequencedChunk> = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let leading_context = sequenced
                .last()
                .map(|previous| extract_context(previous.text(), self.overlap_limit))
                .filter(|context| !context.is_empty());

            sequenced.push(SequencedChunk {
                chunk,
                leading_context,
            });
        }

        sequenced
    }
}

/// Split `text` into chunks of at most `chunk_limit` chars with up to
/// `overlap_limit` chars of leading context each
pub fn sequence(text: &str, chunk_limit: usize, overlap_limit: usize) -> Vec<SequencedChunk> {
    Sequencer::new(chunk_limit, overlap_limit).sequence(text)
}
