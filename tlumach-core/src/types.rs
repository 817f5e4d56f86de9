//! Shared segmentation types

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Kind of boundary a text was cut at, coarsest first.
///
/// The ordering doubles as the splitter's fallback cascade: a cut is only
/// attempted at a finer kind when the coarser one cannot satisfy the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Blank-line separated block of text
    Paragraph,
    /// Terminated sentence inside a paragraph
    Sentence,
    /// Whitespace-delimited token inside a sentence
    Word,
    /// Raw character position inside a token
    Character,
}

impl BoundaryKind {
    /// The next finer boundary kind, if any
    pub fn finer(self) -> Option<BoundaryKind> {
        match self {
            BoundaryKind::Paragraph => Some(BoundaryKind::Sentence),
            BoundaryKind::Sentence => Some(BoundaryKind::Word),
            BoundaryKind::Word => Some(BoundaryKind::Character),
            BoundaryKind::Character => None,
        }
    }

    /// Lowercase name used in logs and serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryKind::Paragraph => "paragraph",
            BoundaryKind::Sentence => "sentence",
            BoundaryKind::Word => "word",
            BoundaryKind::Character => "character",
        }
    }
}

/// What the splitter does with a single token longer than the limit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizedToken {
    /// Emit the token alone as one oversized chunk
    #[default]
    Isolate,
    /// Cut the token at character positions into pieces of at most `limit` chars
    Break,
}

/// A bounded, trimmed slice of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// 0-based position in the chunk sequence
    pub index: usize,
    /// The chunk content, equal to `source[start..end]`
    pub text: String,
    /// Byte offset of the first byte in the source
    pub start: usize,
    /// Byte offset one past the last byte in the source
    pub end: usize,
    /// Length in chars
    pub char_len: usize,
    /// Kind of the cut separating this chunk from its predecessor
    pub boundary: Option<BoundaryKind>,
    /// Whether this chunk is a single token exceeding the limit
    pub oversized: bool,
}

impl Chunk {
    /// Whether the cut before this chunk was a paragraph break in the source
    pub fn crosses_paragraph(&self) -> bool {
        self.boundary == Some(BoundaryKind::Paragraph)
    }

    /// Byte range of the chunk in the source text
    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if this is the first chunk
    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}
