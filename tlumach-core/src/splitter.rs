//! Boundary-aware splitter
//!
//! Packs text into chunks of at most `limit` chars, cutting at the coarsest
//! boundary kind that satisfies the limit:
//!
//! 1. consecutive paragraphs are packed greedily;
//! 2. a paragraph that alone exceeds the limit is packed by sentences;
//! 3. a sentence that alone exceeds the limit is packed by words;
//! 4. a word that alone exceeds the limit is handled by [`OversizedToken`].
//!
//! Pieces of an oversized unit never merge with the neighbouring units of the
//! coarser level: the open chunk is flushed before and after descending.
//! Every chunk is a trimmed slice of the source and the gaps between chunks
//! are whitespace only.

use crate::segment::{paragraph_spans, sentence_spans, word_spans, Span};
use crate::types::{BoundaryKind, Chunk, OversizedToken};

/// Split `text` into chunks of at most `limit` chars
///
/// Shorthand for `Splitter::new(limit).split(text)`.
pub fn split(text: &str, limit: usize) -> Vec<Chunk> {
    Splitter::new(limit).split(text)
}

/// Configurable boundary splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splitter {
    limit: usize,
    oversized: OversizedToken,
}

impl Splitter {
    /// Create a splitter for the given char limit
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            oversized: OversizedToken::default(),
        }
    }

    /// Set the policy for single tokens longer than the limit
    pub fn oversized(mut self, policy: OversizedToken) -> Self {
        self.oversized = policy;
        self
    }

    /// The configured char limit
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The configured oversized-token policy
    pub fn oversized_policy(&self) -> OversizedToken {
        self.oversized
    }

    /// Split `text` into an ordered chunk list
    ///
    /// Empty or whitespace-only input yields no chunks.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut packer = Packer::new(text, self.limit, self.oversized);

        for (i, paragraph) in paragraph_spans(text, 0..text.len()).into_iter().enumerate() {
            let gap = (i > 0).then_some(BoundaryKind::Paragraph);
            packer.push(paragraph, gap, BoundaryKind::Paragraph);
        }

        packer.finish()
    }
}

/// Chunk under construction
#[derive(Debug)]
struct OpenChunk {
    start: usize,
    end: usize,
    chars: usize,
    boundary: Option<BoundaryKind>,
}

/// Greedy packer shared by every level of the cascade
struct Packer<'a> {
    text: &'a str,
    limit: usize,
    policy: OversizedToken,
    open: Option<OpenChunk>,
    chunks: Vec<Chunk>,
}

impl<'a> Packer<'a> {
    fn new(text: &'a str, limit: usize, policy: OversizedToken) -> Self {
        Self {
            text,
            limit,
            policy,
            open: None,
            chunks: Vec::new(),
        }
    }

    /// Pack one unit of the given level
    ///
    /// `gap` is the kind of the cut that would separate this unit from the
    /// previously packed one. The first sub-unit of an oversized unit
    /// inherits its parent's gap.
    fn push(&mut self, span: Span, gap: Option<BoundaryKind>, level: BoundaryKind) {
        let chars = self.text[span.clone()].chars().count();

        if chars > self.limit {
            self.flush();
            match level.finer() {
                Some(finer) if finer != BoundaryKind::Character => {
                    let parts = if finer == BoundaryKind::Sentence {
                        sentence_spans(self.text, span)
                    } else {
                        word_spans(self.text, span)
                    };
                    for (i, part) in parts.into_iter().enumerate() {
                        let part_gap = if i == 0 { gap } else { Some(finer) };
                        self.push(part, part_gap, finer);
                    }
                    self.flush();
                }
                _ => self.emit_oversized(span, chars, gap),
            }
            return;
        }

        if let Some(open) = self.open.as_mut() {
            let gap_chars = self.text[open.end..span.start].chars().count();
            if open.chars + gap_chars + chars <= self.limit {
                open.end = span.end;
                open.chars += gap_chars + chars;
                return;
            }
            self.flush();
        }

        self.open = Some(OpenChunk {
            start: span.start,
            end: span.end,
            chars,
            boundary: gap,
        });
    }

    /// Handle a single token longer than the limit
    fn emit_oversized(&mut self, span: Span, chars: usize, gap: Option<BoundaryKind>) {
        match self.policy {
            OversizedToken::Isolate => self.emit(span, chars, gap, true),
            OversizedToken::Break => {
                let piece_len = self.limit.max(1);
                let token = &self.text[span.clone()];
                let mut boundary = gap;
                let mut piece_start = span.start;
                let mut piece_chars = 0;

                for (offset, _) in token.char_indices() {
                    if piece_chars == piece_len {
                        let piece_end = span.start + offset;
                        self.emit(piece_start..piece_end, piece_chars, boundary, false);
                        boundary = Some(BoundaryKind::Character);
                        piece_start = piece_end;
                        piece_chars = 0;
                    }
                    piece_chars += 1;
                }

                if piece_chars > 0 {
                    self.emit(piece_start..span.end, piece_chars, boundary, false);
                }
            }
        }
    }

    /// Close the open chunk, if any
    fn flush(&mut self) {
        if let Some(open) = self.open.take() {
            self.emit(open.start..open.end, open.chars, open.boundary, false);
        }
    }

    fn emit(&mut self, span: Span, chars: usize, boundary: Option<BoundaryKind>, oversized: bool) {
        self.chunks.push(Chunk {
            index: self.chunks.len(),
            text: self.text[span.clone()].to_string(),
            start: span.start,
            end: span.end,
            char_len: chars,
            boundary,
            oversized,
        });
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(split("", 10).is_empty());
        assert!(split("  \n\n\t ", 10).is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let text = "First paragraph.\n\nSecond paragraph.";
        let chunks = split(text, 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].boundary, None);
        assert!(!chunks[0].oversized);
    }

    #[test]
    fn test_paragraphs_packed_greedily() {
        let text = "Aaaa aaaa.\n\nBbbb bbbb.\n\nCccc cccc.";
        let chunks = split(text, 22);
        assert_eq!(texts(&chunks), vec!["Aaaa aaaa.\n\nBbbb bbbb.", "Cccc cccc."]);
        assert_eq!(chunks[1].boundary, Some(BoundaryKind::Paragraph));
        assert!(chunks[1].crosses_paragraph());
    }

    #[test]
    fn test_long_paragraph_falls_back_to_sentences() {
        let text = "One two three. Four five six. Seven eight.\n\nTail.";
        let chunks = split(text, 30);
        assert_eq!(
            texts(&chunks),
            vec!["One two three. Four five six.", "Seven eight.", "Tail."]
        );
        assert_eq!(chunks[0].boundary, None);
        assert_eq!(chunks[1].boundary, Some(BoundaryKind::Sentence));
        assert_eq!(chunks[2].boundary, Some(BoundaryKind::Paragraph));
    }

    #[test]
    fn test_sentence_pieces_do_not_merge_with_next_paragraph() {
        let text = "Alpha beta gamma. Delta epsilon.\n\nZeta.";
        // "Delta epsilon.\n\nZeta." would fit in 22 chars
        let chunks = split(text, 22);
        assert_eq!(texts(&chunks), vec!["Alpha beta gamma.", "Delta epsilon.", "Zeta."]);
    }

    #[test]
    fn test_long_sentence_falls_back_to_words() {
        let text = "alpha beta gamma delta epsilon";
        let chunks = split(text, 11);
        assert_eq!(texts(&chunks), vec!["alpha beta", "gamma delta", "epsilon"]);
        assert!(chunks
            .iter()
            .skip(1)
            .all(|c| c.boundary == Some(BoundaryKind::Word)));
    }

    #[test]
    fn test_oversized_word_is_isolated() {
        let word = "x".repeat(50);
        let text = format!("tiny {word} end");
        let chunks = split(&text, 20);
        assert_eq!(texts(&chunks), vec!["tiny", word.as_str(), "end"]);
        assert!(chunks[1].oversized);
        assert_eq!(chunks[1].char_len, 50);
        assert!(!chunks[0].oversized && !chunks[2].oversized);
    }

    #[test]
    fn test_break_policy_cuts_oversized_word() {
        let word = "абвгдеєжзиіїйклмноп"; // 19 chars
        let chunks = Splitter::new(5)
            .oversized(OversizedToken::Break)
            .split(word);
        assert_eq!(texts(&chunks), vec!["абвгд", "еєжзи", "іїйкл", "мноп"]);
        assert_eq!(chunks[0].boundary, None);
        assert!(chunks
            .iter()
            .skip(1)
            .all(|c| c.boundary == Some(BoundaryKind::Character)));
        assert!(chunks.iter().all(|c| c.char_len <= 5 && !c.oversized));
    }

    #[test]
    fn test_zero_limit_isolates_every_word() {
        let chunks = split("a bb ccc", 0);
        assert_eq!(texts(&chunks), vec!["a", "bb", "ccc"]);
        assert!(chunks.iter().all(|c| c.oversized));
    }

    #[test]
    fn test_offsets_match_source() {
        let text = "  Привіт, світе! Як справи?\n\n  Добре.  ";
        let chunks = split(text, 16);
        for chunk in &chunks {
            assert_eq!(&text[chunk.byte_range()], chunk.text);
            assert_eq!(chunk.char_len, chunk.text.chars().count());
            assert!(chunk.char_len <= 16);
        }
        assert_eq!(
            chunks.iter().map(|c| c.index).collect::<Vec<_>>(),
            (0..chunks.len()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_internal_whitespace_preserved() {
        let text = "keep   these\tspaces.\nAnd this line.";
        let chunks = split(text, 100);
        assert_eq!(chunks[0].text, text);
    }
}
