//! Joining pieces back into one text

use crate::sequencer::SequencedChunk;
use crate::types::Chunk;

/// Separator re-inserted where a chunk boundary was a paragraph break
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Separator used at every other chunk boundary
pub const WORD_SEPARATOR: &str = " ";

/// Something that can be joined by [`reassemble`]
pub trait Reassemble {
    /// Text contributed by this piece
    fn text(&self) -> &str;

    /// Whether the piece is preceded by a paragraph break
    fn crosses_paragraph(&self) -> bool;
}

impl Reassemble for Chunk {
    fn text(&self) -> &str {
        &self.text
    }

    fn crosses_paragraph(&self) -> bool {
        Chunk::crosses_paragraph(self)
    }
}

impl Reassemble for SequencedChunk {
    fn text(&self) -> &str {
        SequencedChunk::text(self)
    }

    fn crosses_paragraph(&self) -> bool {
        SequencedChunk::crosses_paragraph(self)
    }
}

impl<T: Reassemble + ?Sized> Reassemble for &T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn crosses_paragraph(&self) -> bool {
        (**self).crosses_paragraph()
    }
}

/// Join pieces in order
///
/// Uses [`PARAGRAPH_SEPARATOR`] before a piece that crosses a paragraph and
/// [`WORD_SEPARATOR`] otherwise. The flag of the first piece is ignored.
pub fn reassemble<T: Reassemble>(pieces: &[T]) -> String {
    let capacity = pieces
        .iter()
        .map(|piece| piece.text().len() + PARAGRAPH_SEPARATOR.len())
        .sum();
    let mut assembled = String::with_capacity(capacity);

    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            assembled.push_str(separator_before(piece));
        }
        assembled.push_str(piece.text());
    }

    assembled
}

/// Number of paragraph separators [`reassemble`] inserts for `pieces`
pub fn paragraph_crossings<T: Reassemble>(pieces: &[T]) -> usize {
    pieces
        .iter()
        .skip(1)
        .filter(|piece| piece.crosses_paragraph())
        .count()
}

fn separator_before<T: Reassemble>(piece: &T) -> &'static str {
    if piece.crosses_paragraph() {
        PARAGRAPH_SEPARATOR
    } else {
        WORD_SEPARATOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::split;

    struct Piece(&'static str, bool);

    impl Reassemble for Piece {
        fn text(&self) -> &str {
            self.0
        }

        fn crosses_paragraph(&self) -> bool {
            self.1
        }
    }

    #[test]
    fn test_separators() {
        let pieces = [Piece("one", true), Piece("two", false), Piece("three", true)];
        assert_eq!(reassemble(&pieces), "one two\n\nthree");
        assert_eq!(paragraph_crossings(&pieces), 1);
    }

    #[test]
    fn test_empty_and_single() {
        let none: [Piece; 0] = [];
        assert_eq!(reassemble(&none), "");
        assert_eq!(reassemble(&[Piece("solo", false)]), "solo");
    }

    #[test]
    fn test_round_trip_of_normalized_text() {
        let text = "First paragraph with words. Another sentence here.\n\nSecond paragraph.";
        let chunks = split(text, 25);
        assert!(chunks.len() > 2);
        assert_eq!(reassemble(&chunks), text);
    }

    #[test]
    fn test_references_can_be_joined() {
        let chunks = split("a b c", 1);
        let refs: Vec<&Chunk> = chunks.iter().collect();
        assert_eq!(reassemble(&refs), "a b c");
    }
}
