//! Leading-context extraction
//!
//! The context handed along with a chunk is a bounded excerpt of the tail of
//! the previous chunk's original text. Whole trailing sentences are preferred;
//! when not even the last sentence fits, the raw tail is used, advanced to the
//! next word start so that no word is cut.

use crate::segment::{paragraph_spans, sentence_spans, trim_span, Span};

/// Extract at most `limit` chars of trailing context from `text`
///
/// Returns an empty string when `limit` is zero, when `text` is blank, or
/// when the tail window holds only a fragment of a single word.
pub fn extract_context(text: &str, limit: usize) -> String {
    context_span(text, limit)
        .map(|span| text[span].to_string())
        .unwrap_or_default()
}

/// Byte span of the context [`extract_context`] would return
pub fn context_span(text: &str, limit: usize) -> Option<Span> {
    if limit == 0 {
        return None;
    }
    let whole = trim_span(text, 0..text.len())?;

    trailing_sentences(text, &whole, limit).or_else(|| trailing_words(text, &whole, limit))
}

/// Longest run of whole trailing sentences fitting in `limit` chars
fn trailing_sentences(text: &str, whole: &Span, limit: usize) -> Option<Span> {
    let sentences: Vec<Span> = paragraph_spans(text, whole.clone())
        .into_iter()
        .flat_map(|paragraph| sentence_spans(text, paragraph))
        .collect();

    let end = whole.end;
    let mut best = None;

    for sentence in sentences.iter().rev() {
        if text[sentence.start..end].chars().count() > limit {
            break;
        }
        best = Some(sentence.start..end);
    }

    best
}

/// Last `limit` chars, moved forward to the next word start
fn trailing_words(text: &str, whole: &Span, limit: usize) -> Option<Span> {
    let slice = &text[whole.clone()];
    let total = slice.chars().count();
    if total <= limit {
        return Some(whole.clone());
    }

    let (cut, _) = slice.char_indices().nth(total - limit)?;
    let cuts_word = slice[..cut]
        .chars()
        .next_back()
        .is_some_and(|ch| !ch.is_whitespace());

    let window_start = if cuts_word {
        let tail = &slice[cut..];
        let word_end = tail.find(char::is_whitespace)?;
        cut + word_end
    } else {
        cut
    };

    trim_span(text, whole.start + window_start..whole.end)
}
