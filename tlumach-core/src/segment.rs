//! Paragraph, sentence and word segmentation
//!
//! All functions work on byte ranges of a borrowed source string and return
//! trimmed, non-empty spans in source order. Gaps between returned spans are
//! whitespace only, so no content is ever lost between segments.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Byte span inside the source text
pub type Span = Range<usize>;

static PARAGRAPH_SEPARATOR: OnceLock<Regex> = OnceLock::new();

/// Whitespace run holding at least two line breaks
fn paragraph_separator() -> &'static Regex {
    PARAGRAPH_SEPARATOR
        .get_or_init(|| Regex::new(r"\s*\n\s*\n\s*").expect("paragraph separator pattern is valid"))
}

/// Characters that may end a sentence
const TERMINATORS: &[char] = &['.', '!', '?', '…'];

/// Closing quotes and brackets allowed between a terminator and the gap
const CLOSERS: &[char] = &['"', '\'', ')', ']', '»', '”', '’', '›'];

/// Opening quotes and brackets allowed before the next sentence's capital
const OPENERS: &[char] = &['"', '\'', '(', '[', '«', '“', '‘', '‹', '„'];

/// Words that keep their period without ending the sentence
///
/// Matched case-sensitively against the token before a single `.`,
/// with internal periods kept (`e.g`, `U.S`).
const ABBREVIATIONS: &[&str] = &[
    // titles
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "St", "Mt", "Gen", "Col", "Capt", "Lt", "Sgt",
    "Rev", "Hon", "Gov", "Sen", "Rep",
    // business and reference
    "Inc", "Ltd", "Corp", "Co", "Bros", "No", "Vol", "Fig", "pp", "ed", "approx", "dept", "est",
    // latin and common
    "etc", "vs", "e.g", "i.e", "cf", "al", "a.m", "p.m", "U.S", "U.K", "Ph.D",
    // Ukrainian
    "вул", "просп", "м", "с", "р", "ст", "проф", "акад", "доц", "див", "напр", "т.д", "т.п",
    "т.зв", "ім", "грн", "тис", "млн", "млрд",
];

/// Trim a byte range to its non-whitespace core, `None` if nothing is left
pub fn trim_span(text: &str, span: Span) -> Option<Span> {
    let slice = &text[span.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let start = span.start + leading;
    Some(start..start + trimmed.len())
}

/// Split a range into paragraphs separated by blank lines
pub fn paragraph_spans(text: &str, span: Span) -> Vec<Span> {
    let slice = &text[span.clone()];
    let mut spans = Vec::new();
    let mut cursor = 0;

    for separator in paragraph_separator().find_iter(slice) {
        if let Some(paragraph) = trim_span(text, span.start + cursor..span.start + separator.start())
        {
            spans.push(paragraph);
        }
        cursor = separator.end();
    }

    if let Some(paragraph) = trim_span(text, span.start + cursor..span.end) {
        spans.push(paragraph);
    }

    spans
}

/// Split a range into sentences
///
/// A sentence ends after a run of terminators (plus closing quotes or
/// brackets) that is followed by whitespace and an uppercase letter,
/// optionally behind an opening quote. A lone `.` after a known
/// abbreviation or a single-letter initial does not end a sentence.
pub fn sentence_spans(text: &str, span: Span) -> Vec<Span> {
    let Some(span) = trim_span(text, span) else {
        return Vec::new();
    };
    let slice = &text[span.clone()];
    let chars: Vec<(usize, char)> = slice.char_indices().collect();
    let n = chars.len();
    let byte_at = |i: usize| if i < n { chars[i].0 } else { slice.len() };

    let mut spans = Vec::new();
    let mut sentence_start = 0;
    let mut i = 0;

    while i < n {
        if !TERMINATORS.contains(&chars[i].1) {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut j = i;
        while j < n && TERMINATORS.contains(&chars[j].1) {
            j += 1;
        }
        let single_period = j - run_start == 1 && chars[run_start].1 == '.';
        while j < n && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }

        if j < n && chars[j].1.is_whitespace() {
            let mut k = j;
            while k < n && chars[k].1.is_whitespace() {
                k += 1;
            }

            let abbreviated = single_period
                && is_abbreviation(&slice[byte_at(sentence_start)..byte_at(run_start)]);

            if k < n && starts_sentence(&chars[k..]) && !abbreviated {
                spans.push(span.start + byte_at(sentence_start)..span.start + byte_at(j));
                sentence_start = k;
                i = k;
                continue;
            }
        }

        i = j;
    }

    spans.push(span.start + byte_at(sentence_start)..span.end);
    spans
}

/// Split a range into whitespace-delimited words
pub fn word_spans(text: &str, span: Span) -> Vec<Span> {
    let slice = &text[span.clone()];
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;

    for (offset, ch) in slice.char_indices() {
        match (ch.is_whitespace(), word_start) {
            (true, Some(start)) => {
                spans.push(span.start + start..span.start + offset);
                word_start = None;
            }
            (false, None) => word_start = Some(offset),
            _ => {}
        }
    }

    if let Some(start) = word_start {
        spans.push(span.start + start..span.end);
    }

    spans
}

/// Whether the char sequence opens a new sentence
fn starts_sentence(rest: &[(usize, char)]) -> bool {
    let mut chars = rest.iter().map(|&(_, ch)| ch).skip_while(|ch| OPENERS.contains(ch));
    chars.next().is_some_and(char::is_uppercase)
}

/// Check the token right before a period against the abbreviation table
fn is_abbreviation(before_period: &str) -> bool {
    let token = before_period
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|ch: char| OPENERS.contains(&ch));

    if token.is_empty() {
        return false;
    }

    let mut letters = token.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        if first.is_uppercase() {
            return true;
        }
    }

    ABBREVIATIONS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(text: &'a str, spans: &[Span]) -> Vec<&'a str> {
        spans.iter().map(|span| &text[span.clone()]).collect()
    }

    #[test]
    fn test_paragraph_spans() {
        let text = "  First para.\nStill first.\n\nSecond.\r\n\r\n\n  Third  ";
        let spans = paragraph_spans(text, 0..text.len());
        assert_eq!(
            slices(text, &spans),
            vec!["First para.\nStill first.", "Second.", "Third"]
        );
    }

    #[test]
    fn test_blank_line_with_spaces_is_paragraph_break() {
        let text = "One.\n   \nTwo.";
        let spans = paragraph_spans(text, 0..text.len());
        assert_eq!(slices(text, &spans), vec!["One.", "Two."]);
    }

    #[test]
    fn test_whitespace_only_has_no_paragraphs() {
        let text = " \n\n \t ";
        assert!(paragraph_spans(text, 0..text.len()).is_empty());
        assert!(sentence_spans(text, 0..text.len()).is_empty());
        assert!(word_spans(text, 0..text.len()).is_empty());
    }

    #[test]
    fn test_sentence_spans_basic() {
        let text = "Hello world. This is a test! Is it? Yes.";
        let spans = sentence_spans(text, 0..text.len());
        assert_eq!(
            slices(text, &spans),
            vec!["Hello world.", "This is a test!", "Is it?", "Yes."]
        );
    }

    #[test]
    fn test_sentence_requires_capital() {
        let text = "Version 2.5 is out. see the notes. Then upgrade.";
        let spans = sentence_spans(text, 0..text.len());
        assert_eq!(
            slices(text, &spans),
            vec!["Version 2.5 is out. see the notes.", "Then upgrade."]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let text = "Dr. Smith met Mr. Jones. They talked, e.g. About J. R. Tolkien.";
        let spans = sentence_spans(text, 0..text.len());
        assert_eq!(
            slices(text, &spans),
            vec![
                "Dr. Smith met Mr. Jones.",
                "They talked, e.g. About J. R. Tolkien."
            ]
        );
    }

    #[test]
    fn test_quoted_sentences() {
        let text = "He said \"Stop.\" Then he left. «Так?» Так.";
        let spans = sentence_spans(text, 0..text.len());
        assert_eq!(
            slices(text, &spans),
            vec!["He said \"Stop.\"", "Then he left.", "«Так?»", "Так."]
        );
    }

    #[test]
    fn test_quoted_abbreviation_stays_attached() {
        let text = "See (\"Dr. Who\") for details. Next one.";
        let spans = sentence_spans(text, 0..text.len());
        assert_eq!(
            slices(text, &spans),
            vec!["See (\"Dr. Who\") for details.", "Next one."]
        );
    }

    #[test]
    fn test_cyrillic_sentences() {
        let text = "Привіт, світе! Як справи? Живу на вул. Шевченка. Добре.";
        let spans = sentence_spans(text, 0..text.len());
        assert_eq!(
            slices(text, &spans),
            vec![
                "Привіт, світе!",
                "Як справи?",
                "Живу на вул. Шевченка.",
                "Добре."
            ]
        );
    }

    #[test]
    fn test_ellipsis_and_runs() {
        let text = "Wait... What?! Fine…  Done";
        let spans = sentence_spans(text, 0..text.len());
        assert_eq!(slices(text, &spans), vec!["Wait...", "What?!", "Fine…", "Done"]);
    }

    #[test]
    fn test_sentence_spans_respect_subrange() {
        let text = "Skip. Inside one. Inside two. Skip.";
        let start = text.find("Inside").unwrap();
        let end = text.rfind(" Skip").unwrap();
        let spans = sentence_spans(text, start..end);
        assert_eq!(slices(text, &spans), vec!["Inside one.", "Inside two."]);
    }

    #[test]
    fn test_word_spans() {
        let text = "  alpha  beta\tgamma\n";
        let spans = word_spans(text, 0..text.len());
        assert_eq!(slices(text, &spans), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_trim_span() {
        let text = "  abc  ";
        assert_eq!(trim_span(text, 0..text.len()), Some(2..5));
        assert_eq!(trim_span(text, 0..2), None);
    }
}
