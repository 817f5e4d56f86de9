//! End-to-end scenarios for the synchronous pipeline stages

use tlumach_core::{
    reassemble, sequence, split, split_for_delivery, BoundaryKind, OversizedToken, Splitter,
};

/// Build an ASCII paragraph of exactly `len` chars out of whole sentences
fn paragraph_of(len: usize) -> String {
    let mut paragraph = String::new();
    let mut i = 0;

    loop {
        let sentence = format!("Sentence {i:03} carries a handful of ordinary words.");
        let needed = sentence.len() + usize::from(!paragraph.is_empty());
        if paragraph.len() + needed + 10 > len {
            break;
        }
        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(&sentence);
        i += 1;
    }

    // Pad with a final sentence to hit the exact length
    let remaining = len - paragraph.len() - 1;
    paragraph.push_str(" Tail");
    paragraph.push_str(&"x".repeat(remaining - 5));
    paragraph.push('.');
    assert_eq!(paragraph.len(), len);
    paragraph
}

#[test]
fn test_long_paragraph_then_short_one() {
    let first = paragraph_of(3000);
    let second = paragraph_of(200);
    let text = format!("{first}\n\n{second}");

    let chunks = sequence(&text, 1500, 200);
    assert!(chunks.len() >= 3);

    let (last, head) = chunks.split_last().unwrap();
    assert_eq!(last.text(), second);
    assert!(last.crosses_paragraph());

    // Paragraph one is cut at sentence boundaries only
    assert!(head.len() >= 2);
    for item in head {
        assert!(item.chunk.char_len <= 1500);
        assert!(item.text().ends_with('.'));
        assert!(!item.crosses_paragraph());
    }
    for item in &head[1..] {
        assert_eq!(item.chunk.boundary, Some(BoundaryKind::Sentence));
    }
    let covered: usize = head.iter().map(|c| c.chunk.char_len).sum::<usize>() + head.len() - 1;
    assert_eq!(covered, 3000);

    // Every later chunk carries whole trailing sentences of its predecessor
    for pair in chunks.windows(2) {
        let context = pair[1].leading_context.as_deref().unwrap();
        assert!(!context.is_empty());
        assert!(context.chars().count() <= 200);
        assert!(pair[0].text().ends_with(context));
        assert!(context.starts_with(char::is_uppercase));
    }

    assert_eq!(reassemble(&chunks), text);
}

#[test]
fn test_single_oversized_word() {
    let word = "a".repeat(50);
    let chunks = sequence(&word, 20, 5);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk.char_len, 50);
    assert!(chunks[0].chunk.oversized);
    assert!(chunks[0].leading_context.is_none());
}

#[test]
fn test_identity_translation_round_trip() {
    let text = "Перший абзац. Він має кілька речень! Чи не так?\n\nSecond paragraph with Dr. Who. Done.";
    for limit in [5, 12, 30, 60, 500] {
        let chunks = sequence(text, limit, limit / 2);
        assert_eq!(reassemble(&chunks), text, "limit {limit}");
    }
}

#[test]
fn test_irregular_separators_are_normalized() {
    let text = "  One.\r\n\r\n\r\nTwo   words.\n \n\tThree.  ";
    let chunks = split(text, 8);
    assert_eq!(reassemble(&chunks), "One.\n\nTwo words.\n\nThree.");
}

#[test]
fn test_delivery_units_cover_assembled_text() {
    let assembled = paragraph_of(9000);
    let units = split_for_delivery(&assembled, 4000);
    assert_eq!(units.len(), 3);
    assert!(units[0].reply_to_origin);
    assert!(units.iter().all(|u| u.text.chars().count() <= 4000));

    let rejoined = units
        .iter()
        .map(|u| u.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rejoined, assembled);
}

#[test]
fn test_break_policy_never_exceeds_limit() {
    let text = format!("short {} words", "z".repeat(45));
    let chunks = Splitter::new(20)
        .oversized(OversizedToken::Break)
        .split(&text);
    assert!(chunks.iter().all(|c| c.char_len <= 20 && !c.oversized));
    assert_eq!(
        chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>(),
        vec![
            "short",
            "zzzzzzzzzzzzzzzzzzzz",
            "zzzzzzzzzzzzzzzzzzzz",
            "zzzzz",
            "words"
        ]
    );
}
