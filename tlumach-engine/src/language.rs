//! Languages, language pairs and the script-majority guess
//!
//! Detection is a binary heuristic: it counts Ukrainian-alphabet letters
//! against Latin letters and nothing more. Callers that know the direction
//! should build a [`LanguagePair`] directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code asking the backend to detect the source language itself
pub const AUTO: &str = "auto";

const UKRAINIAN_LETTERS: &str = "абвгґдеєжзиіїйклмнопрстуфхцчшщьюя";

/// A language the relay routes between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English
    English,
    /// Ukrainian
    Ukrainian,
}

impl Language {
    /// Get language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Ukrainian => "uk",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Ukrainian => "Ukrainian",
        }
    }

    /// Parse a language code or name
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Language::English),
            "uk" | "ukr" | "ua" | "ukrainian" => Some(Language::Ukrainian),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source and target language codes of one translation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Source code, or [`AUTO`]
    pub source: String,
    /// Target code
    pub target: String,
}

impl LanguagePair {
    /// Create a pair from two codes
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Pair with an auto-detected source
    pub fn auto(target: impl Into<String>) -> Self {
        Self::new(AUTO, target)
    }

    /// Pair between two known languages
    pub fn between(source: Language, target: Language) -> Self {
        Self::new(source.code(), target.code())
    }

    /// Whether the backend should detect the source language
    pub fn is_auto(&self) -> bool {
        self.source == AUTO
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", display_code(&self.source), display_code(&self.target))
    }
}

fn display_code(code: &str) -> String {
    match Language::from_code(code) {
        Some(language) => language.name().to_string(),
        None => code.to_uppercase(),
    }
}

/// Guess the language of `text` by letter majority
///
/// Returns `None` when the counts tie, including text without letters.
pub fn detect(text: &str) -> Option<Language> {
    let (ukrainian, latin) = text
        .chars()
        .flat_map(char::to_lowercase)
        .fold((0usize, 0usize), |(uk, en), ch| {
            if UKRAINIAN_LETTERS.contains(ch) {
                (uk + 1, en)
            } else if ch.is_ascii_lowercase() {
                (uk, en + 1)
            } else {
                (uk, en)
            }
        });

    match ukrainian.cmp(&latin) {
        std::cmp::Ordering::Greater => Some(Language::Ukrainian),
        std::cmp::Ordering::Less => Some(Language::English),
        std::cmp::Ordering::Equal => None,
    }
}
