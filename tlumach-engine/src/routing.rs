//! Deciding whether and where an inbound message is relayed

use crate::language::{detect, Language, LanguagePair};
use crate::settings::{ConversationId, ConversationSettings};
use serde::{Deserialize, Serialize};

/// Messages shorter than this (trimmed, in chars) are not relayed
pub const MIN_MESSAGE_CHARS: usize = 3;

/// An inbound chat message as seen by the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Conversation the message belongs to
    pub conversation: ConversationId,
    /// Identifier of the message, used for replies
    pub message_id: Option<i64>,
    /// Message text
    pub text: String,
    /// Sent by the relay's own account
    pub from_self: bool,
}

impl InboundMessage {
    /// Create a message from another participant
    pub fn new(conversation: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation,
            message_id: None,
            text: text.into(),
            from_self: false,
        }
    }

    /// Set the message id
    pub fn with_id(mut self, message_id: i64) -> Self {
        self.message_id = Some(message_id);
        self
    }

    /// Mark the message as sent by the relay's own account
    pub fn from_self(mut self) -> Self {
        self.from_self = true;
        self
    }
}

/// Why a message is not relayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Starts with `/`
    Command,
    /// Auto-translation is off for the conversation
    AutoTranslateOff,
    /// Own message while own-message translation is off
    OwnMessage,
    /// Fewer than [`MIN_MESSAGE_CHARS`] chars
    TooShort,
}

/// Where a message goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Guessed language, `None` when undetermined
    pub detected: Option<Language>,
    /// Pair handed to the backend
    pub pair: LanguagePair,
}

impl Route {
    /// Header line announcing the direction, e.g. `🌍 Ukrainian → English`
    pub fn banner(&self) -> String {
        let from = self
            .detected
            .map(|language| language.name().to_string())
            .unwrap_or_else(|| self.pair.source.to_uppercase());
        let to = Language::from_code(&self.pair.target)
            .map(|language| language.name().to_string())
            .unwrap_or_else(|| self.pair.target.to_uppercase());
        format!("🌍 {from} → {to}")
    }
}

/// Route a message under the given settings
///
/// Ukrainian goes to `target_lang_en`, English to `target_lang_uk`, and
/// anything undetermined to `target_lang_en`.
pub fn route(
    message: &InboundMessage,
    settings: &ConversationSettings,
) -> Result<Route, SkipReason> {
    if message.text.starts_with('/') {
        return Err(SkipReason::Command);
    }
    if !settings.auto_translate {
        return Err(SkipReason::AutoTranslateOff);
    }
    if message.from_self && !settings.translate_own_messages {
        return Err(SkipReason::OwnMessage);
    }
    if message.text.trim().chars().count() < MIN_MESSAGE_CHARS {
        return Err(SkipReason::TooShort);
    }

    let detected = detect(&message.text);
    let target = match detected {
        Some(Language::English) => &settings.target_lang_uk,
        Some(Language::Ukrainian) | None => &settings.target_lang_en,
    };

    Ok(Route {
        detected,
        pair: LanguagePair::new(settings.source_lang.clone(), target.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_by_detected_language() {
        let settings = ConversationSettings::default();

        let ukrainian = route(&InboundMessage::new(1, "Доброго ранку всім"), &settings).unwrap();
        assert_eq!(ukrainian.detected, Some(Language::Ukrainian));
        assert_eq!(ukrainian.pair, LanguagePair::auto("en"));
        assert_eq!(ukrainian.banner(), "🌍 Ukrainian → English");

        let english = route(&InboundMessage::new(1, "Good morning"), &settings).unwrap();
        assert_eq!(english.pair.target, "uk");

        let other = route(&InboundMessage::new(1, "12345"), &settings).unwrap();
        assert_eq!(other.detected, None);
        assert_eq!(other.pair.target, "en");
        assert_eq!(other.banner(), "🌍 AUTO → English");
    }

    #[test]
    fn test_skip_rules() {
        let mut settings = ConversationSettings::default();

        assert_eq!(
            route(&InboundMessage::new(1, "/start"), &settings),
            Err(SkipReason::Command)
        );
        assert_eq!(
            route(&InboundMessage::new(1, "  ok "), &settings),
            Err(SkipReason::TooShort)
        );
        assert!(route(&InboundMessage::new(1, "Hey you").from_self(), &settings).is_ok());

        settings.translate_own_messages = false;
        assert_eq!(
            route(&InboundMessage::new(1, "Hey you").from_self(), &settings),
            Err(SkipReason::OwnMessage)
        );

        settings.auto_translate = false;
        assert_eq!(
            route(&InboundMessage::new(1, "Hey you"), &settings),
            Err(SkipReason::AutoTranslateOff)
        );
    }

    #[test]
    fn test_custom_targets() {
        let settings = ConversationSettings {
            target_lang_en: "de".into(),
            source_lang: "uk".into(),
            ..Default::default()
        };
        let relayed = route(&InboundMessage::new(5, "Слава Україні"), &settings).unwrap();
        assert_eq!(relayed.pair, LanguagePair::new("uk", "de"));
        assert_eq!(relayed.banner(), "🌍 Ukrainian → DE");
    }
}
