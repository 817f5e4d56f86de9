//! Per-conversation settings store
//!
//! A `RwLock`-protected map shared by every message handler. A poisoned lock
//! is recovered rather than propagated: the map holds plain values and stays
//! consistent after a panicking writer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Conversation (or user) identifier
pub type ConversationId = i64;

/// Relay settings of one conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationSettings {
    /// Translate incoming messages automatically
    pub auto_translate: bool,
    /// Source language code handed to the backend
    pub source_lang: String,
    /// Target for Ukrainian (and undetermined) messages
    pub target_lang_en: String,
    /// Target for English messages
    pub target_lang_uk: String,
    /// Also translate messages sent by the relay's own account
    pub translate_own_messages: bool,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            auto_translate: true,
            source_lang: "auto".to_string(),
            target_lang_en: "en".to_string(),
            target_lang_uk: "uk".to_string(),
            translate_own_messages: true,
        }
    }
}

/// Concurrency-safe settings map
#[derive(Debug, Default)]
pub struct SettingsStore {
    inner: RwLock<HashMap<ConversationId, ConversationSettings>>,
    defaults: ConversationSettings,
}

impl SettingsStore {
    /// Create an empty store using the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store handing out `defaults` for unknown conversations
    pub fn with_defaults(defaults: ConversationSettings) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            defaults,
        }
    }

    /// Settings of a conversation, the defaults if none were stored
    pub fn get(&self, id: ConversationId) -> ConversationSettings {
        self.read()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| self.defaults.clone())
    }

    /// Apply `change` to a conversation's settings and return the result
    pub fn update<F>(&self, id: ConversationId, change: F) -> ConversationSettings
    where
        F: FnOnce(&mut ConversationSettings),
    {
        let mut map = self.write();
        let entry = map.entry(id).or_insert_with(|| self.defaults.clone());
        change(entry);
        entry.clone()
    }

    /// Flip auto-translation, returning the new value
    pub fn toggle_auto_translate(&self, id: ConversationId) -> bool {
        self.update(id, |s| s.auto_translate = !s.auto_translate)
            .auto_translate
    }

    /// Flip own-message translation, returning the new value
    pub fn toggle_own_messages(&self, id: ConversationId) -> bool {
        self.update(id, |s| s.translate_own_messages = !s.translate_own_messages)
            .translate_own_messages
    }

    /// Forget a conversation
    pub fn remove(&self, id: ConversationId) -> Option<ConversationSettings> {
        self.write().remove(&id)
    }

    /// Number of conversations with stored settings
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no conversation has stored settings
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ConversationId, ConversationSettings>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ConversationId, ConversationSettings>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
