//! Splitting assembled text for a size-limited delivery channel

use crate::splitter::Splitter;
use crate::types::OversizedToken;
use serde::{Deserialize, Serialize};

/// One message to hand to the delivery channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryUnit {
    /// 0-based send order
    pub index: usize,
    /// Message text
    pub text: String,
    /// Send as a reply to the originating message (first unit only)
    pub reply_to_origin: bool,
    /// Single token longer than the transport limit
    pub oversized: bool,
}

/// Splitter configured for a transport limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSplitter {
    splitter: Splitter,
}

impl OutputSplitter {
    /// Create an output splitter for `transport_limit` chars per unit
    pub fn new(transport_limit: usize) -> Self {
        Self {
            splitter: Splitter::new(transport_limit),
        }
    }

    /// Set the oversized-token policy
    pub fn oversized(mut self, policy: OversizedToken) -> Self {
        self.splitter = self.splitter.oversized(policy);
        self
    }

    /// Max chars per unit
    pub fn transport_limit(&self) -> usize {
        self.splitter.limit()
    }

    /// Split `text` into ordered delivery units
    pub fn split(&self, text: &str) -> Vec<DeliveryUnit> {
        self.splitter
            .split(text)
            .into_iter()
            .map(|chunk| DeliveryUnit {
                index: chunk.index,
                reply_to_origin: chunk.is_first(),
                oversized: chunk.oversized,
                text: chunk.text,
            })
            .collect()
    }
}

/// Split `text` into delivery units of at most `transport_limit` chars
pub fn split_for_delivery(text: &str, transport_limit: usize) -> Vec<DeliveryUnit> {
    OutputSplitter::new(transport_limit).split(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_reply() {
        let units = split_for_delivery("  Already short.  ", 4000);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "Already short.");
        assert!(units[0].reply_to_origin);
    }

    #[test]
    fn test_only_first_unit_replies() {
        let text = "One sentence here. Two sentence here. Three sentence here.";
        let units = split_for_delivery(text, 20);
        assert_eq!(units.len(), 3);
        assert!(units[0].reply_to_origin);
        assert!(units[1..].iter().all(|u| !u.reply_to_origin));
        assert_eq!(
            units.iter().map(|u| u.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_break_policy_for_hard_limit() {
        let url = format!("https://example.com/{}", "a".repeat(30));
        let units = OutputSplitter::new(16)
            .oversized(OversizedToken::Break)
            .split(&url);
        assert!(units.len() > 1);
        assert!(units.iter().all(|u| u.text.chars().count() <= 16));
        let rejoined: String = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(rejoined, url);
    }

    #[test]
    fn test_blank_text_has_no_units() {
        assert!(split_for_delivery("\n\n", 10).is_empty());
    }
}
