//! Handing delivery units to a size-limited channel
//!
//! Units go out strictly in index order. The first one is sent as a reply to
//! the originating message when the target names one; later units are plain
//! follow-ups. Delivery stops at the first failure and the report says how
//! far it got, so units already sent stay valid.

use crate::error::DeliveryError;
use crate::settings::ConversationId;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tlumach_core::DeliveryUnit;
use tracing::{debug, warn};

/// Where units are sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryTarget {
    /// Conversation receiving the units
    pub conversation: ConversationId,
    /// Message the first unit replies to
    pub reply_to: Option<i64>,
}

impl DeliveryTarget {
    /// Target a conversation without replying
    pub fn new(conversation: ConversationId) -> Self {
        Self {
            conversation,
            reply_to: None,
        }
    }

    /// Reply to `message_id` with the first unit
    pub fn replying_to(mut self, message_id: i64) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    /// Message `unit` should reply to, if any
    pub fn reply_for(&self, unit: &DeliveryUnit) -> Option<i64> {
        if unit.reply_to_origin {
            self.reply_to
        } else {
            None
        }
    }
}

/// A delivery channel
#[async_trait]
pub trait Deliverer: Send + Sync {
    /// Send one unit
    async fn deliver(
        &self,
        target: &DeliveryTarget,
        unit: &DeliveryUnit,
    ) -> Result<(), DeliveryError>;
}

#[async_trait]
impl<T: Deliverer + ?Sized> Deliverer for Arc<T> {
    async fn deliver(
        &self,
        target: &DeliveryTarget,
        unit: &DeliveryUnit,
    ) -> Result<(), DeliveryError> {
        (**self).deliver(target, unit).await
    }
}

/// How far delivery of a message got
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    /// Units sent successfully, always a prefix of the unit list
    pub delivered: usize,
    /// Units there were to send
    pub total: usize,
    /// The failure that stopped delivery
    #[serde(serialize_with = "serialize_failure")]
    pub failure: Option<DeliveryError>,
}

fn serialize_failure<S: serde::Serializer>(
    failure: &Option<DeliveryError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match failure {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

impl DeliveryReport {
    /// Report for a message with nothing to send
    pub fn empty() -> Self {
        Self {
            delivered: 0,
            total: 0,
            failure: None,
        }
    }

    /// Whether every unit went out
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.delivered == self.total
    }

    /// Turn an incomplete delivery into its error
    pub fn into_result(self) -> Result<usize, DeliveryError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.delivered),
        }
    }
}

/// Send `units` in order, pausing `inter_unit_delay` between two of them
pub async fn deliver_units<D>(
    deliverer: &D,
    target: &DeliveryTarget,
    units: &[DeliveryUnit],
    inter_unit_delay: Duration,
) -> DeliveryReport
where
    D: Deliverer + ?Sized,
{
    let mut report = DeliveryReport {
        delivered: 0,
        total: units.len(),
        failure: None,
    };

    for unit in units {
        if report.delivered > 0 && !inter_unit_delay.is_zero() {
            tokio::time::sleep(inter_unit_delay).await;
        }

        match deliverer.deliver(target, unit).await {
            Ok(()) => {
                debug!(
                    conversation = target.conversation,
                    unit = unit.index,
                    chars = unit.text.chars().count(),
                    reply = unit.reply_to_origin,
                    "unit delivered"
                );
                report.delivered += 1;
            }
            Err(err) => {
                warn!(
                    conversation = target.conversation,
                    delivered = report.delivered,
                    total = report.total,
                    error = %err,
                    "delivery stopped"
                );
                report.failure = Some(err);
                break;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tlumach_core::split_for_delivery;

    /// Records sends and fails on one unit index
    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(Option<i64>, String)>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl Deliverer for Recorder {
        async fn deliver(
            &self,
            target: &DeliveryTarget,
            unit: &DeliveryUnit,
        ) -> Result<(), DeliveryError> {
            if self.fail_on == Some(unit.index) {
                return Err(DeliveryError::new(unit.index, "message too long"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((target.reply_for(unit), unit.text.clone()));
            Ok(())
        }
    }

    fn units() -> Vec<DeliveryUnit> {
        split_for_delivery("First unit here. Second unit here. Third unit here.", 17)
    }

    #[tokio::test]
    async fn test_delivers_in_order_with_first_reply() {
        let recorder = Recorder::default();
        let target = DeliveryTarget::new(9).replying_to(100);
        let report = deliver_units(&recorder, &target, &units(), Duration::ZERO).await;

        assert!(report.is_complete());
        assert_eq!(report.clone().into_result(), Ok(3));
        let sent = recorder.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![
                (Some(100), "First unit here.".to_string()),
                (None, "Second unit here.".to_string()),
                (None, "Third unit here.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_partial_delivery_stops_at_failure() {
        let recorder = Recorder {
            fail_on: Some(1),
            ..Default::default()
        };
        let report =
            deliver_units(&recorder, &DeliveryTarget::new(9), &units(), Duration::ZERO).await;

        assert_eq!(report.delivered, 1);
        assert_eq!(report.total, 3);
        assert!(!report.is_complete());
        assert_eq!(report.failure.as_ref().map(|e| e.index), Some(1));
        assert_eq!(recorder.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inter_unit_delay() {
        let recorder = Recorder::default();
        let start = tokio::time::Instant::now();
        deliver_units(
            &recorder,
            &DeliveryTarget::new(1),
            &units(),
            Duration::from_millis(300),
        )
        .await;
        // Two pauses for three units
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(600));
        assert!(elapsed < Duration::from_millis(900));
    }

    #[test]
    fn test_empty_report() {
        let report = DeliveryReport::empty();
        assert!(report.is_complete());
        assert_eq!(report.into_result(), Ok(0));
    }
}
