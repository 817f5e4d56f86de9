//! Delivery channel writing units through an output formatter

use crate::output::{OutputFormatter, Segment};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use tlumach_core::DeliveryUnit;
use tlumach_engine::{Deliverer, DeliveryError, DeliveryTarget};

/// Delivers units to stdout or a file
///
/// The conversation id of a target indexes into `sources`, naming the input
/// the units belong to.
pub struct ConsoleDeliverer {
    formatter: Mutex<Box<dyn OutputFormatter>>,
    sources: Vec<String>,
}

impl ConsoleDeliverer {
    /// Create a deliverer for inputs named `sources`
    pub fn new(formatter: Box<dyn OutputFormatter>, sources: Vec<String>) -> Self {
        Self {
            formatter: Mutex::new(formatter),
            sources,
        }
    }

    /// Flush the formatter
    pub fn finish(&self) -> Result<()> {
        self.formatter
            .lock()
            .map_err(|_| anyhow!("output formatter lock poisoned"))?
            .finish()
    }

    fn source_name(&self, target: &DeliveryTarget) -> &str {
        usize::try_from(target.conversation)
            .ok()
            .and_then(|index| self.sources.get(index))
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }
}

#[async_trait]
impl Deliverer for ConsoleDeliverer {
    async fn deliver(
        &self,
        target: &DeliveryTarget,
        unit: &DeliveryUnit,
    ) -> Result<(), DeliveryError> {
        let segment = Segment::from_unit(self.source_name(target), unit);
        let mut formatter = self
            .formatter
            .lock()
            .map_err(|_| DeliveryError::new(unit.index, "output formatter lock poisoned"))?;
        formatter
            .write_segment(&segment)
            .map_err(|e| DeliveryError::new(unit.index, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::JsonFormatter;
    use std::io::Write;
    use std::sync::Arc;
    use tlumach_core::split_for_delivery;
    use tlumach_engine::deliver_units;

    /// Shared buffer so the test can read what the formatter wrote
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_units_reach_the_formatter() {
        let buffer = SharedBuffer::default();
        let deliverer = ConsoleDeliverer::new(
            Box::new(JsonFormatter::new(buffer.clone())),
            vec!["greeting.txt".to_string()],
        );

        let units = split_for_delivery("First part. Second part.", 12);
        let report = deliver_units(
            &deliverer,
            &DeliveryTarget::new(0),
            &units,
            std::time::Duration::ZERO,
        )
        .await;
        assert!(report.is_complete());
        deliverer.finish().unwrap();

        let written = buffer.0.lock().unwrap().clone();
        let segments: Vec<Segment> = serde_json::from_slice(&written).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].source, "greeting.txt");
        assert_eq!(segments[1].text, "Second part.");
    }
}
