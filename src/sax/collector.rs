//! SAX Collector
//!
//! Implements ScanHandler to record every event of a scan.

use super::events::SaxEvent;
use crate::core::ScanHandler;

/// Collector that gathers SAX events during scanning
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<SaxEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the collected events as a slice
    pub fn events(&self) -> &[SaxEvent] {
        &self.events
    }

    /// Events with runs of adjacent text merged into one
    ///
    /// Two scans of the same document agree on this form no matter how the
    /// input was chunked.
    pub fn coalesced(&self) -> Vec<SaxEvent> {
        let mut merged: Vec<SaxEvent> = Vec::with_capacity(self.events.len());
        for event in &self.events {
            if let SaxEvent::Text(text) = event {
                if let Some(SaxEvent::Text(prev)) = merged.last_mut() {
                    prev.push_str(text);
                    continue;
                }
            }
            merged.push(event.clone());
        }
        merged
    }
}

impl ScanHandler for EventCollector {
    fn start_element(&mut self, name: &str) {
        self.events.push(SaxEvent::open(name));
    }

    fn text(&mut self, text: &str) {
        self.events.push(SaxEvent::text(text));
    }

    fn end_element(&mut self, name: &str) {
        self.events.push(SaxEvent::close(name));
    }
}
