//! SAX Event Types
//!
//! Owned form of the three structural events, for recording a scan and
//! replaying it later (or hand-building event sequences in tests).

use crate::core::ScanHandler;

/// A SAX parsing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaxEvent {
    /// Start of an element
    Open(String),
    /// Character data; one logical value may span several events
    Text(String),
    /// End of an element
    Close(String),
}

impl SaxEvent {
    pub fn open(name: impl Into<String>) -> Self {
        SaxEvent::Open(name.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        SaxEvent::Text(text.into())
    }

    pub fn close(name: impl Into<String>) -> Self {
        SaxEvent::Close(name.into())
    }

    /// Deliver this event to a handler
    pub fn dispatch<H: ScanHandler + ?Sized>(&self, handler: &mut H) {
        match self {
            SaxEvent::Open(name) => handler.start_element(name),
            SaxEvent::Text(text) => handler.text(text),
            SaxEvent::Close(name) => handler.end_element(name),
        }
    }
}

/// Deliver a sequence of events to a handler, in order
pub fn replay<'e, H, I>(events: I, handler: &mut H)
where
    H: ScanHandler + ?Sized,
    I: IntoIterator<Item = &'e SaxEvent>,
{
    for event in events {
        event.dispatch(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sax::EventCollector;

    #[test]
    fn test_replay_preserves_order() {
        let events = [
            SaxEvent::open("term"),
            SaxEvent::text("GO:"),
            SaxEvent::text("1"),
            SaxEvent::close("term"),
        ];
        let mut collector = EventCollector::new();
        replay(&events, &mut collector);
        assert_eq!(collector.events(), events);
    }
}
