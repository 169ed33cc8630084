//! Streaming Extraction Engine
//!
//! A state machine over open/text/close events that keeps one record's
//! scratch state and the maxima table, and nothing else. Memory use does not
//! depend on how many records the document holds.
//!
//! The current tag is tracked flat, not as a stack: closing a child does not
//! restore the parent's tag, so text following a nested close is attributed
//! to the last opened element. Whitespace between fields therefore lands in
//! the previous field and is removed by trimming when the record closes.

use tracing::{debug, trace};

use super::record::{Field, TermAccumulator};
use super::table::MaximaTable;
use crate::config::ExtractConfig;
use crate::core::ScanHandler;
use crate::sax::{replay, SaxEvent};

/// Whether the engine is between a record's open and close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    InRecord,
}

/// What the most recently opened element is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentTag {
    None,
    Field(Field),
    Marker,
    Other,
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Record elements opened
    pub records_seen: u64,
    /// Records whose category resolved and were offered to the table
    pub records_folded: u64,
    /// Records with an empty or unknown category
    pub records_rejected: u64,
    /// Times a table entry was replaced
    pub table_updates: u64,
}

/// Result of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub table: MaximaTable,
    pub stats: RunStats,
}

pub struct StreamingExtractor {
    config: ExtractConfig,
    state: EngineState,
    /// Open record elements; records may nest
    record_depth: usize,
    current: CurrentTag,
    record: TermAccumulator,
    table: MaximaTable,
    stats: RunStats,
}

impl StreamingExtractor {
    pub fn new(config: &ExtractConfig) -> Self {
        StreamingExtractor {
            config: config.clone(),
            state: EngineState::Idle,
            record_depth: 0,
            current: CurrentTag::None,
            record: TermAccumulator::new(),
            table: MaximaTable::new(),
            stats: RunStats::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn current_tag(&self) -> CurrentTag {
        self.current
    }

    /// Maxima folded in so far
    pub fn table(&self) -> &MaximaTable {
        &self.table
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn on_open(&mut self, tag: &str) {
        self.current = self.classify(tag);

        if tag == self.config.record_tag {
            self.state = EngineState::InRecord;
            self.record_depth += 1;
            self.record.reset();
            self.stats.records_seen += 1;
        } else if self.current == CurrentTag::Marker && self.state == EngineState::InRecord {
            self.record.count_parent();
        }
    }

    pub fn on_text(&mut self, text: &str) {
        if self.state != EngineState::InRecord {
            return;
        }
        if let CurrentTag::Field(field) = self.current {
            self.record.append(field, text);
        }
    }

    pub fn on_close(&mut self, tag: &str) {
        if tag == self.config.record_tag {
            self.fold_record();
            self.record.reset();
            self.record_depth = self.record_depth.saturating_sub(1);
            if self.record_depth == 0 {
                self.state = EngineState::Idle;
            }
        }
    }

    /// Consume the engine, yielding the final table
    pub fn finish(self) -> Extraction {
        Extraction {
            table: self.table,
            stats: self.stats,
        }
    }

    fn classify(&self, tag: &str) -> CurrentTag {
        if tag == self.config.marker_tag {
            CurrentTag::Marker
        } else if let Some(field) = self.config.field_for(tag) {
            CurrentTag::Field(field)
        } else {
            CurrentTag::Other
        }
    }

    /// Offer the finished record to the table; a bad record is logged and dropped
    fn fold_record(&mut self) {
        match self.record.candidate() {
            Ok((category, best)) => {
                self.stats.records_folded += 1;
                if best.name.is_empty() || best.identifier.is_empty() {
                    trace!(%category, "record without name or id");
                }
                let parent_count = best.parent_count;
                if self.table.fold(category, best) {
                    self.stats.table_updates += 1;
                    trace!(%category, parent_count, "new maximum");
                }
            }
            Err(err) => {
                self.stats.records_rejected += 1;
                debug!(
                    %err,
                    record = self.stats.records_seen,
                    id = self.record.field(Field::Id).trim(),
                    parents = self.record.parent_count(),
                    "record skipped"
                );
            }
        }
    }
}

impl ScanHandler for StreamingExtractor {
    fn start_element(&mut self, name: &str) {
        self.on_open(name);
    }

    fn text(&mut self, text: &str) {
        self.on_text(text);
    }

    fn end_element(&mut self, name: &str) {
        self.on_close(name);
    }
}

/// Run the engine over an already materialised event sequence
pub fn extract_events<'e, I>(events: I, config: &ExtractConfig) -> Extraction
where
    I: IntoIterator<Item = &'e SaxEvent>,
{
    let mut engine = StreamingExtractor::new(config);
    replay(events, &mut engine);
    engine.finish()
}
