//! Session journal: the in-memory event log.
//!
//! RULE: Only the engine appends. Entries carry the event as JSON so a
//! replay or a determinism check compares exactly what a UI would see.
//! The journal lives and dies with the session; nothing is written out.

use crate::{
    error::ForgeResult,
    event::ForgeEvent,
    types::{Month, SessionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub seq:        u64,
    pub session_id: SessionId,
    pub month:      Month,
    pub source:     String,
    pub event_type: String,
    pub payload:    String, // JSON-serialized ForgeEvent
}

#[derive(Debug, Clone, Default)]
pub struct SessionJournal {
    entries: Vec<JournalEntry>,
}

impl SessionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        session_id: &str,
        month: Month,
        event: &ForgeEvent,
    ) -> ForgeResult<()> {
        let entry = JournalEntry {
            seq:        self.entries.len() as u64,
            session_id: session_id.to_string(),
            month,
            source:     event.source().to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn events_for_month(&self, month: Month) -> Vec<&JournalEntry> {
        self.entries.iter().filter(|e| e.month == month).collect()
    }

    pub fn count_of(&self, event_type: &str) -> usize {
        self.entries.iter().filter(|e| e.event_type == event_type).count()
    }

    /// Decode every payload back into events, in append order.
    pub fn replay(&self) -> ForgeResult<Vec<ForgeEvent>> {
        self.entries
            .iter()
            .map(|e| serde_json::from_str(&e.payload).map_err(Into::into))
            .collect()
    }
}
