//! Registry configuration.

use serde::Deserialize;

/// Configuration for the note registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Keep emitted events in an in-memory journal readable via
    /// [`Notes::events`](crate::Notes::events).
    pub record_events: bool,
    /// Bound on the journal and on the broadcast channel handed out by
    /// `subscribe`. The journal drops its oldest entry once full; slow
    /// subscribers that fall further behind than this lose events.
    pub event_capacity: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            record_events: true,
            event_capacity: 256,
        }
    }
}

impl NotesConfig {
    /// Enable or disable the event journal.
    pub fn with_record_events(mut self, enabled: bool) -> Self {
        self.record_events = enabled;
        self
    }

    /// Set the journal and broadcast capacity. Clamped to at least 1.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }
}
