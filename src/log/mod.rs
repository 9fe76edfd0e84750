//! Append-only audit log.
//!
//! The game appends a [`LogEvent`] for every transition. Outside the crate
//! the log is read-only: there is no way to remove, reorder or edit entries.

mod event;

use serde::{Deserialize, Serialize};

pub use event::{EventType, LogEvent};

/// Chronological list of events for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<LogEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: LogEvent) {
        self.events.push(event);
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[LogEvent] {
        &self.events
    }

    /// Iterate events, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, LogEvent> {
        self.events.iter()
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&LogEvent> {
        self.events.last()
    }

    /// Events of one type, oldest first.
    pub fn of_type(&self, event_type: EventType) -> impl Iterator<Item = &LogEvent> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }

    /// Events recorded after the first `from` entries.
    ///
    /// Lets a consumer poll for new entries by remembering `len()`.
    #[must_use]
    pub fn since(&self, from: usize) -> &[LogEvent] {
        self.events.get(from..).unwrap_or(&[])
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a LogEvent;
    type IntoIter = std::slice::Iter<'a, LogEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
