//! Shared network log store.
//!
//! Entries are appended in completion order and announced on a broadcast
//! channel so any number of viewers can follow along.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::entry::LogEntry;

/// Capacity of the broadcast channel feeding live viewers.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A change to the shared log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    /// A finished call was appended
    Recorded { entry: LogEntry },
    /// The log was emptied
    Cleared,
}

/// Type alias for the log event sender.
pub type LogEventSender = broadcast::Sender<LogEvent>;

/// Handle to the process-wide network log.
///
/// Clones share the same entries and the same broadcast channel.
#[derive(Debug, Clone)]
pub struct NetworkLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    events: LogEventSender,
    capacity: Option<usize>,
}

impl NetworkLog {
    /// An unbounded log.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            events,
            capacity: None,
        }
    }

    /// A log keeping at most `capacity` entries, evicting the oldest first.
    ///
    /// A capacity of zero means unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: (capacity > 0).then_some(capacity),
            ..Self::new()
        }
    }

    /// Maximum number of retained entries, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    // A panic while holding the lock cannot leave the deque half-updated, so
    // the poisoned data is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an entry and announce it. Having no subscribers is fine.
    ///
    /// The event is sent while the lock is held, so subscribers see events in
    /// storage order and never after a clear that wiped the entry.
    pub fn record(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if let Some(capacity) = self.capacity {
            while entries.len() >= capacity {
                entries.pop_front();
            }
        }
        entries.push_back(entry.clone());
        let _ = self.events.send(LogEvent::Recorded { entry });
    }

    /// Copy of all retained entries, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry and announce it.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.clear();
        let _ = self.events.send(LogEvent::Cleared);
    }

    /// Subscribe to future changes.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.events.subscribe()
    }

    /// Current entries plus a subscription starting right after them.
    ///
    /// Taken under one lock, so no event is both in the snapshot and in the
    /// receiver, and none falls between the two.
    pub fn subscribe_with_snapshot(&self) -> (Vec<LogEntry>, broadcast::Receiver<LogEvent>) {
        let entries = self.lock();
        let events = self.events.subscribe();
        (entries.iter().cloned().collect(), events)
    }

    /// The broadcast sender, for handing to servers that subscribe per client.
    pub fn sender(&self) -> LogEventSender {
        self.events.clone()
    }

    /// All retained entries as a pretty-printed JSON array.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        entries_to_json(&self.snapshot())
    }
}

impl Default for NetworkLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Pretty-print entries in the export document format.
pub fn entries_to_json(entries: &[LogEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::entry::{CallTiming, ErrorInfo};
    use chrono::Utc;

    fn entry(id: &str) -> LogEntry {
        let now = Utc::now();
        LogEntry::failed(
            CallTiming {
                id: id.to_string(),
                method: "GET".to_string(),
                url: "/tools".to_string(),
                started_at: now,
                finished_at: now,
                duration_ms: 3,
            },
            ErrorInfo {
                name: "ConnectionFailed".to_string(),
                message: "refused".to_string(),
                stack: None,
            },
            None,
        )
    }

    #[test]
    fn test_record_appends_in_order() {
        let log = NetworkLog::new();
        log.record(entry("a"));
        log.record(entry("b"));

        let ids: Vec<String> = log.snapshot().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_record_without_subscribers() {
        let log = NetworkLog::new();
        log.record(entry("a"));
        assert!(!log.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let log = NetworkLog::new();
        let other = log.clone();
        other.record(entry("a"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = NetworkLog::with_capacity(2);
        log.record(entry("a"));
        log.record(entry("b"));
        log.record(entry("c"));

        let ids: Vec<String> = log.snapshot().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let log = NetworkLog::with_capacity(0);
        assert_eq!(log.capacity(), None);
        for i in 0..5 {
            log.record(entry(&i.to_string()));
        }
        assert_eq!(log.len(), 5);
    }

    #[tokio::test]
    async fn test_subscribers_see_records_and_clear() {
        let log = NetworkLog::new();
        let mut rx = log.subscribe();

        log.record(entry("a"));
        log.clear();

        match rx.recv().await.unwrap() {
            LogEvent::Recorded { entry } => assert_eq!(entry.id, "a"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(rx.recv().await.unwrap(), LogEvent::Cleared);
        assert!(log.is_empty());
    }

    #[test]
    fn test_snapshot_and_subscription_do_not_overlap() {
        let log = NetworkLog::new();
        log.record(entry("a"));

        let (entries, mut rx) = log.subscribe_with_snapshot();
        log.record(entry("b"));

        assert_eq!(entries.len(), 1);
        match rx.try_recv().unwrap() {
            LogEvent::Recorded { entry } => assert_eq!(entry.id, "b"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_export_json_is_pretty_array() {
        let log = NetworkLog::new();
        log.record(entry("a"));

        let json = log.export_json().unwrap();
        assert!(json.starts_with("[\n"));
        let parsed: Vec<LogEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].id, "a");
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(LogEvent::Cleared).unwrap();
        assert_eq!(json, serde_json::json!({"type": "cleared"}));

        let json = serde_json::to_value(LogEvent::Recorded { entry: entry("a") }).unwrap();
        assert_eq!(json["type"], "recorded");
        assert_eq!(json["entry"]["id"], "a");
    }
}
