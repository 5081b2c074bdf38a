//! Narrative log ("vox log") attached to every game state.
//!
//! Newest entries come first. The log holds at most
//! [`LOG_CAPACITY`](crate::constants::LOG_CAPACITY) entries; recording past
//! that evicts the oldest.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::{ERA_SUFFIX, LOG_CAPACITY};

/// Severity tag shown next to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Neutral,
    Danger,
    Success,
    Warp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique within one run's log.
    pub id: u64,
    /// Turn stamp, e.g. `"012.M42"`.
    pub timestamp: String,
    pub message: String,
    pub category: LogCategory,
}

/// Capped, append-only sequence of log entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Chronicle {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

/// Timestamp for a turn: zero-padded to three digits plus the era suffix.
pub fn stamp(turn: u32) -> String {
    format!("{:03}.{}", turn, ERA_SUFFIX)
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new entry at the front, stamped with `turn`.
    pub fn record(&mut self, turn: u32, message: impl Into<String>, category: LogCategory) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push_front(LogEntry {
            id,
            timestamp: stamp(turn),
            message: message.into(),
            category,
        });
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_back();
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_padding() {
        assert_eq!(stamp(0), "000.M42");
        assert_eq!(stamp(7), "007.M42");
        assert_eq!(stamp(123), "123.M42");
        assert_eq!(stamp(1234), "1234.M42");
    }

    #[test]
    fn test_newest_first() {
        let mut log = Chronicle::new();
        log.record(1, "first", LogCategory::Neutral);
        log.record(2, "second", LogCategory::Danger);
        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(log.latest().unwrap().timestamp, "002.M42");
    }

    #[test]
    fn test_capped_at_capacity() {
        let mut log = Chronicle::new();
        for i in 0..(LOG_CAPACITY as u32 + 25) {
            log.record(i, format!("entry {i}"), LogCategory::Neutral);
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        // Oldest surviving entry is the 26th recorded.
        assert_eq!(log.entries().last().unwrap().message, "entry 25");
    }

    #[test]
    fn test_ids_distinct() {
        let mut log = Chronicle::new();
        for _ in 0..10 {
            log.record(1, "same", LogCategory::Warp);
        }
        let mut ids: Vec<_> = log.entries().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
