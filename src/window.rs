//! Window types shared by every component.
//!
//! [`RootWindows`] is what the root-window query yields, [`WindowProperties`]
//! is what a per-window query yields, and [`WindowRecord`] is the cached,
//! timestamped form of the latter.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Active window and stacking order read from the root window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootWindows {
    /// Id of the window that currently has focus (empty if unknown).
    pub active: String,
    /// Window ids, most recently focused first.
    pub stacked: Vec<String>,
}

/// Properties of a single top-level window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowProperties {
    /// Value of `_NET_WM_PID`, empty if the window does not set it.
    pub process_id: String,
    /// `WM_CLASS` tokens in the order the window lists them.
    pub names: Vec<String>,
}

/// A resolved window as stored in the cache file.
///
/// Records are never edited in place; a refresh replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub window_id: String,
    pub names: Vec<String>,
    pub process_id: String,
    /// Unix seconds at which the window was queried.
    pub timestamp: i64,
}

impl WindowRecord {
    /// Build a record for `window_id` resolved at `timestamp`.
    pub fn new(window_id: impl Into<String>, props: WindowProperties, timestamp: i64) -> Self {
        Self {
            window_id: window_id.into(),
            names: props.names,
            process_id: props.process_id,
            timestamp,
        }
    }

    /// Whether the record is younger than `ttl` at time `now`.
    ///
    /// A record stamped in the future (clock stepped back) is stale.
    pub fn is_fresh(&self, now: i64, ttl: Duration) -> bool {
        let age = now.saturating_sub(self.timestamp);
        (0..=ttl.as_secs() as i64).contains(&age)
    }

    /// Whether this window belongs to `program`.
    ///
    /// Matches on an equal, non-empty process id, or on any class token that
    /// contains `program` (case-sensitive substring).
    pub fn belongs_to(&self, program: &str, process_id: &str) -> bool {
        if !process_id.is_empty() && self.process_id == process_id {
            return true;
        }
        self.names.iter().any(|name| name.contains(program))
    }
}

/// Current time in unix seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    fn record(pid: &str, names: &[&str], timestamp: i64) -> WindowRecord {
        WindowRecord {
            window_id: "0x1".into(),
            names: names.iter().map(|s| s.to_string()).collect(),
            process_id: pid.into(),
            timestamp,
        }
    }

    #[test]
    fn fresh_within_ttl() {
        let r = record("1", &[], 1_000);
        assert!(r.is_fresh(1_000, TTL));
        assert!(r.is_fresh(1_300, TTL));
        assert!(!r.is_fresh(1_301, TTL));
    }

    #[test]
    fn future_timestamp_is_stale() {
        let r = record("1", &[], 2_000);
        assert!(!r.is_fresh(1_999, TTL));
        assert!(!r.is_fresh(0, TTL));
    }

    #[test]
    fn matches_on_process_id() {
        let r = record("4242", &["Navigator", "firefox"], 0);
        assert!(r.belongs_to("chromium", "4242"));
        assert!(!r.belongs_to("chromium", "1"));
    }

    #[test]
    fn matches_on_class_substring() {
        let r = record("", &["xterm-256color", "XTerm"], 0);
        assert!(r.belongs_to("term", ""));
        assert!(r.belongs_to("XTerm", "99"));
    }

    #[test]
    fn class_match_is_case_sensitive() {
        let r = record("", &["Firefox"], 0);
        assert!(!r.belongs_to("firefox", ""));
    }

    #[test]
    fn empty_process_ids_do_not_match() {
        let r = record("", &["Alacritty"], 0);
        assert!(!r.belongs_to("kitty", ""));
    }

    #[test]
    fn record_serializes_with_expected_keys() {
        let r = record("7", &["a", "b"], 12);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["window_id"], "0x1");
        assert_eq!(json["process_id"], "7");
        assert_eq!(json["names"][1], "b");
        assert_eq!(json["timestamp"], 12);
    }
}
