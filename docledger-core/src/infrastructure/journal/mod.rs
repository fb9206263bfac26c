//! Session journal sinks.
//!
//! Both logs are append-only, newest first, unbounded for the life of the session and never
//! deduplicated. Every append is mirrored to the `log` facade under [`JOURNAL_TARGET`].

use crate::domain::{ActivityEvent, ActivityKind, ClassifiedError, ErrorLogEntry};
use crate::foundation::util::time::now_millis;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const JOURNAL_TARGET: &str = "docledger::journal";

#[derive(Default)]
pub struct ActivityLog {
    entries: Mutex<VecDeque<ActivityEvent>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, kind: ActivityKind, message: impl Into<String>) -> ActivityEvent {
        let event = ActivityEvent { timestamp_ms: now_millis(), kind, message: message.into() };
        match kind {
            ActivityKind::Error => log::warn!(target: JOURNAL_TARGET, "[{}] {}", kind, event.message),
            _ => log::info!(target: JOURNAL_TARGET, "[{}] {}", kind, event.message),
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push_front(event.clone());
        }
        event
    }

    /// Newest first.
    pub fn entries(&self) -> Vec<ActivityEvent> {
        self.entries.lock().map(|entries| entries.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
pub struct ErrorLog {
    entries: Mutex<VecDeque<ErrorLogEntry>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, location: impl Into<String>, error: ClassifiedError) -> ErrorLogEntry {
        let entry = ErrorLogEntry { timestamp_ms: now_millis(), location: location.into(), error };
        log::warn!(
            target: JOURNAL_TARGET,
            "error location={} category={} message={} suggestion={}",
            entry.location,
            entry.error.category,
            entry.error.message,
            entry.error.suggestion
        );
        if let Ok(mut entries) = self.entries.lock() {
            entries.push_front(entry.clone());
        }
        entry
    }

    /// Newest first.
    pub fn entries(&self) -> Vec<ErrorLogEntry> {
        self.entries.lock().map(|entries| entries.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Activity history and error log of one session.
#[derive(Default)]
pub struct Journal {
    activity: ActivityLog,
    errors: ErrorLog,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_info(&self, message: impl Into<String>) {
        self.activity.append(ActivityKind::Info, message);
    }

    pub fn record_success(&self, message: impl Into<String>) {
        self.activity.append(ActivityKind::Success, message);
    }

    /// Appends one error-log entry and its accompanying activity entry.
    pub fn record_failure(&self, location: &str, error: &ClassifiedError) {
        let entry = self.errors.append(location, error.clone());
        self.activity.append(ActivityKind::Error, entry.headline());
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }
}
