//! Session journal entries: user-facing activity history and classified error log.

use crate::domain::classify::ClassifiedError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Info => f.write_str("info"),
            ActivityKind::Success => f.write_str("success"),
            ActivityKind::Error => f.write_str("error"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub timestamp_ms: u64,
    pub kind: ActivityKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub timestamp_ms: u64,
    /// Operation that produced the error, e.g. `storeDocument`.
    pub location: String,
    pub error: ClassifiedError,
}

impl ErrorLogEntry {
    /// One-line form used for the activity entry that accompanies every error-log append.
    pub fn headline(&self) -> String {
        format!("{}: {}", self.location, self.error.message)
    }
}
