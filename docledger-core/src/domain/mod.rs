//! Domain layer: pure document-ledger logic with no I/O.

pub mod attempt;
pub mod classify;
pub mod failure;
pub mod hashes;
pub mod journal;
pub mod model;

pub use attempt::{AttemptState, TransactionAttempt};
pub use classify::{classify, classify_session, ClassifiedError, ErrorCategory};
pub use failure::LedgerFailure;
pub use journal::{ActivityEvent, ActivityKind, ErrorLogEntry};
pub use model::*;
