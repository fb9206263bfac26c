//! Normalized remote failure.
//!
//! Every failure coming out of the wallet or the contract gateway is converted into
//! [`LedgerFailure`] at that boundary, so classification works over a closed set of variants.

use crate::foundation::{ContentDigest, TxReference};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerFailure {
    /// The remote service rejected the call with a structured reason.
    #[error("rejected by ledger: {reason}")]
    Reverted { reason: String },

    #[error("no signing provider available")]
    WalletUnavailable,

    #[error("connection request rejected: {details}")]
    ConnectionRejected { details: String },

    #[error("no active signer identity; connect a wallet first")]
    MissingSigner,

    #[error("no record for digest {digest:#x}")]
    RecordMissing { digest: ContentDigest },

    #[error("document source unreadable: {details}")]
    Source { details: String },

    #[error("transport error during {operation}: {details}")]
    Transport { operation: String, details: String },

    #[error("transaction {reference:#x} finalized without success")]
    Dropped { reference: TxReference },
}

const REVERT_MARKERS: &[&str] = &["reverted with reason string '", "execution reverted: ", "revert: "];
const USER_REJECTION_MARKERS: &[&str] = &["user rejected", "user denied", "rejected the request"];

impl LedgerFailure {
    pub fn reverted(reason: impl Into<String>) -> Self {
        LedgerFailure::Reverted { reason: reason.into() }
    }

    pub fn transport(operation: impl Into<String>, details: impl Into<String>) -> Self {
        LedgerFailure::Transport { operation: operation.into(), details: details.into() }
    }

    pub fn source(details: impl Into<String>) -> Self {
        LedgerFailure::Source { details: details.into() }
    }

    /// Structured rejection reason, when the remote service provided one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            LedgerFailure::Reverted { reason } => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Normalizes a free-form node error message.
    ///
    /// Nodes embed the contract's reason inside their message text; when one of the known
    /// markers is present the reason is lifted out, otherwise the message is kept as transport detail.
    pub fn from_node_message(operation: &str, message: &str) -> Self {
        let lowered = message.to_ascii_lowercase();
        if USER_REJECTION_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            return LedgerFailure::ConnectionRejected { details: message.to_string() };
        }
        if let Some(reason) = extract_revert_reason(message) {
            return LedgerFailure::Reverted { reason };
        }
        LedgerFailure::transport(operation, message)
    }
}

fn extract_revert_reason(message: &str) -> Option<String> {
    for marker in REVERT_MARKERS {
        let Some(start) = message.find(marker) else {
            continue;
        };
        let rest = &message[start + marker.len()..];
        let reason =
            if marker.ends_with('\'') { rest.split('\'').next().unwrap_or(rest) } else { rest.lines().next().unwrap_or(rest) };
        let reason = reason.trim();
        if !reason.is_empty() {
            return Some(reason.to_string());
        }
    }
    None
}
