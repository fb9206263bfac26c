//! Error classification.
//!
//! Maps a normalized [`LedgerFailure`] plus the operation that produced it onto a
//! user-actionable category. The mapping is total: anything unrecognized is `Generic`.

use crate::domain::failure::LedgerFailure;
use crate::domain::model::OperationKind;
use crate::foundation::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    EmptyIssuerName,
    DuplicateDocument,
    NotDocumentOwner,
    DocumentNotFound,
    WalletUnavailable,
    ConnectionRejected,
    Generic,
}

impl ErrorCategory {
    pub const fn suggestion(&self) -> &'static str {
        match self {
            ErrorCategory::EmptyIssuerName => SUGGEST_EMPTY_ISSUER_NAME,
            ErrorCategory::DuplicateDocument => SUGGEST_DUPLICATE_DOCUMENT,
            ErrorCategory::NotDocumentOwner => SUGGEST_NOT_DOCUMENT_OWNER,
            ErrorCategory::DocumentNotFound => SUGGEST_DOCUMENT_NOT_FOUND,
            ErrorCategory::WalletUnavailable => SUGGEST_WALLET_UNAVAILABLE,
            ErrorCategory::ConnectionRejected => SUGGEST_CONNECTION_REJECTED,
            ErrorCategory::Generic => SUGGEST_GENERIC,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    pub message: String,
    pub suggestion: String,
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.category, self.message, self.suggestion)
    }
}

impl std::error::Error for ClassifiedError {}

pub fn classify(failure: &LedgerFailure, kind: OperationKind) -> ClassifiedError {
    classified(failure, categorize(failure, Some(kind)))
}

/// Classification for failures raised outside any ledger operation (wallet connect, issuer reload).
///
/// Only the wallet categories apply; everything else is `Generic`.
pub fn classify_session(failure: &LedgerFailure) -> ClassifiedError {
    classified(failure, categorize(failure, None))
}

fn classified(failure: &LedgerFailure, category: ErrorCategory) -> ClassifiedError {
    ClassifiedError { category, message: failure.to_string(), suggestion: category.suggestion().to_string() }
}

fn categorize(failure: &LedgerFailure, kind: Option<OperationKind>) -> ErrorCategory {
    match failure {
        LedgerFailure::WalletUnavailable | LedgerFailure::MissingSigner => return ErrorCategory::WalletUnavailable,
        LedgerFailure::ConnectionRejected { .. } => return ErrorCategory::ConnectionRejected,
        LedgerFailure::RecordMissing { .. } if matches!(kind, Some(OperationKind::DeleteDocument | OperationKind::VerifyDocument)) => {
            return ErrorCategory::DocumentNotFound;
        }
        _ => {}
    }
    let Some(kind) = kind else {
        return ErrorCategory::Generic;
    };

    // Structured reason first; fall back to the whole message text.
    let rendered;
    let text = match failure.reason() {
        Some(reason) => reason,
        None => {
            rendered = failure.to_string();
            rendered.as_str()
        }
    };

    match kind {
        OperationKind::RegisterIssuer if text.contains(REASON_EMPTY_NAME) => ErrorCategory::EmptyIssuerName,
        OperationKind::StoreDocument if text.contains(REASON_ALREADY_STORED) => ErrorCategory::DuplicateDocument,
        OperationKind::DeleteDocument if text.contains(REASON_NOT_DOCUMENT_OWNER) => ErrorCategory::NotDocumentOwner,
        OperationKind::DeleteDocument | OperationKind::VerifyDocument if text.contains(REASON_DOCUMENT_MISSING) => {
            ErrorCategory::DocumentNotFound
        }
        _ => ErrorCategory::Generic,
    }
}
