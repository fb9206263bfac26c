use docledger_core::domain::{classify, ErrorCategory, LedgerFailure, OperationKind};
use docledger_core::foundation::constants::*;
use docledger_core::foundation::ContentDigest;

#[test]
fn test_classify_when_node_message_carries_reason_then_category_matches() {
    let cases = [
        ("execution reverted: Empty name", OperationKind::RegisterIssuer, ErrorCategory::EmptyIssuerName),
        ("reverted with reason string 'Already stored'", OperationKind::StoreDocument, ErrorCategory::DuplicateDocument),
        ("execution reverted: Not document owner", OperationKind::DeleteDocument, ErrorCategory::NotDocumentOwner),
        ("execution reverted: Document does not exist", OperationKind::DeleteDocument, ErrorCategory::DocumentNotFound),
    ];
    for (message, kind, expected) in cases {
        let failure = LedgerFailure::from_node_message(kind.location(), message);
        assert_eq!(classify(&failure, kind).category, expected, "message={message}");
    }
}

#[test]
fn test_classify_when_every_failure_variant_then_never_panics() {
    let failures = [
        LedgerFailure::reverted("unexpected"),
        LedgerFailure::WalletUnavailable,
        LedgerFailure::ConnectionRejected { details: "no".to_string() },
        LedgerFailure::MissingSigner,
        LedgerFailure::RecordMissing { digest: ContentDigest::default() },
        LedgerFailure::source("gone"),
        LedgerFailure::transport("op", "timeout"),
        LedgerFailure::Dropped { reference: Default::default() },
    ];
    let kinds =
        [OperationKind::RegisterIssuer, OperationKind::StoreDocument, OperationKind::VerifyDocument, OperationKind::DeleteDocument];
    for failure in &failures {
        for kind in kinds {
            let classified = classify(failure, kind);
            assert!(!classified.message.is_empty());
            assert_eq!(classified.suggestion, classified.category.suggestion());
        }
    }
}

#[test]
fn test_classify_when_dropped_then_generic_with_diagnostic_suggestion() {
    let classified = classify(&LedgerFailure::Dropped { reference: Default::default() }, OperationKind::StoreDocument);
    assert_eq!(classified.category, ErrorCategory::Generic);
    assert_eq!(classified.suggestion, SUGGEST_GENERIC);
}

#[test]
fn test_classify_when_empty_name_on_store_then_generic() {
    let classified = classify(&LedgerFailure::reverted(REASON_EMPTY_NAME), OperationKind::StoreDocument);
    assert_eq!(classified.category, ErrorCategory::Generic);
}
