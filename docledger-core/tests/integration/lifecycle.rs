use crate::fixtures::*;
use docledger_core::application::{DocumentSource, LedgerSession};
use docledger_core::domain::{ActivityKind, AttemptState, ErrorCategory};
use docledger_core::foundation::LedgerError;
use docledger_core::infrastructure::wallet::WalletSession;
use std::sync::Arc;
use std::time::Duration;

async fn wait_for_state(session: &LedgerSession, state: AttemptState) {
    for _ in 0..1_000 {
        if session.lifecycle().current().map(|attempt| attempt.state) == Some(state) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("attempt never reached {state}");
}

#[tokio::test]
async fn test_lifecycle_when_second_trigger_while_confirming_then_rejected_and_first_untouched() {
    let ledger = shared_ledger();
    let session = Arc::new(connected_session(&ledger, ALICE).await);
    ledger.pause_confirmations();

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.register_issuer(TEST_ISSUER_NAME, TEST_ISSUER_ORG, TEST_ISSUER_EMAIL).await })
    };
    wait_for_state(&session, AttemptState::Confirming).await;
    let in_flight = session.lifecycle().current().expect("in-flight attempt");
    assert!(session.lifecycle().is_busy());

    let err = session.store_document(test_document(), 0).await.unwrap_err();
    match err {
        LedgerError::AttemptInFlight { attempt_id, state } => {
            assert_eq!(attempt_id, in_flight.attempt_id.get());
            assert_eq!(state, "Confirming");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(session.lifecycle().current(), Some(in_flight.clone()));
    assert_eq!(ledger.pending_count(), 1);

    ledger.release_confirmations();
    let finished = first.await.expect("join").expect("register");
    assert_eq!(finished.attempt_id, in_flight.attempt_id);
    assert_eq!(finished.state, AttemptState::Succeeded);
    assert!(!session.lifecycle().is_busy());
    assert_eq!(session.issuers().len(), 1);
}

#[tokio::test]
async fn test_lifecycle_when_confirmation_never_arrives_then_stays_confirming() {
    let ledger = shared_ledger();
    let session = Arc::new(connected_session(&ledger, ALICE).await);
    session.register_issuer(TEST_ISSUER_NAME, "", "").await.expect("register");
    ledger.pause_confirmations();

    let mut pending = {
        let session = session.clone();
        tokio::spawn(async move { session.store_document(test_document(), 0).await })
    };
    wait_for_state(&session, AttemptState::Confirming).await;

    let waited = tokio::time::timeout(Duration::from_millis(50), &mut pending).await;
    assert!(waited.is_err(), "confirmation must not time out internally");
    assert_eq!(session.lifecycle().current().map(|a| a.state), Some(AttemptState::Confirming));
    assert!(session.lifecycle().is_busy());

    ledger.release_confirmations();
    let attempt = pending.await.expect("join").expect("store");
    assert_eq!(attempt.state, AttemptState::Succeeded);
}

#[tokio::test]
async fn test_lifecycle_when_no_signer_then_failed_at_submission_with_wallet_category() {
    let ledger = shared_ledger();
    let session = session_for(&ledger, ALICE);

    let attempt = session.store_document(test_document(), 0).await.expect("attempt");
    assert_eq!(attempt.state, AttemptState::Failed);
    assert!(attempt.digest.is_some(), "hashing completes before the signer check");
    assert!(attempt.remote_reference.is_none());
    assert_eq!(attempt.error.as_ref().map(|e| e.category), Some(ErrorCategory::WalletUnavailable));
    assert_eq!(ledger.pending_count(), 0);

    let errors = session.journal().errors().entries();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location, "storeDocument");
}

#[tokio::test]
async fn test_lifecycle_when_source_unreadable_then_failed_during_hashing() {
    let ledger = shared_ledger();
    let session = connected_session(&ledger, ALICE).await;
    let missing = tempfile::tempdir().expect("temp dir").path().join("missing.pdf");

    let attempt = session.delete_document(DocumentSource::file(missing)).await.expect("attempt");
    assert_eq!(attempt.state, AttemptState::Failed);
    assert!(attempt.digest.is_none());
    assert_eq!(attempt.error.as_ref().map(|e| e.category), Some(ErrorCategory::Generic));
    assert_eq!(ledger.pending_count(), 0);
}

#[tokio::test]
async fn test_lifecycle_when_register_name_empty_then_empty_issuer_name() {
    let ledger = shared_ledger();
    let session = connected_session(&ledger, ALICE).await;

    let attempt = session.register_issuer("", TEST_ISSUER_ORG, TEST_ISSUER_EMAIL).await.expect("attempt");
    assert_eq!(attempt.state, AttemptState::Failed);
    let error = attempt.error.expect("classified error");
    assert_eq!(error.category, ErrorCategory::EmptyIssuerName);
    assert_eq!(error.suggestion, ErrorCategory::EmptyIssuerName.suggestion());
    assert!(session.issuers().is_empty());
}

#[tokio::test]
async fn test_lifecycle_when_remote_unreachable_then_failed_and_session_still_usable() {
    let wallet = WalletSession::new(Some(Arc::new(docledger_core::infrastructure::wallet::StaticProvider::approving(ALICE))));
    let session = LedgerSession::new(Arc::new(UnreachableGateway), wallet);
    session.connect_wallet().await.expect("connect slot free").expect("connect");

    let first = session.register_issuer(TEST_ISSUER_NAME, "", "").await.expect("first attempt");
    let second = session.register_issuer(TEST_ISSUER_NAME, "", "").await.expect("second attempt");
    assert_eq!(first.state, AttemptState::Failed);
    assert_eq!(second.state, AttemptState::Failed);
    assert!(second.attempt_id > first.attempt_id);
    assert_eq!(first.error.as_ref().map(|e| e.category), Some(ErrorCategory::Generic));
    assert!(!session.lifecycle().is_busy());
}

#[tokio::test]
async fn test_lifecycle_when_terminal_then_one_journal_entry_per_outcome() {
    let ledger = shared_ledger();
    let session = connected_session(&ledger, ALICE).await;
    let issuer_id = session.register_issuer(TEST_ISSUER_NAME, TEST_ISSUER_ORG, "").await.expect("register").issuer_id.expect("id");
    let activity_before = session.journal().activity().len();

    session.store_document(test_document(), issuer_id).await.expect("store");
    session.store_document(test_document(), issuer_id).await.expect("duplicate");

    let activity = session.journal().activity().entries();
    assert_eq!(activity.len(), activity_before + 2);
    assert_eq!(activity[0].kind, ActivityKind::Error);
    assert!(activity[0].message.starts_with("storeDocument: "));
    assert_eq!(activity[1].kind, ActivityKind::Success);
    assert_eq!(activity[1].message, format!("Stored hash: {TEST_DOCUMENT_LABEL}"));

    let errors = session.journal().errors().entries();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error.category, ErrorCategory::DuplicateDocument);
}
