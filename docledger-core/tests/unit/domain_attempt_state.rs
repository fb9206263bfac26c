use docledger_core::domain::attempt::state_machine::{Idle, TypedAttempt};
use docledger_core::domain::attempt::{ensure_valid_transition, is_terminal, validate_transition};
use docledger_core::domain::{classify, AttemptState, LedgerFailure, OperationKind};
use docledger_core::foundation::{AttemptId, ContentDigest, LedgerError, TxReference};

#[test]
fn test_attempt_when_full_store_path_then_reaches_succeeded() {
    let attempt = TypedAttempt::<Idle>::new(AttemptId::new(1), OperationKind::StoreDocument).expect("new");
    let digest = ContentDigest::new([3u8; 32]);
    let reference = TxReference::new([4u8; 32]);

    let done = attempt
        .begin_hashing()
        .and_then(|a| a.digest_ready(digest))
        .and_then(|a| a.submitted(reference))
        .and_then(|a| a.succeed(None))
        .expect("transitions")
        .into_inner();

    assert_eq!(done.state, AttemptState::Succeeded);
    assert_eq!(done.digest, Some(digest));
    assert_eq!(done.remote_reference, Some(reference));
    assert!(done.is_terminal());
    assert!(done.error.is_none());
}

#[test]
fn test_attempt_when_register_then_skips_hashing() {
    let attempt = TypedAttempt::<Idle>::new(AttemptId::new(2), OperationKind::RegisterIssuer).expect("new");
    let submitting = attempt.begin_submitting().expect("submitting");
    assert_eq!(submitting.as_inner().state, AttemptState::Submitting);
}

#[test]
fn test_attempt_when_digest_keyed_write_skips_hashing_then_rejected() {
    let attempt = TypedAttempt::<Idle>::new(AttemptId::new(3), OperationKind::DeleteDocument).expect("new");
    let err = attempt.begin_submitting().unwrap_err();
    assert!(matches!(err, LedgerError::InvalidStateTransition { .. }));
}

#[test]
fn test_attempt_when_verify_then_read_only_error() {
    let err = TypedAttempt::<Idle>::new(AttemptId::new(4), OperationKind::VerifyDocument).unwrap_err();
    assert!(matches!(err, LedgerError::ReadOnlyOperation { .. }));
}

#[test]
fn test_attempt_when_submission_rejected_then_failed_with_error() {
    let attempt = TypedAttempt::<Idle>::new(AttemptId::new(5), OperationKind::RegisterIssuer).expect("new");
    let error = classify(&LedgerFailure::MissingSigner, OperationKind::RegisterIssuer);
    let failed = attempt.begin_submitting().and_then(|a| a.fail(error.clone())).expect("fail").into_inner();
    assert_eq!(failed.state, AttemptState::Failed);
    assert_eq!(failed.error, Some(error));
    assert!(failed.remote_reference.is_none());
}

#[test]
fn test_transition_table_when_backwards_or_out_of_terminal_then_invalid() {
    assert!(!validate_transition(AttemptState::Hashing, AttemptState::Confirming).valid);
    assert!(ensure_valid_transition(AttemptState::Confirming, AttemptState::Submitting).is_err());
    assert!(ensure_valid_transition(AttemptState::Succeeded, AttemptState::Idle).is_err());
    assert!(ensure_valid_transition(AttemptState::Failed, AttemptState::Hashing).is_err());
    assert!(ensure_valid_transition(AttemptState::Confirming, AttemptState::Failed).is_ok());
    assert!(is_terminal(AttemptState::Failed));
    assert!(!is_terminal(AttemptState::Confirming));
}
