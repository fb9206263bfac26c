use crate::domain::attempt::{AttemptState, StateTransitionResult, TransactionAttempt};
use crate::domain::classify::ClassifiedError;
use crate::domain::model::OperationKind;
use crate::foundation::{AttemptId, ContentDigest, IssuerId, LedgerError, TxReference};
use log::{info, warn};
use std::marker::PhantomData;

const VALID_TRANSITIONS: &[(AttemptState, AttemptState)] = &[
    (AttemptState::Idle, AttemptState::Hashing),
    // Writes without a document input skip hashing.
    (AttemptState::Idle, AttemptState::Submitting),
    (AttemptState::Hashing, AttemptState::Submitting),
    (AttemptState::Hashing, AttemptState::Failed),
    (AttemptState::Submitting, AttemptState::Confirming),
    (AttemptState::Submitting, AttemptState::Failed),
    (AttemptState::Confirming, AttemptState::Succeeded),
    (AttemptState::Confirming, AttemptState::Failed),
];

pub fn validate_transition(from: AttemptState, to: AttemptState) -> StateTransitionResult {
    if VALID_TRANSITIONS.contains(&(from, to)) {
        return StateTransitionResult { valid: true, from_state: from.to_string(), to_state: to.to_string(), transition_reason: None };
    }
    StateTransitionResult {
        valid: false,
        from_state: from.to_string(),
        to_state: to.to_string(),
        transition_reason: Some("not_allowed".to_string()),
    }
}

pub fn is_terminal(state: AttemptState) -> bool {
    matches!(state, AttemptState::Succeeded | AttemptState::Failed)
}

pub fn ensure_valid_transition(from: AttemptState, to: AttemptState) -> Result<(), LedgerError> {
    let transition = validate_transition(from, to);
    if transition.valid {
        Ok(())
    } else {
        Err(LedgerError::InvalidStateTransition { from: transition.from_state, to: transition.to_state })
    }
}

// Typestate wrappers for the attempt lifecycle
#[derive(Debug)]
pub struct Idle;
#[derive(Debug)]
pub struct Hashing;
#[derive(Debug)]
pub struct Submitting;
#[derive(Debug)]
pub struct Confirming;
#[derive(Debug)]
pub struct Succeeded;
#[derive(Debug)]
pub struct Failed;

#[derive(Clone, Debug)]
pub struct TypedAttempt<State> {
    inner: TransactionAttempt,
    _state: PhantomData<State>,
}

impl TypedAttempt<Idle> {
    pub fn new(attempt_id: AttemptId, kind: OperationKind) -> Result<Self, LedgerError> {
        if !kind.is_write() {
            return Err(LedgerError::ReadOnlyOperation { kind: kind.to_string() });
        }
        let inner = TransactionAttempt {
            attempt_id,
            kind,
            state: AttemptState::Idle,
            digest: None,
            remote_reference: None,
            issuer_id: None,
            error: None,
        };
        Ok(Self { inner, _state: PhantomData })
    }

    pub fn begin_hashing(self) -> Result<TypedAttempt<Hashing>, LedgerError> {
        transition(self.inner, AttemptState::Hashing, |_| {})
    }

    /// Skips hashing; only valid for writes that are not keyed by a digest.
    pub fn begin_submitting(self) -> Result<TypedAttempt<Submitting>, LedgerError> {
        if self.inner.kind.needs_digest() {
            return Err(LedgerError::InvalidStateTransition {
                from: format!("{} ({} requires a digest)", AttemptState::Idle, self.inner.kind),
                to: AttemptState::Submitting.to_string(),
            });
        }
        transition(self.inner, AttemptState::Submitting, |_| {})
    }
}

impl TypedAttempt<Hashing> {
    pub fn digest_ready(self, digest: ContentDigest) -> Result<TypedAttempt<Submitting>, LedgerError> {
        transition(self.inner, AttemptState::Submitting, |inner| inner.digest = Some(digest))
    }

    pub fn fail(self, error: ClassifiedError) -> Result<TypedAttempt<Failed>, LedgerError> {
        transition(self.inner, AttemptState::Failed, |inner| inner.error = Some(error))
    }
}

impl TypedAttempt<Submitting> {
    pub fn submitted(self, reference: TxReference) -> Result<TypedAttempt<Confirming>, LedgerError> {
        transition(self.inner, AttemptState::Confirming, |inner| inner.remote_reference = Some(reference))
    }

    pub fn fail(self, error: ClassifiedError) -> Result<TypedAttempt<Failed>, LedgerError> {
        transition(self.inner, AttemptState::Failed, |inner| inner.error = Some(error))
    }
}

impl TypedAttempt<Confirming> {
    pub fn succeed(self, issuer_id: Option<IssuerId>) -> Result<TypedAttempt<Succeeded>, LedgerError> {
        transition(self.inner, AttemptState::Succeeded, |inner| inner.issuer_id = issuer_id)
    }

    pub fn fail(self, error: ClassifiedError) -> Result<TypedAttempt<Failed>, LedgerError> {
        transition(self.inner, AttemptState::Failed, |inner| inner.error = Some(error))
    }
}

impl<State> TypedAttempt<State> {
    pub fn into_inner(self) -> TransactionAttempt {
        self.inner
    }

    pub fn as_inner(&self) -> &TransactionAttempt {
        &self.inner
    }
}

fn transition<TargetState>(
    mut inner: TransactionAttempt,
    next: AttemptState,
    apply: impl FnOnce(&mut TransactionAttempt),
) -> Result<TypedAttempt<TargetState>, LedgerError> {
    let from = inner.state;
    if let Err(err) = ensure_valid_transition(from, next) {
        warn!(
            "invalid attempt state transition attempt_id={} kind={} from_state={} to_state={} error={}",
            inner.attempt_id, inner.kind, from, next, err
        );
        return Err(err);
    }
    apply(&mut inner);
    inner.state = next;
    info!(
        "attempt state transition attempt_id={} kind={} from_state={} to_state={} digest={} reference={}",
        inner.attempt_id,
        inner.kind,
        from,
        inner.state,
        inner.digest.map(|d| d.to_hex()).unwrap_or_default(),
        inner.remote_reference.map(|r| r.to_hex()).unwrap_or_default()
    );
    Ok(TypedAttempt { inner, _state: PhantomData })
}
