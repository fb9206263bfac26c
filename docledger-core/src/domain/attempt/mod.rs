//! Transaction attempts: one run of the submit/confirm state machine for a single user-triggered write.

pub mod results;
pub mod state_machine;

pub use results::StateTransitionResult;
pub use state_machine::{ensure_valid_transition, is_terminal, validate_transition, TypedAttempt};

use crate::domain::classify::ClassifiedError;
use crate::domain::model::OperationKind;
use crate::foundation::{AttemptId, ContentDigest, IssuerId, TxReference};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptState {
    Idle,
    Hashing,
    Submitting,
    Confirming,
    Succeeded,
    Failed,
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAttempt {
    pub attempt_id: AttemptId,
    pub kind: OperationKind,
    pub state: AttemptState,
    pub digest: Option<ContentDigest>,
    pub remote_reference: Option<TxReference>,
    /// Issuer id assigned by the registry, for `RegisterIssuer` attempts.
    pub issuer_id: Option<IssuerId>,
    pub error: Option<ClassifiedError>,
}

impl TransactionAttempt {
    pub fn is_terminal(&self) -> bool {
        is_terminal(self.state)
    }

    pub fn succeeded(&self) -> bool {
        self.state == AttemptState::Succeeded
    }
}
