//! Orchestration of one user-triggered ledger write.
//!
//! Each call to [`TransactionLifecycle::execute`] runs a fresh attempt through
//! `Idle -> [Hashing] -> Submitting -> Confirming -> Succeeded | Failed`. Only one attempt
//! may be non-terminal per session; a second trigger is turned away without touching it.
//!
//! Remote failures never escape as errors: they are classified and end the attempt in
//! `Failed`. `Err` is reserved for session misuse.

use crate::application::issuer_cache::IssuerCache;
use crate::application::observer::{LifecycleObserver, NoopObserver};
use crate::application::source::DocumentSource;
use crate::domain::attempt::state_machine::{Failed, Idle, Submitting, TypedAttempt};
use crate::domain::{classify, classify_session, AttemptState, LedgerFailure, OperationKind, TransactionAttempt, WriteCall};
use crate::foundation::util::guard::SlotGuard;
use crate::foundation::{AttemptId, ContentDigest, IssuerId, LedgerError};
use crate::infrastructure::gateway::ContractGateway;
use crate::infrastructure::wallet::WalletSession;
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
pub enum WriteRequest {
    RegisterIssuer { name: String, organization: String, email: String },
    StoreDocument { source: DocumentSource, issuer_id: IssuerId },
    DeleteDocument { source: DocumentSource },
}

impl WriteRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            WriteRequest::RegisterIssuer { .. } => OperationKind::RegisterIssuer,
            WriteRequest::StoreDocument { .. } => OperationKind::StoreDocument,
            WriteRequest::DeleteDocument { .. } => OperationKind::DeleteDocument,
        }
    }

    fn success_summary(&self) -> String {
        match self {
            WriteRequest::RegisterIssuer { name, organization, .. } => format!("Registered issuer: {} ({})", name, organization),
            WriteRequest::StoreDocument { source, .. } => format!("Stored hash: {}", source.label()),
            WriteRequest::DeleteDocument { source } => format!("Deleted document: {}", source.label()),
        }
    }
}

enum Hashed {
    Ready(TypedAttempt<Submitting>, ContentDigest),
    Failed(TransactionAttempt),
}

pub struct TransactionLifecycle {
    gateway: Arc<dyn ContractGateway>,
    wallet: Arc<WalletSession>,
    issuers: Arc<IssuerCache>,
    observer: Arc<dyn LifecycleObserver>,
    busy: AtomicBool,
    current: Mutex<Option<TransactionAttempt>>,
    next_id: AtomicU64,
}

impl TransactionLifecycle {
    pub fn new(gateway: Arc<dyn ContractGateway>, wallet: Arc<WalletSession>, issuers: Arc<IssuerCache>) -> Self {
        Self::with_observer(gateway, wallet, issuers, Arc::new(NoopObserver))
    }

    pub fn with_observer(
        gateway: Arc<dyn ContractGateway>,
        wallet: Arc<WalletSession>,
        issuers: Arc<IssuerCache>,
        observer: Arc<dyn LifecycleObserver>,
    ) -> Self {
        Self {
            gateway,
            wallet,
            issuers,
            observer,
            busy: AtomicBool::new(false),
            current: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }
    }

    /// Whether an attempt is currently non-terminal.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Snapshot of the latest attempt (in flight or terminal).
    pub fn current(&self) -> Option<TransactionAttempt> {
        self.current.lock().ok().and_then(|current| current.clone())
    }

    pub async fn execute(&self, request: WriteRequest) -> Result<TransactionAttempt, LedgerError> {
        let Some(_slot) = SlotGuard::try_acquire(&self.busy) else {
            let (attempt_id, state) = self
                .current()
                .map(|attempt| (attempt.attempt_id.get(), attempt.state.to_string()))
                .unwrap_or((0, "unknown".to_string()));
            warn!(
                "attempt rejected; another is in flight kind={} in_flight_attempt_id={} state={}",
                request.kind(),
                attempt_id,
                state
            );
            return Err(LedgerError::AttemptInFlight { attempt_id, state });
        };

        let kind = request.kind();
        let summary = request.success_summary();
        let attempt_id = AttemptId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let idle = TypedAttempt::<Idle>::new(attempt_id, kind)?;
        self.publish(idle.as_inner());
        self.observer.on_attempt_started(idle.as_inner());

        let (submitting, call) = match request {
            WriteRequest::RegisterIssuer { name, organization, email } => {
                let submitting = idle.begin_submitting()?;
                self.track(submitting.as_inner(), AttemptState::Idle);
                (submitting, WriteCall::RegisterIssuer { name, organization, email })
            }
            WriteRequest::StoreDocument { source, issuer_id } => match self.hash(idle, &source).await? {
                Hashed::Ready(submitting, digest) => (submitting, WriteCall::StoreDocument { digest, issuer_id }),
                Hashed::Failed(attempt) => return Ok(attempt),
            },
            WriteRequest::DeleteDocument { source } => match self.hash(idle, &source).await? {
                Hashed::Ready(submitting, digest) => (submitting, WriteCall::DeleteDocument { digest }),
                Hashed::Failed(attempt) => return Ok(attempt),
            },
        };

        let Some(signer) = self.wallet.current_signer() else {
            return self.fail(submitting.fail(classify(&LedgerFailure::MissingSigner, kind))?, AttemptState::Submitting);
        };

        let pending = match self.gateway.submit(&signer, call).await {
            Ok(pending) => pending,
            Err(failure) => return self.fail(submitting.fail(classify(&failure, kind))?, AttemptState::Submitting),
        };
        let confirming = submitting.submitted(pending.reference)?;
        self.track(confirming.as_inner(), AttemptState::Submitting);

        let receipt = match self.gateway.confirm(&pending).await {
            Ok(receipt) => receipt,
            Err(failure) => return self.fail(confirming.fail(classify(&failure, kind))?, AttemptState::Confirming),
        };

        if kind == OperationKind::RegisterIssuer {
            // The cache must reflect the new issuer before success is reported.
            if let Err(failure) = self.issuers.refresh(self.gateway.as_ref()).await {
                warn!("issuer cache refresh after registration failed: {}", failure);
                self.observer.on_refresh_failed(&classify_session(&failure));
            }
        }

        let succeeded = confirming.succeed(receipt.issuer_id.or(pending.expected_issuer_id))?;
        let attempt = succeeded.into_inner();
        self.track(&attempt, AttemptState::Confirming);
        self.observer.on_succeeded(&attempt, &summary);
        Ok(attempt)
    }

    async fn hash(&self, idle: TypedAttempt<Idle>, source: &DocumentSource) -> Result<Hashed, LedgerError> {
        let kind = idle.as_inner().kind;
        let hashing = idle.begin_hashing()?;
        self.track(hashing.as_inner(), AttemptState::Idle);
        match source.compute_digest().await {
            Ok(digest) => {
                debug!("document hashed label={} digest={:#x}", source.label(), digest);
                let submitting = hashing.digest_ready(digest)?;
                self.track(submitting.as_inner(), AttemptState::Hashing);
                Ok(Hashed::Ready(submitting, digest))
            }
            Err(failure) => {
                let failed = hashing.fail(classify(&failure, kind))?;
                Ok(Hashed::Failed(self.fail(failed, AttemptState::Hashing)?))
            }
        }
    }

    fn fail(&self, failed: TypedAttempt<Failed>, from: AttemptState) -> Result<TransactionAttempt, LedgerError> {
        let attempt = failed.into_inner();
        self.track(&attempt, from);
        if let Some(error) = attempt.error.as_ref() {
            self.observer.on_failed(&attempt, error);
        }
        Ok(attempt)
    }

    fn track(&self, attempt: &TransactionAttempt, from: AttemptState) {
        self.publish(attempt);
        self.observer.on_state_changed(attempt, from);
    }

    fn publish(&self, attempt: &TransactionAttempt) {
        if let Ok(mut current) = self.current.lock() {
            *current = Some(attempt.clone());
        }
    }
}
