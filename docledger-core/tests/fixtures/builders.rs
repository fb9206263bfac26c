#![allow(dead_code)]

use crate::fixtures::constants::*;
use async_trait::async_trait;
use docledger_core::application::{DocumentSource, LedgerSession};
use docledger_core::domain::{DocumentRecord, Issuer, LedgerFailure, PendingWrite, WriteCall, WriteReceipt};
use docledger_core::foundation::{ContentDigest, Identity};
use docledger_core::infrastructure::gateway::{ContractGateway, InMemoryLedger};
use docledger_core::infrastructure::wallet::{ActiveSigner, SigningProvider, StaticProvider, WalletSession};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

pub fn shared_ledger() -> Arc<InMemoryLedger> {
    let ledger = Arc::new(InMemoryLedger::new());
    ledger.set_now(TEST_NOW_SECS);
    ledger
}

/// Session whose provider approves `identity` on request, without prior authorization.
pub fn session_for(ledger: &Arc<InMemoryLedger>, identity: Identity) -> LedgerSession {
    let provider = Arc::new(StaticProvider::approving(identity));
    LedgerSession::new(ledger.clone(), WalletSession::new(Some(provider)))
}

/// Session with `identity` already connected.
pub async fn connected_session(ledger: &Arc<InMemoryLedger>, identity: Identity) -> LedgerSession {
    let session = session_for(ledger, identity);
    session.connect_wallet().await.expect("connect slot free").expect("connect wallet");
    session
}

pub fn test_document() -> DocumentSource {
    DocumentSource::bytes(TEST_DOCUMENT_LABEL, TEST_DOCUMENT.to_vec())
}

/// Gateway whose every call fails at the transport level.
pub struct UnreachableGateway;

#[async_trait]
impl ContractGateway for UnreachableGateway {
    async fn list_issuers(&self) -> Result<Vec<Issuer>, LedgerFailure> {
        Err(LedgerFailure::transport("listIssuers", "connection refused"))
    }

    async fn verify_document(&self, _digest: &ContentDigest) -> Result<DocumentRecord, LedgerFailure> {
        Err(LedgerFailure::transport("verifyDocument", "connection refused"))
    }

    async fn submit(&self, _signer: &ActiveSigner, call: WriteCall) -> Result<PendingWrite, LedgerFailure> {
        Err(LedgerFailure::transport(call.kind().location(), "connection refused"))
    }

    async fn confirm(&self, pending: &PendingWrite) -> Result<WriteReceipt, LedgerFailure> {
        Err(LedgerFailure::transport(pending.call.kind().location(), "connection refused"))
    }
}

/// Provider that approves `identity`, but only once [`HeldProvider::release`] is called.
pub struct HeldProvider {
    identity: Identity,
    release: Notify,
}

impl HeldProvider {
    pub fn new(identity: Identity) -> Self {
        Self { identity, release: Notify::new() }
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl SigningProvider for HeldProvider {
    fn name(&self) -> &'static str {
        "held"
    }

    async fn authorized(&self) -> Option<ActiveSigner> {
        Some(ActiveSigner::identity_only(self.identity))
    }

    async fn request_access(&self) -> Result<ActiveSigner, LedgerFailure> {
        self.release.notified().await;
        Ok(ActiveSigner::identity_only(self.identity))
    }
}

/// Gateway over a shared ledger whose first `list_issuers` answer is read immediately
/// but handed back only after [`HeldListGateway::release`].
pub struct HeldListGateway {
    inner: Arc<InMemoryLedger>,
    hold_next_list: AtomicBool,
    release: Notify,
}

impl HeldListGateway {
    pub fn new(inner: Arc<InMemoryLedger>) -> Self {
        Self { inner, hold_next_list: AtomicBool::new(true), release: Notify::new() }
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ContractGateway for HeldListGateway {
    async fn list_issuers(&self) -> Result<Vec<Issuer>, LedgerFailure> {
        let issuers = self.inner.list_issuers().await?;
        if self.hold_next_list.swap(false, Ordering::SeqCst) {
            self.release.notified().await;
        }
        Ok(issuers)
    }

    async fn verify_document(&self, digest: &ContentDigest) -> Result<DocumentRecord, LedgerFailure> {
        self.inner.verify_document(digest).await
    }

    async fn submit(&self, signer: &ActiveSigner, call: WriteCall) -> Result<PendingWrite, LedgerFailure> {
        self.inner.submit(signer, call).await
    }

    async fn confirm(&self, pending: &PendingWrite) -> Result<WriteReceipt, LedgerFailure> {
        self.inner.confirm(pending).await
    }
}
