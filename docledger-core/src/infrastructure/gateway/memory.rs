//! Process-local ledger.
//!
//! Enforces the same rules as the deployed contracts and speaks the same two-phase
//! protocol. Confirmations can be held back to observe (or strand) attempts in `Confirming`.

use crate::domain::hashes::sha256;
use crate::domain::{DocumentRecord, Issuer, LedgerFailure, PendingWrite, WriteCall, WriteReceipt};
use crate::foundation::constants::*;
use crate::foundation::util::time::now_secs;
use crate::foundation::{ContentDigest, Identity, IssuerId, TxReference};
use crate::infrastructure::gateway::ContractGateway;
use crate::infrastructure::wallet::ActiveSigner;
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

#[derive(Clone, Debug)]
struct StoredDocument {
    issuer_id: IssuerId,
    owner: Identity,
    created_at: u64,
}

#[derive(Default)]
struct LedgerState {
    issuers: Vec<Issuer>,
    documents: HashMap<ContentDigest, StoredDocument>,
    /// Submitted, not yet finalized. Only a finishing `confirm` removes an entry, so a confirm
    /// dropped while held leaves its write here until the same reference is confirmed again.
    pending: HashMap<TxReference, PendingWrite>,
    block_number: u64,
}

pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
    confirmations_open: watch::Sender<bool>,
    clock_secs: AtomicU64,
    nonce: AtomicU64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        let (confirmations_open, _) = watch::channel(true);
        Self {
            state: Mutex::new(LedgerState::default()),
            confirmations_open,
            clock_secs: AtomicU64::new(now_secs()),
            nonce: AtomicU64::new(0),
        }
    }

    /// Holds every `confirm` until [`Self::release_confirmations`] is called.
    pub fn pause_confirmations(&self) {
        self.confirmations_open.send_replace(false);
    }

    pub fn release_confirmations(&self) {
        self.confirmations_open.send_replace(true);
    }

    /// Sets the timestamp recorded on subsequently confirmed documents.
    pub fn set_now(&self, secs: u64) {
        self.clock_secs.store(secs, Ordering::Relaxed);
    }

    pub fn pending_count(&self) -> usize {
        self.lock("pending_count").map(|state| state.pending.len()).unwrap_or(0)
    }

    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, LedgerState>, LedgerFailure> {
        self.state.lock().map_err(|_| LedgerFailure::transport(operation, "ledger state lock poisoned"))
    }

    fn next_reference(&self, submitted_by: &Identity) -> TxReference {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let mut preimage = Vec::with_capacity(28);
        preimage.extend_from_slice(&nonce.to_be_bytes());
        preimage.extend_from_slice(submitted_by.as_slice());
        TxReference::new(sha256(&preimage))
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Contract rules, checked at submission (pre-flight) and again at finalization.
fn check_rules(state: &LedgerState, call: &WriteCall, sender: &Identity) -> Result<(), LedgerFailure> {
    match call {
        WriteCall::RegisterIssuer { name, .. } => {
            if name.is_empty() {
                return Err(LedgerFailure::reverted(REASON_EMPTY_NAME));
            }
        }
        WriteCall::StoreDocument { digest, issuer_id } => {
            if *issuer_id >= state.issuers.len() as u64 {
                return Err(LedgerFailure::reverted(REASON_INVALID_ISSUER));
            }
            if state.documents.contains_key(digest) {
                return Err(LedgerFailure::reverted(REASON_ALREADY_STORED));
            }
        }
        WriteCall::DeleteDocument { digest } => {
            let Some(stored) = state.documents.get(digest) else {
                return Err(LedgerFailure::reverted(REASON_DOCUMENT_MISSING));
            };
            if stored.owner != *sender {
                return Err(LedgerFailure::reverted(REASON_NOT_DOCUMENT_OWNER));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl ContractGateway for InMemoryLedger {
    async fn list_issuers(&self) -> Result<Vec<Issuer>, LedgerFailure> {
        Ok(self.lock("listIssuers")?.issuers.clone())
    }

    async fn verify_document(&self, digest: &ContentDigest) -> Result<DocumentRecord, LedgerFailure> {
        let state = self.lock("verifyDocument")?;
        let Some(stored) = state.documents.get(digest) else {
            return Ok(DocumentRecord::missing(*digest));
        };
        let issuer = state.issuers.get(stored.issuer_id as usize);
        Ok(DocumentRecord {
            digest: *digest,
            exists: true,
            issuer_id: stored.issuer_id,
            issuer_name: issuer.map(|i| i.name.clone()).unwrap_or_default(),
            organization: issuer.map(|i| i.organization.clone()).unwrap_or_default(),
            email: issuer.map(|i| i.email.clone()).unwrap_or_default(),
            owner: stored.owner,
            created_at: stored.created_at,
        })
    }

    async fn submit(&self, signer: &ActiveSigner, call: WriteCall) -> Result<PendingWrite, LedgerFailure> {
        let reference = self.next_reference(&signer.identity);
        let mut state = self.lock(call.kind().location())?;
        check_rules(&state, &call, &signer.identity)?;
        let expected_issuer_id = matches!(call, WriteCall::RegisterIssuer { .. }).then_some(state.issuers.len() as IssuerId);
        let pending = PendingWrite { reference, call, submitted_by: signer.identity, expected_issuer_id };
        state.pending.insert(reference, pending.clone());
        debug!("memory ledger accepted write kind={} reference={:#x}", pending.call.kind(), reference);
        Ok(pending)
    }

    async fn confirm(&self, pending: &PendingWrite) -> Result<WriteReceipt, LedgerFailure> {
        let operation = pending.call.kind().location();
        let mut open = self.confirmations_open.subscribe();
        open.wait_for(|open| *open).await.map_err(|err| LedgerFailure::transport(operation, err.to_string()))?;

        let mut state = self.lock(operation)?;
        let Some(write) = state.pending.remove(&pending.reference) else {
            return Err(LedgerFailure::transport(operation, format!("unknown reference {:#x}", pending.reference)));
        };
        state.block_number += 1;
        let block_number = Some(state.block_number);
        // A conflicting write may have been finalized since submission.
        check_rules(&state, &write.call, &write.submitted_by)?;

        let mut issuer_id = None;
        match write.call {
            WriteCall::RegisterIssuer { name, organization, email } => {
                let id = state.issuers.len() as IssuerId;
                state.issuers.push(Issuer { id, name, organization, email, owner: write.submitted_by });
                issuer_id = Some(id);
            }
            WriteCall::StoreDocument { digest, issuer_id: issuer } => {
                let created_at = self.clock_secs.load(Ordering::Relaxed);
                state.documents.insert(digest, StoredDocument { issuer_id: issuer, owner: write.submitted_by, created_at });
            }
            WriteCall::DeleteDocument { digest } => {
                state.documents.remove(&digest);
            }
        }
        debug!("memory ledger finalized write kind={} reference={:#x} block={}", operation, write.reference, state.block_number);
        Ok(WriteReceipt { reference: write.reference, block_number, issuer_id })
    }
}
