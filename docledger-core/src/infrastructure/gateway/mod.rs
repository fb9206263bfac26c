//! Typed access to the two remote services: the issuer registry and the document ledger.
//!
//! Writes are two-phased. [`ContractGateway::submit`] returns as soon as the service has
//! accepted the write; [`ContractGateway::confirm`] suspends until it is finalized. Domain
//! rules are enforced remotely and only observed here.

pub mod evm;
pub mod memory;

pub use evm::{EvmGateway, EvmSettings};
pub use memory::InMemoryLedger;

use crate::domain::{DocumentRecord, Issuer, LedgerFailure, PendingWrite, WriteCall, WriteReceipt};
use crate::foundation::{ContentDigest, IssuerId, LedgerError, TxReference};
use crate::infrastructure::config::{LedgerBackend, LedgerConfig};
use crate::infrastructure::wallet::ActiveSigner;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Issuers in registry insertion order.
    async fn list_issuers(&self) -> Result<Vec<Issuer>, LedgerFailure>;

    /// `exists=false` is a normal answer, not a failure.
    async fn verify_document(&self, digest: &ContentDigest) -> Result<DocumentRecord, LedgerFailure>;

    async fn submit(&self, signer: &ActiveSigner, call: WriteCall) -> Result<PendingWrite, LedgerFailure>;

    /// Waits for finalization. There is no internal timeout.
    async fn confirm(&self, pending: &PendingWrite) -> Result<WriteReceipt, LedgerFailure>;

    async fn register_issuer(
        &self,
        signer: &ActiveSigner,
        name: &str,
        organization: &str,
        email: &str,
    ) -> Result<IssuerId, LedgerFailure> {
        let call =
            WriteCall::RegisterIssuer { name: name.to_string(), organization: organization.to_string(), email: email.to_string() };
        let pending = self.submit(signer, call).await?;
        let receipt = self.confirm(&pending).await?;
        receipt
            .issuer_id
            .or(pending.expected_issuer_id)
            .ok_or_else(|| LedgerFailure::transport("registerIssuer", "registry reported no issuer id"))
    }

    async fn store_document(
        &self,
        signer: &ActiveSigner,
        digest: ContentDigest,
        issuer_id: IssuerId,
    ) -> Result<TxReference, LedgerFailure> {
        let pending = self.submit(signer, WriteCall::StoreDocument { digest, issuer_id }).await?;
        Ok(self.confirm(&pending).await?.reference)
    }

    async fn delete_document(&self, signer: &ActiveSigner, digest: ContentDigest) -> Result<TxReference, LedgerFailure> {
        let pending = self.submit(signer, WriteCall::DeleteDocument { digest }).await?;
        Ok(self.confirm(&pending).await?.reference)
    }
}

/// Builds the gateway selected by `ledger.backend`.
pub fn build_gateway(config: &LedgerConfig) -> Result<Arc<dyn ContractGateway>, LedgerError> {
    match config.backend {
        LedgerBackend::Evm => Ok(Arc::new(EvmGateway::new(EvmSettings::from_config(config)?)?)),
        LedgerBackend::Memory => Ok(Arc::new(InMemoryLedger::new())),
    }
}
