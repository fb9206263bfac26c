//! Signing providers.
//!
//! A provider is the external holder of signing capability. The session never sees key
//! material directly; it only receives an [`ActiveSigner`] once the provider grants access.

use crate::domain::LedgerFailure;
use crate::foundation::{Identity, LedgerError};
use alloy::network::EthereumWallet;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::fmt;

/// Signing capability granted by a provider.
///
/// `wallet` is absent for providers that can prove an identity but cannot sign ledger
/// transactions (e.g. scripted providers driving the in-memory ledger).
#[derive(Clone)]
pub struct ActiveSigner {
    pub identity: Identity,
    pub wallet: Option<EthereumWallet>,
}

impl ActiveSigner {
    pub fn identity_only(identity: Identity) -> Self {
        Self { identity, wallet: None }
    }
}

impl fmt::Debug for ActiveSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSigner").field("identity", &self.identity).field("can_sign", &self.wallet.is_some()).finish()
    }
}

#[async_trait]
pub trait SigningProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Non-prompting query for an identity the holder already authorized.
    async fn authorized(&self) -> Option<ActiveSigner>;

    /// Prompting request; resolves once the holder approves or declines.
    async fn request_access(&self) -> Result<ActiveSigner, LedgerFailure>;
}

/// Provider backed by a locally configured secp256k1 secret. Always approves.
pub struct LocalKeyProvider {
    signer: PrivateKeySigner,
}

impl LocalKeyProvider {
    pub fn from_hex(secret: &str) -> Result<Self, LedgerError> {
        let signer: PrivateKeySigner = secret
            .trim()
            .parse()
            .map_err(|err: alloy::signers::local::LocalSignerError| LedgerError::InvalidPrivateKey(err.to_string()))?;
        Ok(Self { signer })
    }

    pub fn identity(&self) -> Identity {
        self.signer.address()
    }

    fn grant(&self) -> ActiveSigner {
        ActiveSigner { identity: self.signer.address(), wallet: Some(EthereumWallet::from(self.signer.clone())) }
    }
}

#[async_trait]
impl SigningProvider for LocalKeyProvider {
    fn name(&self) -> &'static str {
        "local-key"
    }

    async fn authorized(&self) -> Option<ActiveSigner> {
        Some(self.grant())
    }

    async fn request_access(&self) -> Result<ActiveSigner, LedgerFailure> {
        Ok(self.grant())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    Approve,
    Reject,
}

/// Scripted provider with a fixed identity and a fixed answer to access requests.
#[derive(Debug)]
pub struct StaticProvider {
    identity: Identity,
    decision: AccessDecision,
    pre_authorized: bool,
}

impl StaticProvider {
    pub fn approving(identity: Identity) -> Self {
        Self { identity, decision: AccessDecision::Approve, pre_authorized: false }
    }

    pub fn rejecting(identity: Identity) -> Self {
        Self { identity, decision: AccessDecision::Reject, pre_authorized: false }
    }

    /// Marks the identity as already authorized, so a non-prompting query returns it.
    pub fn pre_authorized(mut self) -> Self {
        self.pre_authorized = true;
        self
    }
}

#[async_trait]
impl SigningProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn authorized(&self) -> Option<ActiveSigner> {
        self.pre_authorized.then(|| ActiveSigner::identity_only(self.identity))
    }

    async fn request_access(&self) -> Result<ActiveSigner, LedgerFailure> {
        match self.decision {
            AccessDecision::Approve => Ok(ActiveSigner::identity_only(self.identity)),
            AccessDecision::Reject => Err(LedgerFailure::ConnectionRejected { details: "user rejected the request".to_string() }),
        }
    }
}
