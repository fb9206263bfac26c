use crate::domain::LedgerFailure;
use crate::foundation::util::guard::SlotGuard;
use crate::foundation::{Identity, LedgerError};
use crate::infrastructure::wallet::provider::{ActiveSigner, SigningProvider};
use log::{debug, info, warn};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

/// Holds the single active signing identity of a session.
///
/// Reads never need an identity; writes ask for [`WalletSession::current_signer`].
pub struct WalletSession {
    provider: Option<Arc<dyn SigningProvider>>,
    active: RwLock<Option<ActiveSigner>>,
    connecting: AtomicBool,
}

impl WalletSession {
    pub fn new(provider: Option<Arc<dyn SigningProvider>>) -> Self {
        Self { provider, active: RwLock::new(None), connecting: AtomicBool::new(false) }
    }

    /// Session with no signing provider at all (read-only mode).
    pub fn detached() -> Self {
        Self::new(None)
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Adopts an identity the provider already authorized, without prompting.
    ///
    /// Shares the connect slot, so it is refused while a prompted connect is pending.
    pub async fn restore(&self) -> Result<Option<Identity>, LedgerError> {
        let Some(provider) = self.provider.as_ref() else {
            return Ok(None);
        };
        let _slot = SlotGuard::try_acquire(&self.connecting).ok_or(LedgerError::ConnectInProgress)?;

        let Some(signer) = provider.authorized().await else {
            return Ok(None);
        };
        let identity = signer.identity;
        self.set_active(signer);
        debug!("wallet restored provider={} identity={}", provider.name(), identity);
        Ok(Some(identity))
    }

    /// Prompts the provider for access and makes the granted identity active.
    ///
    /// The outer error is misuse: another connect or restore holds the slot, and the
    /// pending one is unaffected. The inner result is the provider's answer.
    pub async fn connect(&self) -> Result<Result<Identity, LedgerFailure>, LedgerError> {
        let Some(provider) = self.provider.as_ref() else {
            warn!("wallet connect requested but no signing provider is available");
            return Ok(Err(LedgerFailure::WalletUnavailable));
        };
        let Some(_slot) = SlotGuard::try_acquire(&self.connecting) else {
            warn!("wallet connect refused: another connect is pending");
            return Err(LedgerError::ConnectInProgress);
        };

        let signer = match provider.request_access().await {
            Ok(signer) => signer,
            Err(failure) => return Ok(Err(failure)),
        };
        let identity = signer.identity;
        self.set_active(signer);
        info!("wallet connected provider={} identity={}", provider.name(), identity);
        Ok(Ok(identity))
    }

    pub fn disconnect(&self) {
        if let Ok(mut active) = self.active.write() {
            *active = None;
        }
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.active.read().ok().and_then(|active| active.as_ref().map(|signer| signer.identity))
    }

    pub fn current_signer(&self) -> Option<ActiveSigner> {
        self.active.read().ok().and_then(|active| active.clone())
    }

    fn set_active(&self, signer: ActiveSigner) {
        if let Ok(mut active) = self.active.write() {
            *active = Some(signer);
        }
    }
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::detached()
    }
}
