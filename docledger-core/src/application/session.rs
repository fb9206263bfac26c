//! A client session: the wallet, the issuer cache, the lifecycle and the journal,
//! each owned separately and wired through explicit calls.

use crate::application::issuer_cache::IssuerCache;
use crate::application::lifecycle::{TransactionLifecycle, WriteRequest};
use crate::application::observer::{CompositeObserver, JournalObserver, LifecycleObserver};
use crate::application::source::DocumentSource;
use crate::domain::{
    classify, classify_session, ClassifiedError, DocumentRecord, Issuer, LedgerFailure, OperationKind, TransactionAttempt,
};
use crate::foundation::constants::{LOCATION_CONNECT_WALLET, LOCATION_LIST_ISSUERS};
use crate::foundation::{ContentDigest, Identity, IssuerId, LedgerError};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::gateway::{build_gateway, ContractGateway};
use crate::infrastructure::journal::Journal;
use crate::infrastructure::wallet::{LocalKeyProvider, SigningProvider, WalletSession};
use log::{debug, info, warn};
use std::sync::Arc;

pub struct LedgerSession {
    gateway: Arc<dyn ContractGateway>,
    wallet: Arc<WalletSession>,
    issuers: Arc<IssuerCache>,
    journal: Arc<Journal>,
    lifecycle: TransactionLifecycle,
    auto_connect: bool,
}

impl LedgerSession {
    pub fn new(gateway: Arc<dyn ContractGateway>, wallet: WalletSession) -> Self {
        Self::with_observers(gateway, wallet, Vec::new())
    }

    /// Like [`Self::new`], with extra lifecycle observers alongside the journal.
    pub fn with_observers(
        gateway: Arc<dyn ContractGateway>,
        wallet: WalletSession,
        extra: Vec<Arc<dyn LifecycleObserver>>,
    ) -> Self {
        let wallet = Arc::new(wallet);
        let issuers = Arc::new(IssuerCache::new());
        let journal = Arc::new(Journal::new());

        let mut observer = CompositeObserver::new();
        observer.add_observer(Arc::new(JournalObserver::new(journal.clone())));
        for extra in extra {
            observer.add_observer(extra);
        }

        let lifecycle = TransactionLifecycle::with_observer(gateway.clone(), wallet.clone(), issuers.clone(), Arc::new(observer));
        Self { gateway, wallet, issuers, journal, lifecycle, auto_connect: true }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, LedgerError> {
        let gateway = build_gateway(&config.ledger)?;
        let provider: Option<Arc<dyn SigningProvider>> = match config.wallet.private_key.as_deref() {
            Some(secret) => Some(Arc::new(LocalKeyProvider::from_hex(secret)?)),
            None => None,
        };
        debug!("session configured backend={:?} signing_provider={}", config.ledger.backend, provider.is_some());
        Ok(Self::new(gateway, WalletSession::new(provider)).with_auto_connect(config.wallet.auto_connect))
    }

    pub fn with_auto_connect(mut self, enabled: bool) -> Self {
        self.auto_connect = enabled;
        self
    }

    /// Adopts an already-authorized identity (when enabled) and loads the issuer list.
    ///
    /// Returns the number of issuers loaded. A failed load is journaled and returned; the
    /// session stays usable either way.
    pub async fn start(&self) -> Result<usize, ClassifiedError> {
        if self.auto_connect {
            match self.wallet.restore().await {
                Ok(Some(identity)) => self.journal.record_info(format!("Auto-connected: {identity}")),
                Ok(None) => {}
                Err(err) => warn!("auto-connect skipped: {err}"),
            }
        }
        let issuers = self.list_issuers().await?;
        if !issuers.is_empty() {
            self.journal.record_info(format!("Loaded {} issuers from ledger", issuers.len()));
        }
        info!("session started identity={:?} issuers={}", self.identity(), issuers.len());
        Ok(issuers.len())
    }

    /// Prompts the signing provider.
    ///
    /// A connect while another is pending is misuse and comes back as the outer
    /// [`LedgerError`] without touching the journal. Provider answers are classified.
    pub async fn connect_wallet(&self) -> Result<Result<Identity, ClassifiedError>, LedgerError> {
        match self.wallet.connect().await? {
            Ok(identity) => {
                self.journal.record_info(format!("Wallet connected: {identity}"));
                Ok(Ok(identity))
            }
            Err(failure) => Ok(Err(self.report(LOCATION_CONNECT_WALLET, classify_session(&failure)))),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.wallet.current_identity()
    }

    pub async fn register_issuer(&self, name: &str, organization: &str, email: &str) -> Result<TransactionAttempt, LedgerError> {
        let request =
            WriteRequest::RegisterIssuer { name: name.to_string(), organization: organization.to_string(), email: email.to_string() };
        self.lifecycle.execute(request).await
    }

    pub async fn store_document(&self, source: DocumentSource, issuer_id: IssuerId) -> Result<TransactionAttempt, LedgerError> {
        self.lifecycle.execute(WriteRequest::StoreDocument { source, issuer_id }).await
    }

    pub async fn delete_document(&self, source: DocumentSource) -> Result<TransactionAttempt, LedgerError> {
        self.lifecycle.execute(WriteRequest::DeleteDocument { source }).await
    }

    /// Looks the document up. `exists=false` is a normal answer.
    pub async fn verify_document(&self, source: &DocumentSource) -> Result<DocumentRecord, ClassifiedError> {
        let (_, record) = self.lookup(source).await?;
        if record.is_live() {
            self.journal.record_success(format!("Verified file: {}", source.label()));
        } else {
            self.journal.record_info(format!("No ledger record for: {}", source.label()));
        }
        Ok(record)
    }

    /// Like [`Self::verify_document`], but a missing record is a `DocumentNotFound` error.
    pub async fn require_document(&self, source: &DocumentSource) -> Result<DocumentRecord, ClassifiedError> {
        let (digest, record) = self.lookup(source).await?;
        if !record.is_live() {
            let kind = OperationKind::VerifyDocument;
            return Err(self.report(kind.location(), classify(&LedgerFailure::RecordMissing { digest }, kind)));
        }
        self.journal.record_success(format!("Verified file: {}", source.label()));
        Ok(record)
    }

    /// Reloads the issuer cache from the registry.
    pub async fn list_issuers(&self) -> Result<Arc<Vec<Issuer>>, ClassifiedError> {
        self.issuers
            .refresh(self.gateway.as_ref())
            .await
            .map_err(|failure| self.report(LOCATION_LIST_ISSUERS, classify_session(&failure)))
    }

    /// Cached issuers, without contacting the ledger.
    pub fn issuers(&self) -> Arc<Vec<Issuer>> {
        self.issuers.current()
    }

    pub fn issuer_cache(&self) -> &IssuerCache {
        &self.issuers
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn lifecycle(&self) -> &TransactionLifecycle {
        &self.lifecycle
    }

    /// Hashes the source and queries the ledger; failures are classified and journaled.
    async fn lookup(&self, source: &DocumentSource) -> Result<(ContentDigest, DocumentRecord), ClassifiedError> {
        let kind = OperationKind::VerifyDocument;
        let reported = |failure: LedgerFailure| self.report(kind.location(), classify(&failure, kind));
        let digest = source.compute_digest().await.map_err(reported)?;
        let record = self.gateway.verify_document(&digest).await.map_err(reported)?;
        Ok((digest, record))
    }

    fn report(&self, location: &str, error: ClassifiedError) -> ClassifiedError {
        self.journal.record_failure(location, &error);
        error
    }
}
