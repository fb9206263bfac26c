use crate::domain::{Issuer, LedgerFailure};
use crate::foundation::IssuerId;
use crate::infrastructure::gateway::ContractGateway;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory mirror of the registry's issuer list.
///
/// The cache is the only writer of its snapshot and only ever replaces it whole. Refreshes
/// are numbered when they start; an answer never replaces one from a later-started refresh.
#[derive(Default)]
pub struct IssuerCache {
    snapshot: RwLock<Snapshot>,
    started: AtomicU64,
}

#[derive(Default)]
struct Snapshot {
    generation: u64,
    issuers: Arc<Vec<Issuer>>,
}

impl IssuerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot with the registry's current list and returns the installed list.
    ///
    /// On failure the old snapshot stays. An answer that arrives after a later-started refresh
    /// was installed is discarded, and the newer snapshot is returned instead.
    pub async fn refresh(&self, gateway: &dyn ContractGateway) -> Result<Arc<Vec<Issuer>>, LedgerFailure> {
        let generation = self.started.fetch_add(1, Ordering::AcqRel) + 1;
        let fresh = Arc::new(gateway.list_issuers().await?);
        let Ok(mut snapshot) = self.snapshot.write() else {
            return Ok(fresh);
        };
        if snapshot.generation > generation {
            debug!("issuer cache refresh superseded generation={} installed={}", generation, snapshot.generation);
            return Ok(snapshot.issuers.clone());
        }
        snapshot.generation = generation;
        snapshot.issuers = fresh.clone();
        debug!("issuer cache refreshed generation={} count={}", generation, fresh.len());
        Ok(fresh)
    }

    /// Last installed snapshot, in registry order.
    pub fn current(&self) -> Arc<Vec<Issuer>> {
        self.snapshot.read().map(|snapshot| snapshot.issuers.clone()).unwrap_or_default()
    }

    pub fn find(&self, id: IssuerId) -> Option<Issuer> {
        self.current().iter().find(|issuer| issuer.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}
