use crate::domain::{AttemptState, ClassifiedError, TransactionAttempt};
use crate::infrastructure::journal::Journal;
use log::{debug, info, trace, warn};
use std::sync::Arc;

pub trait LifecycleObserver: Send + Sync {
    fn on_attempt_started(&self, _attempt: &TransactionAttempt) {}
    fn on_state_changed(&self, _attempt: &TransactionAttempt, _from: AttemptState) {}
    fn on_succeeded(&self, _attempt: &TransactionAttempt, _summary: &str) {}
    fn on_failed(&self, _attempt: &TransactionAttempt, _error: &ClassifiedError) {}
    /// The issuer list could not be reloaded after a confirmed registration.
    fn on_refresh_failed(&self, _error: &ClassifiedError) {}
}

pub struct NoopObserver;

impl LifecycleObserver for NoopObserver {}

pub struct CompositeObserver {
    observers: Vec<Arc<dyn LifecycleObserver>>,
}

impl CompositeObserver {
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn LifecycleObserver>) {
        self.observers.push(observer);
    }
}

impl Default for CompositeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleObserver for CompositeObserver {
    fn on_attempt_started(&self, attempt: &TransactionAttempt) {
        trace!("on_attempt_started dispatch observer_count={} attempt_id={}", self.observers.len(), attempt.attempt_id);
        for observer in &self.observers {
            observer.on_attempt_started(attempt);
        }
    }

    fn on_state_changed(&self, attempt: &TransactionAttempt, from: AttemptState) {
        debug!("attempt state changed attempt_id={} kind={} from={} to={}", attempt.attempt_id, attempt.kind, from, attempt.state);
        for observer in &self.observers {
            observer.on_state_changed(attempt, from);
        }
    }

    fn on_succeeded(&self, attempt: &TransactionAttempt, summary: &str) {
        info!("attempt succeeded attempt_id={} kind={} summary={}", attempt.attempt_id, attempt.kind, summary);
        for observer in &self.observers {
            observer.on_succeeded(attempt, summary);
        }
    }

    fn on_failed(&self, attempt: &TransactionAttempt, error: &ClassifiedError) {
        warn!("attempt failed attempt_id={} kind={} category={}", attempt.attempt_id, attempt.kind, error.category);
        for observer in &self.observers {
            observer.on_failed(attempt, error);
        }
    }

    fn on_refresh_failed(&self, error: &ClassifiedError) {
        for observer in &self.observers {
            observer.on_refresh_failed(error);
        }
    }
}

/// Writes terminal attempt outcomes into the session journal.
pub struct JournalObserver {
    journal: Arc<Journal>,
}

impl JournalObserver {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self { journal }
    }
}

impl LifecycleObserver for JournalObserver {
    fn on_succeeded(&self, _attempt: &TransactionAttempt, summary: &str) {
        self.journal.record_success(summary);
    }

    fn on_failed(&self, attempt: &TransactionAttempt, error: &ClassifiedError) {
        self.journal.record_failure(attempt.kind.location(), error);
    }

    fn on_refresh_failed(&self, error: &ClassifiedError) {
        self.journal.record_failure(crate::foundation::constants::LOCATION_LIST_ISSUERS, error);
    }
}
