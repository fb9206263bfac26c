use crate::fixtures::*;
use docledger_core::application::{IssuerCache, LedgerSession};
use docledger_core::domain::{ActivityKind, AttemptState, ErrorCategory};
use docledger_core::foundation::constants::LOCATION_LIST_ISSUERS;
use docledger_core::infrastructure::gateway::ContractGateway;
use docledger_core::infrastructure::wallet::{ActiveSigner, StaticProvider, WalletSession};
use std::sync::Arc;

#[tokio::test]
async fn test_issuer_cache_when_registered_then_contains_new_issuer_once_in_order() {
    let ledger = shared_ledger();
    let session = connected_session(&ledger, ALICE).await;

    session.register_issuer("First", "OrgA", "first@x.test").await.expect("first");
    session.register_issuer(TEST_ISSUER_NAME, TEST_ISSUER_ORG, TEST_ISSUER_EMAIL).await.expect("second");

    let issuers = session.issuers();
    let names: Vec<&str> = issuers.iter().map(|issuer| issuer.name.as_str()).collect();
    assert_eq!(names, vec!["First", TEST_ISSUER_NAME]);
    assert_eq!(issuers.iter().filter(|issuer| issuer.name == TEST_ISSUER_NAME).count(), 1);
    assert_eq!(issuers[1].id, 1);
    assert_eq!(issuers[1].owner, ALICE);
    assert_eq!(session.issuer_cache().find(1).map(|issuer| issuer.email), Some(TEST_ISSUER_EMAIL.to_string()));
}

#[tokio::test]
async fn test_start_when_ledger_has_issuers_then_loaded_and_announced() {
    let ledger = shared_ledger();
    let registrar = connected_session(&ledger, MALLORY).await;
    registrar.register_issuer(TEST_ISSUER_NAME, TEST_ISSUER_ORG, TEST_ISSUER_EMAIL).await.expect("register");

    let session = session_for(&ledger, ALICE);
    assert!(session.issuers().is_empty());
    assert_eq!(session.start().await.expect("start"), 1);
    assert_eq!(session.issuers().len(), 1);

    let latest = &session.journal().activity().entries()[0];
    assert_eq!(latest.kind, ActivityKind::Info);
    assert_eq!(latest.message, "Loaded 1 issuers from ledger");
}

#[tokio::test]
async fn test_issuer_cache_when_refresh_fails_then_previous_snapshot_kept() {
    let ledger = shared_ledger();
    ledger
        .register_issuer(&ActiveSigner::identity_only(ALICE), TEST_ISSUER_NAME, TEST_ISSUER_ORG, TEST_ISSUER_EMAIL)
        .await
        .expect("register");

    let cache = IssuerCache::new();
    cache.refresh(ledger.as_ref()).await.expect("refresh");
    assert_eq!(cache.len(), 1);

    assert!(cache.refresh(&UnreachableGateway).await.is_err());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.current()[0].name, TEST_ISSUER_NAME);
}

#[tokio::test]
async fn test_list_issuers_when_unreachable_then_classified_and_logged() {
    let session = LedgerSession::new(Arc::new(UnreachableGateway), WalletSession::detached());

    let err = session.start().await.unwrap_err();
    assert_eq!(err.category, ErrorCategory::Generic);
    let errors = session.journal().errors().entries();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location, LOCATION_LIST_ISSUERS);
    assert!(session.lifecycle().current().is_none());
}

#[tokio::test]
async fn test_issuer_cache_when_older_list_answers_after_register_then_new_issuer_kept() {
    let ledger = shared_ledger();
    let gateway = Arc::new(HeldListGateway::new(ledger));
    let session = LedgerSession::new(gateway.clone(), WalletSession::new(Some(Arc::new(StaticProvider::approving(ALICE)))));
    session.connect_wallet().await.expect("connect slot free").expect("connect");

    // The first list reads an empty registry, then answers only after the register finished.
    let (listed, attempt) = tokio::join!(session.list_issuers(), async {
        let attempt = session.register_issuer(TEST_ISSUER_NAME, TEST_ISSUER_ORG, TEST_ISSUER_EMAIL).await;
        gateway.release();
        attempt
    });

    assert_eq!(attempt.expect("attempt").state, AttemptState::Succeeded);
    assert_eq!(listed.expect("list").len(), 1);
    let issuers = session.issuers();
    assert_eq!(issuers.len(), 1);
    assert_eq!(issuers[0].name, TEST_ISSUER_NAME);
}
