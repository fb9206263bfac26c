use docledger_core::application::LedgerSession;
use docledger_core::foundation::LedgerError;
use docledger_core::infrastructure::config::{load_app_config_from_path, load_config, LedgerBackend, CONFIG_FILE_NAME};
use std::env;
use std::sync::{Mutex, OnceLock};

// Well-known development key #0 and its address.
const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn test_config_loading_when_file_missing_then_defaults() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");

    let config = load_config(data_dir.path()).expect("load config");
    assert_eq!(config.ledger.backend, LedgerBackend::Evm);
    assert_eq!(config.ledger.chain_id, 31337);
    assert_eq!(config.ledger.registry_address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
    assert!(config.wallet.private_key.is_none());
    assert!(config.wallet.auto_connect);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_loading_when_toml_and_env_then_env_wins() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");
    let path = data_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "[ledger]\nbackend = \"memory\"\nrpc_url = \"http://10.0.0.5:8545\"\nchain_id = 1337\n\n[wallet]\nauto_connect = false\n",
    )
    .expect("write toml");

    env::set_var("DOCLEDGER_LEDGER__RPC_URL", "http://127.0.0.1:9545");
    let config = load_app_config_from_path(&path);
    env::remove_var("DOCLEDGER_LEDGER__RPC_URL");

    let config = config.expect("load app config");
    assert_eq!(config.ledger.backend, LedgerBackend::Memory);
    assert_eq!(config.ledger.chain_id, 1337);
    assert_eq!(config.ledger.rpc_url, "http://127.0.0.1:9545");
    assert!(!config.wallet.auto_connect);
}

#[test]
fn test_config_loading_when_address_invalid_then_validation_error() {
    let _guard = lock_env();
    let data_dir = tempfile::tempdir().expect("temp data dir");
    let path = data_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[ledger]\nregistry_address = \"0x1234\"\n").expect("write toml");

    let err = load_app_config_from_path(&path).unwrap_err();
    match err {
        LedgerError::ConfigError(message) => assert!(message.contains("ledger.registry_address"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_session_from_config_when_memory_backend_and_key_then_auto_connects() {
    let config = {
        let _guard = lock_env();
        let data_dir = tempfile::tempdir().expect("temp data dir");
        let path = data_dir.path().join(CONFIG_FILE_NAME);
        let toml = format!("[ledger]\nbackend = \"memory\"\n\n[wallet]\nprivate_key = \"{DEV_KEY}\"\n");
        std::fs::write(&path, toml).expect("write toml");
        load_app_config_from_path(&path).expect("load app config")
    };

    let session = LedgerSession::from_config(&config).expect("session");
    assert_eq!(session.start().await.expect("start"), 0);
    assert_eq!(session.identity().map(|identity| identity.to_string()), Some(DEV_ADDRESS.to_string()));

    let attempt = session.register_issuer("Alice", "ExampleOrg", "a@x.test").await.expect("register");
    assert!(attempt.succeeded());
}
