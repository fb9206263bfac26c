use crate::foundation::constants::{DEFAULT_CHAIN_ID, DEFAULT_REGISTRY_ADDRESS, DEFAULT_RPC_URL, DEFAULT_VERIFIER_ADDRESS};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerBackend {
    /// JSON-RPC node hosting the registry and ledger contracts.
    #[default]
    Evm,
    /// Process-local ledger; state is lost on exit.
    Memory,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub backend: LedgerBackend,
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Issuer registry contract. Must be deployed before the verifier.
    #[serde(default = "default_registry_address")]
    pub registry_address: String,
    #[serde(default = "default_verifier_address")]
    pub verifier_address: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            registry_address: default_registry_address(),
            verifier_address: default_verifier_address(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct WalletConfig {
    /// Hex-encoded secp256k1 secret. Absent means no signing provider (read-only mode).
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default = "default_true")]
    pub auto_connect: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self { private_key: None, auto_connect: true }
    }
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("auto_connect", &self.auto_connect)
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), log_dir: None }
    }
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

fn default_registry_address() -> String {
    DEFAULT_REGISTRY_ADDRESS.to_string()
}

fn default_verifier_address() -> String {
    DEFAULT_VERIFIER_ADDRESS.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
