//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (DOCLEDGER_* prefix)

use crate::foundation::LedgerError;
use crate::infrastructure::config::types::AppConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::{debug, info};
use std::path::Path;

/// Default config file name inside the data dir.
pub const CONFIG_FILE_NAME: &str = "docledger.toml";

/// Environment variable prefix for config overrides.
///
/// Example: `DOCLEDGER_LEDGER__RPC_URL` -> `ledger.rpc_url`
const ENV_PREFIX: &str = "DOCLEDGER_";

/// Load configuration from the default file in `data_dir` (`docledger.toml`).
pub fn load_config(data_dir: &Path) -> Result<AppConfig, LedgerError> {
    load_config_from_file(&data_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from a specific file path. A missing file falls back to defaults and env.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig, LedgerError> {
    info!("loading configuration path={}", path.display());
    let figment = figment_base(path).merge(Env::prefixed(ENV_PREFIX).split("__"));
    let config: AppConfig = figment.extract()?;
    debug!(
        "configuration loaded backend={:?} rpc_url={} chain_id={} signer_configured={}",
        config.ledger.backend,
        redact_url(&config.ledger.rpc_url),
        config.ledger.chain_id,
        config.wallet.private_key.is_some()
    );
    Ok(config)
}

fn figment_base(path: &Path) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
    }
    figment
}

/// Strips userinfo and query from an RPC URL before it is logged.
pub(crate) fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if !parsed.username().is_empty() || parsed.password().is_some() {
                let _ = parsed.set_username("***");
                let _ = parsed.set_password(None);
            }
            parsed.set_query(None);
            parsed.to_string()
        }
        Err(_) => "<unparseable>".to_string(),
    }
}
