mod loader;
mod types;
pub mod validation;

pub use loader::{load_config, load_config_from_file, CONFIG_FILE_NAME};
pub use types::*;

use crate::foundation::LedgerError;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "DOCLEDGER_CONFIG_PATH";
pub const DATA_DIR_ENV: &str = "DOCLEDGER_DATA_DIR";

pub fn load_app_config() -> Result<AppConfig, LedgerError> {
    let data_dir = resolve_data_dir()?;
    let config_path = resolve_config_path(&data_dir)?;
    load_app_config_from_path(&config_path)
}

pub fn load_app_config_from_path(path: &Path) -> Result<AppConfig, LedgerError> {
    let config = load_config_from_file(path)?;
    config.validate().map_err(|errors| LedgerError::ConfigError(format!("validation failed: {:?}", errors)))?;
    Ok(config)
}

pub fn resolve_config_path(data_dir: &Path) -> Result<PathBuf, LedgerError> {
    if let Ok(value) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    Ok(data_dir.join(CONFIG_FILE_NAME))
}

pub fn resolve_data_dir() -> Result<PathBuf, LedgerError> {
    if let Ok(data_dir) = std::env::var(DATA_DIR_ENV) {
        let trimmed = data_dir.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    let cwd = std::env::current_dir()
        .map_err(|err| LedgerError::StorageError { operation: "env::current_dir".to_string(), details: err.to_string() })?;
    Ok(cwd.join(".docledger"))
}
