use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AttemptInFlight,
    ConnectInProgress,
    ReadOnlyOperation,
    InvalidStateTransition,
    ConfigError,
    InvalidAddress,
    InvalidPrivateKey,
    EncodingError,
    StorageError,
    SerializationError,
    LoggingError,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("attempt {attempt_id} still in flight (state {state})")]
    AttemptInFlight { attempt_id: u64, state: String },

    #[error("wallet connect already in progress")]
    ConnectInProgress,

    #[error("operation {kind} is read-only and has no write phases")]
    ReadOnlyOperation { kind: String },

    #[error("invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid address: input={input} reason={reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("logging setup failed: {0}")]
    LoggingError(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::AttemptInFlight { .. } => ErrorCode::AttemptInFlight,
            LedgerError::ConnectInProgress => ErrorCode::ConnectInProgress,
            LedgerError::ReadOnlyOperation { .. } => ErrorCode::ReadOnlyOperation,
            LedgerError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            LedgerError::ConfigError(_) => ErrorCode::ConfigError,
            LedgerError::InvalidAddress { .. } => ErrorCode::InvalidAddress,
            LedgerError::InvalidPrivateKey(_) => ErrorCode::InvalidPrivateKey,
            LedgerError::EncodingError(_) => ErrorCode::EncodingError,
            LedgerError::StorageError { .. } => ErrorCode::StorageError,
            LedgerError::SerializationError { .. } => ErrorCode::SerializationError,
            LedgerError::LoggingError(_) => ErrorCode::LoggingError,
        }
    }

    pub fn invalid_address(input: impl Into<String>, reason: impl Into<String>) -> Self {
        LedgerError::InvalidAddress { input: input.into(), reason: reason.into() }
    }
}

impl From<hex::FromHexError> for LedgerError {
    fn from(err: hex::FromHexError) -> Self {
        LedgerError::EncodingError(format!("hex decode error: {}", err))
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<figment::Error> for LedgerError {
    fn from(err: figment::Error) -> Self {
        LedgerError::ConfigError(format!("config extraction failed: {}", err))
    }
}

impl From<io::Error> for LedgerError {
    fn from(err: io::Error) -> Self {
        LedgerError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}
