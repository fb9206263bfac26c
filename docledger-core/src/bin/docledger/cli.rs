use clap::{Parser, Subcommand};
use docledger_core::infrastructure::config::{CONFIG_PATH_ENV, DATA_DIR_ENV};
use std::path::PathBuf;

/// Env override consumed by the figment loader (`ledger.rpc_url`).
const RPC_URL_ENV: &str = "DOCLEDGER_LEDGER__RPC_URL";
/// Env override consumed by the figment loader (`ledger.backend`).
const BACKEND_ENV: &str = "DOCLEDGER_LEDGER__BACKEND";

#[derive(Parser, Debug)]
#[command(name = "docledger")]
#[command(about = "Register issuers and store, verify or revoke document digests on a ledger", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Override ledger JSON-RPC URL
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Override ledger backend (evm, memory)
    #[arg(long)]
    pub backend: Option<String>,

    /// Log level or filter expression (e.g. "debug", "info,alloy=debug")
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long)]
    pub log_dir: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the content digest of a file
    Digest { file: PathBuf },
    /// List registered issuers
    Issuers,
    /// Register a new issuer
    Register {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        organization: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Store a file's digest under an issuer
    Store {
        file: PathBuf,
        #[arg(long)]
        issuer: u64,
    },
    /// Look up a file's digest
    Verify {
        file: PathBuf,
        /// Treat a missing record as an error
        #[arg(long)]
        strict: bool,
    },
    /// Revoke a file's digest
    Delete { file: PathBuf },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn apply_to_env(&self) {
        if let Some(config_path) = &self.config {
            std::env::set_var(CONFIG_PATH_ENV, config_path);
        }

        if let Some(data_dir) = &self.data_dir {
            std::env::set_var(DATA_DIR_ENV, data_dir);
        }

        if let Some(rpc_url) = &self.rpc_url {
            std::env::set_var(RPC_URL_ENV, rpc_url);
        }

        if let Some(backend) = &self.backend {
            std::env::set_var(BACKEND_ENV, backend);
        }
    }
}
