#[path = "docledger/cli.rs"]
mod cli;
#[path = "docledger/render.rs"]
mod render;

use crate::cli::{Cli, Command};
use docledger_core::application::{DocumentSource, LedgerSession};
use docledger_core::domain::TransactionAttempt;
use docledger_core::infrastructure::config::load_app_config;
use docledger_core::infrastructure::logging::init_logger;
use log::info;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse_args();
    args.apply_to_env();

    let config = load_app_config()?;
    let log_level = args.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    let log_dir = args.log_dir.clone().or_else(|| config.logging.log_dir.clone());
    init_logger(log_dir.as_deref(), &log_level)?;
    info!("docledger starting backend={:?} command={:?}", config.ledger.backend, args.command);

    if let Command::Digest { file } = &args.command {
        let digest = DocumentSource::file(file).compute_digest().await?;
        println!("{}", digest.to_hex());
        return Ok(());
    }

    let session = LedgerSession::from_config(&config)?;
    // A failed initial load is already journaled; commands that need issuers reload them.
    let _ = session.start().await;

    let outcome = run(&session, &args).await;
    if !args.json {
        render::print_journal(session.journal());
    }
    outcome
}

async fn run(session: &LedgerSession, args: &Cli) -> Result<(), Box<dyn Error>> {
    match &args.command {
        Command::Digest { .. } => Ok(()),
        Command::Issuers => {
            let issuers = session.list_issuers().await?;
            if args.json {
                render::print_json(&*issuers)
            } else {
                render::print_issuers(&issuers);
                Ok(())
            }
        }
        Command::Verify { file, strict } => {
            let source = DocumentSource::file(file);
            let record = if *strict { session.require_document(&source).await? } else { session.verify_document(&source).await? };
            if args.json {
                render::print_json(&record)
            } else {
                render::print_record(&record);
                Ok(())
            }
        }
        Command::Register { name, organization, email } => {
            ensure_connected(session).await?;
            let attempt = session.register_issuer(name, organization, email).await?;
            report(&attempt, args.json)
        }
        Command::Store { file, issuer } => {
            ensure_connected(session).await?;
            let attempt = session.store_document(DocumentSource::file(file), *issuer).await?;
            report(&attempt, args.json)
        }
        Command::Delete { file } => {
            ensure_connected(session).await?;
            let attempt = session.delete_document(DocumentSource::file(file)).await?;
            report(&attempt, args.json)
        }
    }
}

async fn ensure_connected(session: &LedgerSession) -> Result<(), Box<dyn Error>> {
    if session.identity().is_none() {
        session.connect_wallet().await??;
    }
    Ok(())
}

fn report(attempt: &TransactionAttempt, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        render::print_json(attempt)?;
    } else {
        render::print_attempt(attempt);
    }
    match attempt.error.as_ref() {
        Some(error) => Err(Box::new(error.clone())),
        None => Ok(()),
    }
}
