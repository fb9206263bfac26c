use docledger_core::domain::{ActivityKind, ClassifiedError, DocumentRecord, Issuer, TransactionAttempt};
use docledger_core::infrastructure::journal::Journal;
use serde::Serialize;
use std::error::Error;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_issuers(issuers: &[Issuer]) {
    if issuers.is_empty() {
        println!("no issuers registered");
        return;
    }
    for issuer in issuers {
        println!("#{} {} ({}) <{}> owner={}", issuer.id, issuer.name, issuer.organization, issuer.email, issuer.owner);
    }
}

pub fn print_attempt(attempt: &TransactionAttempt) {
    println!("attempt {} {} -> {}", attempt.attempt_id, attempt.kind, attempt.state);
    if let Some(digest) = attempt.digest.as_ref() {
        println!("  digest:    {:#x}", digest);
    }
    if let Some(reference) = attempt.remote_reference.as_ref() {
        println!("  reference: {:#x}", reference);
    }
    if let Some(issuer_id) = attempt.issuer_id {
        println!("  issuer id: {}", issuer_id);
    }
    if let Some(error) = attempt.error.as_ref() {
        print_error(error);
    }
}

pub fn print_record(record: &DocumentRecord) {
    println!("digest: {:#x}", record.digest);
    if !record.exists {
        println!("not stored on the ledger");
        return;
    }
    println!("issuer:       {} (#{})", record.issuer_name, record.issuer_id);
    println!("organization: {}", record.organization);
    println!("email:        {}", record.email);
    println!("owner:        {}", record.owner);
    println!("timestamp:    {}", record.created_at);
}

pub fn print_error(error: &ClassifiedError) {
    println!("  error:      {} ({})", error.message, error.category);
    println!("  suggestion: {}", error.suggestion);
}

pub fn print_journal(journal: &Journal) {
    let activity = journal.activity().entries();
    if activity.is_empty() {
        return;
    }
    println!();
    println!("activity (newest first):");
    for event in activity {
        let marker = match event.kind {
            ActivityKind::Info => "-",
            ActivityKind::Success => "+",
            ActivityKind::Error => "!",
        };
        println!("  {} [{}] {}", marker, event.timestamp_ms, event.message);
    }
}
