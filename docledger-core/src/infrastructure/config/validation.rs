use crate::infrastructure::config::types::AppConfig;
use alloy::primitives::Address;
use std::str::FromStr;

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match url::Url::parse(self.ledger.rpc_url.trim()) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https" | "ws" | "wss") => {}
            Ok(parsed) => errors.push(format!("ledger.rpc_url has unsupported scheme: {}", parsed.scheme())),
            Err(err) => errors.push(format!("invalid ledger.rpc_url: {} ({})", self.ledger.rpc_url, err)),
        }

        if self.ledger.chain_id == 0 {
            errors.push("ledger.chain_id must be > 0".to_string());
        }

        let addresses =
            [("ledger.registry_address", &self.ledger.registry_address), ("ledger.verifier_address", &self.ledger.verifier_address)];
        for (field, value) in addresses {
            if Address::from_str(value.trim()).is_err() {
                errors.push(format!("invalid {}: {}", field, value));
            }
        }

        if self.ledger.registry_address.trim().eq_ignore_ascii_case(self.ledger.verifier_address.trim()) {
            errors.push("ledger.registry_address and ledger.verifier_address must differ".to_string());
        }

        if let Some(key) = self.wallet.private_key.as_deref() {
            let stripped = key.trim().trim_start_matches("0x");
            match hex::decode(stripped) {
                Ok(bytes) if bytes.len() == 32 => {}
                Ok(bytes) => errors.push(format!("wallet.private_key must be 32 bytes, got {}", bytes.len())),
                Err(_) => errors.push("wallet.private_key is not valid hex".to_string()),
            }
        }

        if self.logging.level.trim().is_empty() {
            errors.push("logging.level must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
