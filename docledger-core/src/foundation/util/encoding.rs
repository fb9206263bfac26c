use crate::foundation::{Hash32, LedgerError};

pub fn decode_hex(s: &str) -> Result<Vec<u8>, LedgerError> {
    hex::decode(s).map_err(|e| e.into())
}

/// Parses a 32-byte value from hex, with or without a `0x` prefix.
pub fn parse_hex_32bytes(s: &str) -> Result<Hash32, LedgerError> {
    let trimmed = s.trim();
    let stripped = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);
    let bytes = decode_hex(stripped)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| LedgerError::EncodingError(format!("expected 32 bytes, got {}", len)))
}
