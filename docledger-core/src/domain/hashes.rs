//! Content hashing.
//!
//! A document's ledger key is the SHA-256 of its exact bytes. Name and metadata never
//! participate, so the store, verify and delete paths always agree on the key.

use crate::foundation::{ContentDigest, Hash32};
use sha2::{Digest, Sha256};

pub fn sha256(bytes: &[u8]) -> Hash32 {
    Sha256::digest(bytes).into()
}

pub fn digest(bytes: &[u8]) -> ContentDigest {
    ContentDigest::new(sha256(bytes))
}

/// Incremental form of [`digest`] for input that arrives in chunks.
#[derive(Clone, Default)]
pub struct DigestBuilder {
    hasher: Sha256,
    len: u64,
}

impl DigestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.len = self.len.saturating_add(chunk.len() as u64);
    }

    pub fn bytes_seen(&self) -> u64 {
        self.len
    }

    pub fn finalize(self) -> ContentDigest {
        ContentDigest::new(self.hasher.finalize().into())
    }
}
