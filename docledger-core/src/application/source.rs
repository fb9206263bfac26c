//! Document input for hashing.

use crate::domain::hashes::{digest, DigestBuilder};
use crate::domain::LedgerFailure;
use crate::foundation::constants::DIGEST_READ_CHUNK_BYTES;
use crate::foundation::ContentDigest;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(Clone, Debug)]
pub enum DocumentSource {
    /// In-memory content with a display label.
    Bytes { label: String, bytes: Vec<u8> },
    /// File read in chunks at hashing time.
    File(PathBuf),
}

impl DocumentSource {
    pub fn bytes(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        DocumentSource::Bytes { label: label.into(), bytes: bytes.into() }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        DocumentSource::File(path.into())
    }

    /// Name shown in activity entries. Never part of the digest.
    pub fn label(&self) -> String {
        match self {
            DocumentSource::Bytes { label, .. } => label.clone(),
            DocumentSource::File(path) => {
                path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
            }
        }
    }

    pub async fn compute_digest(&self) -> Result<ContentDigest, LedgerFailure> {
        match self {
            DocumentSource::Bytes { bytes, .. } => Ok(digest(bytes)),
            DocumentSource::File(path) => {
                let mut file = tokio::fs::File::open(path)
                    .await
                    .map_err(|err| LedgerFailure::source(format!("open {}: {}", path.display(), err)))?;
                let mut builder = DigestBuilder::new();
                let mut buf = vec![0u8; DIGEST_READ_CHUNK_BYTES];
                loop {
                    let read = file
                        .read(&mut buf)
                        .await
                        .map_err(|err| LedgerFailure::source(format!("read {}: {}", path.display(), err)))?;
                    if read == 0 {
                        break;
                    }
                    builder.update(&buf[..read]);
                }
                Ok(builder.finalize())
            }
        }
    }
}
