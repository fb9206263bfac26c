use crate::foundation::{ContentDigest, Identity, IssuerId, TxReference};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trusted issuing party as reported by the issuer registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub id: IssuerId,
    pub name: String,
    pub organization: String,
    pub email: String,
    pub owner: Identity,
}

/// Result of a document lookup on the ledger.
///
/// `exists=false` is a normal answer; every other field is meaningless in that case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub digest: ContentDigest,
    pub exists: bool,
    pub issuer_id: IssuerId,
    pub issuer_name: String,
    pub organization: String,
    pub email: String,
    pub owner: Identity,
    /// Unix seconds at which the record was confirmed.
    pub created_at: u64,
}

impl DocumentRecord {
    pub fn missing(digest: ContentDigest) -> Self {
        Self {
            digest,
            exists: false,
            issuer_id: 0,
            issuer_name: String::new(),
            organization: String::new(),
            email: String::new(),
            owner: Identity::ZERO,
            created_at: 0,
        }
    }

    pub fn is_live(&self) -> bool {
        self.exists
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    RegisterIssuer,
    StoreDocument,
    VerifyDocument,
    DeleteDocument,
}

impl OperationKind {
    pub const fn is_write(&self) -> bool {
        !matches!(self, OperationKind::VerifyDocument)
    }

    /// Whether the write is keyed by a content digest and therefore passes through `Hashing`.
    pub const fn needs_digest(&self) -> bool {
        matches!(self, OperationKind::StoreDocument | OperationKind::VerifyDocument | OperationKind::DeleteDocument)
    }

    /// Operation name used as the error-log location.
    pub const fn location(&self) -> &'static str {
        match self {
            OperationKind::RegisterIssuer => "registerIssuer",
            OperationKind::StoreDocument => "storeDocument",
            OperationKind::VerifyDocument => "verifyDocument",
            OperationKind::DeleteDocument => "deleteDocument",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.location())
    }
}

/// A ledger write, as handed to the gateway for submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteCall {
    RegisterIssuer { name: String, organization: String, email: String },
    StoreDocument { digest: ContentDigest, issuer_id: IssuerId },
    DeleteDocument { digest: ContentDigest },
}

impl WriteCall {
    pub fn kind(&self) -> OperationKind {
        match self {
            WriteCall::RegisterIssuer { .. } => OperationKind::RegisterIssuer,
            WriteCall::StoreDocument { .. } => OperationKind::StoreDocument,
            WriteCall::DeleteDocument { .. } => OperationKind::DeleteDocument,
        }
    }

    pub fn digest(&self) -> Option<&ContentDigest> {
        match self {
            WriteCall::RegisterIssuer { .. } => None,
            WriteCall::StoreDocument { digest, .. } | WriteCall::DeleteDocument { digest } => Some(digest),
        }
    }
}

/// A submitted write awaiting finalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingWrite {
    pub reference: TxReference,
    pub call: WriteCall,
    pub submitted_by: Identity,
    /// Issuer id reported by the pre-flight call of a `RegisterIssuer` submission.
    pub expected_issuer_id: Option<IssuerId>,
}

/// Finalization report for a confirmed write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteReceipt {
    pub reference: TxReference,
    pub block_number: Option<u64>,
    pub issuer_id: Option<IssuerId>,
}
