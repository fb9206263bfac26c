//! Shared constants: deployment defaults, contract rejection reasons and user-facing suggestions.

// === Deployment defaults (local development chain) ===

/// JSON-RPC endpoint of a local development node.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Chain id of a local development node.
pub const DEFAULT_CHAIN_ID: u64 = 31337;

/// Issuer registry address for the default local deployment.
///
/// The registry is deployed first; its address is a constructor argument of the document ledger.
pub const DEFAULT_REGISTRY_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Document ledger address for the default local deployment.
pub const DEFAULT_VERIFIER_ADDRESS: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

// === Hashing ===

/// Read buffer size used when hashing streamed file input.
pub const DIGEST_READ_CHUNK_BYTES: usize = 64 * 1024;

// === Contract rejection reasons ===

pub const REASON_EMPTY_NAME: &str = "Empty name";
pub const REASON_ALREADY_STORED: &str = "Already stored";
pub const REASON_NOT_DOCUMENT_OWNER: &str = "Not document owner";
pub const REASON_DOCUMENT_MISSING: &str = "Document does not exist";
pub const REASON_INVALID_ISSUER: &str = "Invalid issuer";

// === Suggestions attached to classified errors ===

pub const SUGGEST_EMPTY_ISSUER_NAME: &str = "Issuer name cannot be empty.";
pub const SUGGEST_DUPLICATE_DOCUMENT: &str = "This document was already stored.";
pub const SUGGEST_NOT_DOCUMENT_OWNER: &str = "You are not the owner of this document.";
pub const SUGGEST_DOCUMENT_NOT_FOUND: &str = "This document does not exist on the ledger.";
pub const SUGGEST_WALLET_UNAVAILABLE: &str = "Install or open a signing provider, then connect it.";
pub const SUGGEST_CONNECTION_REJECTED: &str = "Open the signing provider and approve the connection request.";
pub const SUGGEST_GENERIC: &str = "Check the diagnostic log for more details.";

// === Operation locations used in the error log ===

pub const LOCATION_CONNECT_WALLET: &str = "connectWallet";
pub const LOCATION_LIST_ISSUERS: &str = "listIssuers";
