//! Signing capability: providers and the session-wide active identity.

pub mod provider;
pub mod session;

pub use provider::{AccessDecision, ActiveSigner, LocalKeyProvider, SigningProvider, StaticProvider};
pub use session::WalletSession;
