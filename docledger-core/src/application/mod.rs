//! Application layer: the session and the components it orchestrates.

pub mod issuer_cache;
pub mod lifecycle;
pub mod observer;
pub mod session;
pub mod source;

pub use issuer_cache::IssuerCache;
pub use lifecycle::{TransactionLifecycle, WriteRequest};
pub use observer::{CompositeObserver, JournalObserver, LifecycleObserver, NoopObserver};
pub use session::LedgerSession;
pub use source::DocumentSource;
