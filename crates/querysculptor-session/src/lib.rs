//! Session persistence: Redis-primary, in-memory-fallback storage for
//! `QueryState`, keyed by session id. Each save wraps the state in its
//! `Session` envelope (id, created_at, updated_at) before serializing;
//! `load`/`save`'s public signatures still traffic in bare `QueryState` —
//! the envelope is this crate's own bookkeeping, not part of the contract.

mod error;
mod store;

pub use error::SessionError;
pub use store::SessionStore;
