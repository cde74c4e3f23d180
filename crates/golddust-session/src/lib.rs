//! Player session management for Gold Dust.
//!
//! A session is a time-bounded opaque token proving that requests come
//! from the same `(wallet, email)` player. This crate handles:
//!
//! 1. **Issuing** — the first request for a player creates a session
//! 2. **Reuse** — later requests get the same token while it's valid
//! 3. **Rotation** — an expired token is replaced on the next request,
//!    and [`SessionManager::refresh`] replaces it unconditionally
//! 4. **Validation** — checking a presented token against the stored one
//!
//! # How it fits in the stack
//!
//! ```text
//! Economy (above)  ← hands out one SessionManager per store
//!     ↕
//! Session Layer (this crate)  ← session lifecycle rules
//!     ↕
//! Store (below)  ← sessionLogs collection
//! ```
//!
//! Expiry is a predicate on `expiresAt` evaluated at read time. Nothing
//! in this crate deletes sessions.

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{SessionConfig, SessionRecord, SessionStatus};
