//! Shared vocabulary for the Gold Dust economy layer.
//!
//! Every other crate in the workspace speaks in terms of these types:
//!
//! - **Identity** ([`PlayerKey`], [`SessionId`], [`GameId`]) — how a
//!   record is located.
//! - **Collections** ([`Collection`]) — the three logical tables and the
//!   fields that make up their identity keys.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how typed records are
//!   turned into store [`Document`]s and back.
//! - **Errors** ([`ModelError`]).
//!
//! # Architecture
//!
//! ```text
//! Managers (session / ledger / roster)
//!     ↕  typed records
//! Model (this crate)  ← identity types, codec
//!     ↕  Documents
//! Store (below)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, Document, JsonCodec};
pub use error::ModelError;
pub use types::{Collection, GameId, PlayerKey, SessionId, Timestamp};
