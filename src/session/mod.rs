//! Chat session client.
//!
//! A `ChatSessionClient` owns the session identity, the message transcript,
//! and the send/animate/reset workflow over a `ChatBackend`.

mod client;
mod send;
mod types;

pub use client::ChatSessionClient;
pub use types::{SendOutcome, Snapshot};
