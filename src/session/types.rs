//! Support types for the session client.

use rand::Rng;

use crate::{Message, SendError};

/// Storage key under which the session id is persisted.
pub(crate) const SESSION_ID_KEY: &str = "chatline.session_id";

/// Generate a random 6-digit numeric session id, zero-padded.
pub(crate) fn generate_session_id() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Point-in-time view of the client's UI-relevant state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub session_id: String,
    pub transcript: Vec<Message>,
    pub loading: bool,
    pub error: Option<SendError>,
}

/// Terminal outcome of a `send_message` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or no active session; state untouched.
    Ignored,
    /// The round trip succeeded. A UI should clear its input field.
    Sent,
    /// The round trip failed and the transcript was rolled back.
    Failed(SendError),
}

/// Mutable client state, shared with the typewriter task.
pub(super) struct ClientState {
    pub(super) session_id: String,
    pub(super) transcript: Vec<Message>,
    pub(super) loading: bool,
    pub(super) error: Option<SendError>,
    /// Bumped on every send and reset. A stale typewriter tick or completion
    /// compares its captured epoch and backs off.
    pub(super) epoch: u64,
}

impl ClientState {
    pub(super) fn empty() -> Self {
        Self {
            session_id: String::new(),
            transcript: Vec::new(),
            loading: false,
            error: None,
            epoch: 0,
        }
    }
}
