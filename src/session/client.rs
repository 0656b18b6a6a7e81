//! ChatSessionClient struct, construction, initialize and reset.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::storage::KeyValueStore;
use crate::typing::{Typewriter, TypewriterHandle};
use crate::ChatBackend;

use super::types::{generate_session_id, ClientState, Snapshot, SESSION_ID_KEY};

/// Client-side owner of session identity, transcript state, and the
/// send/animate/reset workflow.
///
/// All backend failures are absorbed here: they surface through the
/// snapshot's single error slot, never as `Err` values.
pub struct ChatSessionClient {
    pub(super) state: Arc<Mutex<ClientState>>,
    pub(super) backend: Arc<dyn ChatBackend>,
    pub(super) store: Box<dyn KeyValueStore>,
    pub(super) typewriter: Typewriter,
    pub(super) active: Option<TypewriterHandle>,
}

impl ChatSessionClient {
    pub fn new(backend: Arc<dyn ChatBackend>, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClientState::empty())),
            backend,
            store,
            typewriter: Typewriter::default(),
            active: None,
        }
    }

    /// Override the reveal cadence (tests use a fast one).
    pub fn with_typewriter(mut self, typewriter: Typewriter) -> Self {
        self.typewriter = typewriter;
        self
    }

    /// Load or mint the session id, then pull the transcript for it.
    ///
    /// A failed history fetch is non-fatal: it is logged and the transcript
    /// starts empty.
    pub async fn initialize(&mut self) {
        let session_id = match self.store.get(SESSION_ID_KEY) {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = generate_session_id();
                if let Err(e) = self.store.set(SESSION_ID_KEY, &id) {
                    warn!(error = %e, "failed to persist session id");
                }
                id
            }
        };

        debug!(session = %session_id, "initializing session");

        let history = match self.backend.fetch_history(&session_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "history fetch failed, starting empty");
                Vec::new()
            }
        };

        let mut state = self.state.lock().unwrap();
        state.session_id = session_id;
        state.transcript = history;
    }

    /// Replace the session: best-effort backend clear, fresh id, clean slate.
    ///
    /// Always succeeds from the caller's perspective; a failed backend clear
    /// is logged and ignored.
    pub async fn reset(&mut self) {
        self.cancel_active();

        let old_id = self.state.lock().unwrap().session_id.clone();
        if !old_id.is_empty() {
            if let Err(e) = self.backend.clear_session(&old_id).await {
                warn!(error = %e, session = %old_id, "session clear failed, proceeding");
            }
        }

        let new_id = generate_session_id();
        if let Err(e) = self.store.set(SESSION_ID_KEY, &new_id) {
            warn!(error = %e, "failed to persist session id");
        }

        debug!(old = %old_id, new = %new_id, "session reset");

        let mut state = self.state.lock().unwrap();
        state.epoch += 1;
        state.session_id = new_id;
        state.transcript.clear();
        state.error = None;
        state.loading = false;
    }

    /// Wait for an in-flight typewriter reveal to finish. Returns immediately
    /// when nothing is animating.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.finished().await;
        }
    }

    /// Point-in-time view of the UI-relevant state.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().unwrap();
        Snapshot {
            session_id: state.session_id.clone(),
            transcript: state.transcript.clone(),
            loading: state.loading,
            error: state.error,
        }
    }

    pub(super) fn cancel_active(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }
}
