//! The optimistic send flow: append, roll back on failure, reveal on success.

use std::sync::Arc;

use tracing::debug;

use crate::typing::{CompleteFn, TickFn};
use crate::{Message, Role, SendError};

use super::client::ChatSessionClient;
use super::types::SendOutcome;

impl ChatSessionClient {
    /// Submit a user message.
    ///
    /// Blank input or a missing session id is a no-op. On success the user
    /// message is visible immediately and the assistant reply is revealed one
    /// character at a time; once the reveal completes, the transcript is
    /// replaced by the backend's authoritative copy verbatim and `loading`
    /// clears. On any failure the transcript is rolled back to its pre-call
    /// value and the error slot is set. `loading` stays true for the whole
    /// send, animation included.
    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        let text = text.trim();

        // Validate before touching anything: a no-op send must leave an
        // in-flight reveal running.
        if text.is_empty() || self.state.lock().unwrap().session_id.is_empty() {
            return SendOutcome::Ignored;
        }

        // A reveal from an earlier send must not outlive this one.
        self.cancel_active();

        let (session_id, previous, epoch) = {
            let mut state = self.state.lock().unwrap();
            state.epoch += 1;
            state.error = None;
            state.loading = true;
            let previous = state.transcript.clone();
            state.transcript.push(Message::user(text));
            (state.session_id.clone(), previous, state.epoch)
        };

        debug!(session = %session_id, "sending chat message");

        let history = match self.backend.send_chat(&session_id, text).await {
            Ok(history) => history,
            Err(e) => {
                let error = SendError::from(&e);
                debug!(error = %e, "send failed, rolling back");
                let mut state = self.state.lock().unwrap();
                state.transcript = previous;
                state.error = Some(error);
                state.loading = false;
                return SendOutcome::Failed(error);
            }
        };

        let reply = history
            .last()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| m.content.clone());

        let reply = match reply {
            Some(reply) => reply,
            None => {
                // Nothing to animate; install the authoritative transcript as-is.
                let mut state = self.state.lock().unwrap();
                state.transcript = history;
                state.loading = false;
                return SendOutcome::Sent;
            }
        };

        // Seed the reveal: optimistic user message plus an empty assistant
        // message the ticks will grow.
        self.state
            .lock()
            .unwrap()
            .transcript
            .push(Message::assistant(""));

        let tick_state = Arc::clone(&self.state);
        let on_tick: TickFn = Box::new(move |ch| {
            let mut state = tick_state.lock().unwrap();
            if state.epoch != epoch {
                return;
            }
            if let Some(last) = state.transcript.last_mut() {
                if last.role == Role::Assistant {
                    last.content.push(ch);
                }
            }
        });

        let done_state = Arc::clone(&self.state);
        let on_complete: CompleteFn = Box::new(move || {
            let mut state = done_state.lock().unwrap();
            if state.epoch != epoch {
                return;
            }
            // Authoritative swap: the settled transcript is the backend's
            // exact copy, whatever the per-character build produced.
            state.transcript = history;
            state.loading = false;
        });

        self.active = Some(self.typewriter.start(reply, on_tick, on_complete));
        SendOutcome::Sent
    }
}
