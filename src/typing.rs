//! Typewriter reveal of an already-known reply.
//!
//! The reveal is purely cosmetic: the full text is known up front and a
//! spawned task delivers it one character per timer tick. Cancelling the
//! handle stops further ticks and suppresses the completion callback, so a
//! superseded reveal never clobbers newer state.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Per-character tick callback.
pub type TickFn = Box<dyn FnMut(char) + Send>;
/// Fired once after the final character, unless the task was cancelled.
pub type CompleteFn = Box<dyn FnOnce() + Send>;

/// Factory for fixed-interval character reveal tasks.
#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    tick: Duration,
}

impl Typewriter {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    /// Start revealing `text`, one character per tick. Returns a handle that
    /// can cancel the task or await its end.
    pub fn start(&self, text: String, mut on_tick: TickFn, on_complete: CompleteFn) -> TypewriterHandle {
        let token = CancellationToken::new();
        let child = token.clone();
        let tick = self.tick;

        let join = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            for ch in text.chars() {
                tokio::select! {
                    _ = child.cancelled() => return,
                    _ = interval.tick() => on_tick(ch),
                }
            }
            if !child.is_cancelled() {
                on_complete();
            }
        });

        TypewriterHandle { token, join }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(Duration::from_millis(5))
    }
}

/// Handle to an in-flight reveal.
pub struct TypewriterHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl TypewriterHandle {
    /// Stop further ticks. The completion callback will not fire.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for the task to end, whether by completion or cancellation.
    pub async fn finished(self) {
        let _ = self.join.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    fn collector() -> (Arc<Mutex<String>>, TickFn) {
        let revealed = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&revealed);
        let on_tick: TickFn = Box::new(move |ch| sink.lock().unwrap().push(ch));
        (revealed, on_tick)
    }

    #[tokio::test]
    async fn reveals_every_character_then_completes() {
        let (revealed, on_tick) = collector();
        let completed = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&completed);

        let handle = Typewriter::new(Duration::from_millis(1)).start(
            "Top story...".to_string(),
            on_tick,
            Box::new(move || done.store(true, Ordering::SeqCst)),
        );
        handle.finished().await;

        assert_eq!(revealed.lock().unwrap().as_str(), "Top story...");
        assert!(completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn cancel_stops_ticks_and_suppresses_completion() {
        let (revealed, on_tick) = collector();
        let completed = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&completed);

        let text = "a".repeat(1000);
        let handle = Typewriter::new(Duration::from_millis(10)).start(
            text.clone(),
            on_tick,
            Box::new(move || done.store(true, Ordering::SeqCst)),
        );
        handle.cancel();
        handle.finished().await;

        assert!(revealed.lock().unwrap().len() < text.len());
        assert!(!completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn empty_text_completes_immediately() {
        let (revealed, on_tick) = collector();
        let completed = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&completed);

        let handle = Typewriter::default().start(
            String::new(),
            on_tick,
            Box::new(move || done.store(true, Ordering::SeqCst)),
        );
        handle.finished().await;

        assert!(revealed.lock().unwrap().is_empty());
        assert!(completed.load(Ordering::SeqCst));
    }
}
