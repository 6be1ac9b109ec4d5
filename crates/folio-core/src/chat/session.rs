//! One chat session: user turns, the typing pause and the assistant reply.

use super::transcript::{Message, Role, Transcript};
use crate::responder::Responder;
use crate::shared::CoreConfig;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Simulated "assistant is typing" pause: `base` plus a uniform random extra in `0..=jitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    pub base: Duration,
    pub jitter: Duration,
}

impl TypingDelay {
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            Duration::from_millis(config.typing_delay_ms),
            Duration::from_millis(config.typing_jitter_ms),
        )
    }

    pub fn sample(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self::from_config(&CoreConfig::default())
    }
}

/// Counts one pending reply; the session reads as typing while any guard is alive.
struct TypingGuard(Arc<AtomicUsize>);

impl TypingGuard {
    fn start(pending: &Arc<AtomicUsize>) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(pending))
    }
}

impl Drop for TypingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A user turn that has been recorded and is waiting out the typing delay.
///
/// Holds no borrow of the session, so the caller can release any lock around it while it
/// waits. Dropping it before [`PendingReply::ready`] completes cancels the reply.
pub struct PendingReply {
    session_id: Uuid,
    query: String,
    pause: Duration,
    responder: Arc<Responder>,
    typing: TypingGuard,
}

impl PendingReply {
    /// Sleeps for the sampled pause, then renders the reply text.
    pub async fn ready(self) -> ReadyReply {
        tracing::debug!(
            target: "folio::chat",
            session_id = %self.session_id,
            pause_ms = self.pause.as_millis() as u64,
            "assistant typing"
        );
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        ReadyReply {
            session_id: self.session_id,
            content: self.responder.respond(&self.query),
            _typing: self.typing,
        }
    }
}

/// Reply text whose delay has elapsed, waiting to be appended with [`ChatSession::deliver`].
pub struct ReadyReply {
    session_id: Uuid,
    content: String,
    _typing: TypingGuard,
}

/// One open chat widget: owns its transcript and answers through the shared [`Responder`].
pub struct ChatSession {
    id: Uuid,
    transcript: Transcript,
    responder: Arc<Responder>,
    delay: TypingDelay,
    pending: Arc<AtomicUsize>,
}

impl ChatSession {
    /// New session whose transcript opens with the assistant's welcome line.
    pub fn new(responder: Arc<Responder>, delay: TypingDelay) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(Role::Assistant, responder.welcome());
        Self {
            id: Uuid::new_v4(),
            transcript,
            responder,
            delay,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while at least one reply is waiting out its delay.
    pub fn is_typing(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Appends the user's turn and starts typing. Blank input is ignored (`None`, transcript untouched).
    pub fn begin(&mut self, input: &str) -> Option<PendingReply> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push(Role::User, text);
        Some(PendingReply {
            session_id: self.id,
            query: text.to_string(),
            pause: self.delay.sample(),
            responder: Arc::clone(&self.responder),
            typing: TypingGuard::start(&self.pending),
        })
    }

    /// Appends a finished reply and returns the stored message.
    pub fn deliver(&mut self, reply: ReadyReply) -> Message {
        debug_assert_eq!(reply.session_id, self.id);
        self.transcript.push(Role::Assistant, reply.content.as_str()).clone()
    }

    /// Appends the user's turn, waits the typing delay, then appends and returns the reply.
    ///
    /// Blank input is ignored (`None`, transcript untouched). Dropping the returned future
    /// before the delay elapses leaves the user turn in place and appends no reply.
    pub async fn send(&mut self, input: &str) -> Option<Message> {
        let pending = self.begin(input)?;
        let ready = pending.ready().await;
        Some(self.deliver(ready))
    }
}
