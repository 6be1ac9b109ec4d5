//! Chat widget state: an append-only transcript plus a session that answers after a
//! simulated typing pause.

mod session;
mod transcript;

pub use session::{ChatSession, PendingReply, ReadyReply, TypingDelay};
pub use transcript::{Message, Role, Transcript};
