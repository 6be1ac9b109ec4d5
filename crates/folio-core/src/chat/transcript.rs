//! Chat turns and the append-only transcript a session writes them to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat turn. `content` may contain literal newlines that the UI must keep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    /// Unix timestamp (milliseconds) when the turn was appended.
    pub sent_at_ms: i64,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        let sent_at_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            sent_at_ms,
        }
    }
}

/// Append-only, ordered list of chat turns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.messages.push(Message::new(role, content));
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_order_and_content() {
        let mut t = Transcript::new();
        assert!(t.is_empty());
        t.push(Role::User, "hi");
        let reply = t.push(Role::Assistant, "line one\nline two").clone();
        assert_eq!(t.len(), 2);
        assert_eq!(t.messages()[0].role, Role::User);
        assert_eq!(t.last().map(|m| m.id), Some(reply.id));
        assert_eq!(reply.content, "line one\nline two");
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = Message::new(Role::Assistant, "x");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "x");
    }
}
