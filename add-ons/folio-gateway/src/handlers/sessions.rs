//! Chat session endpoints: one [`ChatSession`] per open widget, kept in memory only.
//!
//! Replies wait for the session's typing delay without holding the session lock, so a
//! `GET` during the pause sees the user turn and `"typing": true`. A reply whose client
//! disconnects during that delay is dropped with the request and appends nothing.
//!
//! Sessions idle longer than the configured limit are dropped when a new one opens, and the
//! least recently used session goes once the cap is reached.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use folio_core::{ChatSession, Responder, TypingDelay};
use futures_util::stream::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

use crate::AppState;

struct SessionSlot {
    session: Arc<Mutex<ChatSession>>,
    last_active: Instant,
}

/// Live sessions keyed by id.
pub(crate) struct SessionRegistry {
    responder: Arc<Responder>,
    delay: TypingDelay,
    idle_ttl: Duration,
    max_sessions: usize,
    sessions: DashMap<Uuid, SessionSlot>,
}

impl SessionRegistry {
    pub(crate) fn new(
        responder: Arc<Responder>,
        delay: TypingDelay,
        idle_ttl: Duration,
        max_sessions: usize,
    ) -> Self {
        Self {
            responder,
            delay,
            idle_ttl,
            max_sessions: max_sessions.max(1),
            sessions: DashMap::new(),
        }
    }

    fn open(&self) -> Arc<Mutex<ChatSession>> {
        self.evict_idle();
        while self.sessions.len() >= self.max_sessions {
            if !self.evict_least_recent() {
                break;
            }
        }

        let session = ChatSession::new(Arc::clone(&self.responder), self.delay);
        let id = session.id();
        let session = Arc::new(Mutex::new(session));
        self.sessions.insert(
            id,
            SessionSlot {
                session: Arc::clone(&session),
                last_active: Instant::now(),
            },
        );
        session
    }

    // Clones the handle so no map guard is held across an await.
    fn get(&self, id: &Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.get_mut(id).map(|mut slot| {
            slot.last_active = Instant::now();
            Arc::clone(&slot.session)
        })
    }

    fn close(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    fn evict_idle(&self) {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, slot| now.duration_since(slot.last_active) < self.idle_ttl);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::info!(target: "folio::chat", evicted, "Idle chat sessions dropped");
        }
    }

    fn evict_least_recent(&self) -> bool {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.value().last_active)
            .map(|entry| *entry.key());
        match oldest {
            Some(id) => {
                tracing::info!(target: "folio::chat", session_id = %id, "Session cap reached, dropping least recent");
                self.sessions.remove(&id).is_some()
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[derive(Deserialize)]
pub(crate) struct SendRequest {
    content: String,
    #[serde(default)]
    stream: bool,
}

/// POST /api/v1/sessions – opens a session; the transcript starts with the welcome line.
pub(crate) async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let handle = state.sessions.open();
    let session = handle.lock().await;
    tracing::info!(target: "folio::chat", session_id = %session.id(), "Chat session opened");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "session_id": session.id(),
            "messages": session.transcript().messages(),
        })),
    )
}

/// GET /api/v1/sessions/:id – current transcript.
pub(crate) async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let handle = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let session = handle.lock().await;
    Ok(Json(serde_json::json!({
        "session_id": session.id(),
        "typing": session.is_typing(),
        "messages": session.transcript().messages(),
    })))
}

/// POST /api/v1/sessions/:id/messages – append a user turn and return the assistant reply.
pub(crate) async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendRequest>,
) -> Result<Response, StatusCode> {
    if req.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let session = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::info!(
        target: "folio::chat",
        session_id = %id,
        stream = req.stream,
        "Chat message received: {} chars",
        req.content.chars().count()
    );

    if req.stream {
        return Ok(stream_reply(session, req.content));
    }

    let pending = session
        .lock()
        .await
        .begin(&req.content)
        .ok_or(StatusCode::BAD_REQUEST)?;
    let ready = pending.ready().await;
    let message = session.lock().await.deliver(ready);
    Ok(Json(serde_json::json!({
        "session_id": id,
        "message": message,
    }))
    .into_response())
}

/// Streams the reply word by word as plain text once the typing delay has elapsed.
fn stream_reply(session: Arc<Mutex<ChatSession>>, content: String) -> Response {
    use async_stream::stream;

    let stream = stream! {
        let pending = session.lock().await.begin(&content);
        if let Some(pending) = pending {
            let ready = pending.ready().await;
            let message = session.lock().await.deliver(ready);
            for chunk in message.content.split_inclusive(' ') {
                yield chunk.to_string();
            }
        }
    };

    let body = Body::from_stream(stream.map(Ok::<_, std::convert::Infallible>));
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

/// DELETE /api/v1/sessions/:id – closes the widget. A reply still pending lands in a detached transcript.
pub(crate) async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.sessions.close(&id) {
        tracing::info!(target: "folio::chat", session_id = %id, "Chat session closed");
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(idle_secs: u64, max_sessions: usize) -> SessionRegistry {
        SessionRegistry::new(
            Arc::new(Responder::builtin()),
            TypingDelay::none(),
            Duration::from_secs(idle_secs),
            max_sessions,
        )
    }

    async fn id_of(session: &Arc<Mutex<ChatSession>>) -> Uuid {
        session.lock().await.id()
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_dropped_when_another_opens() {
        let reg = registry(60, 100);
        let stale = id_of(&reg.open()).await;
        let touched = id_of(&reg.open()).await;

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(reg.get(&touched).is_some());
        tokio::time::advance(Duration::from_secs(30)).await;

        let fresh = id_of(&reg.open()).await;
        assert!(reg.get(&stale).is_none());
        assert!(reg.get(&touched).is_some());
        assert!(reg.get(&fresh).is_some());
        assert_eq!(reg.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cap_drops_least_recently_used_session() {
        let reg = registry(3600, 2);
        let first = id_of(&reg.open()).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        let second = id_of(&reg.open()).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(reg.get(&first).is_some());
        tokio::time::advance(Duration::from_secs(1)).await;

        let third = id_of(&reg.open()).await;
        assert_eq!(reg.len(), 2);
        assert!(reg.get(&second).is_none());
        assert!(reg.get(&first).is_some());
        assert!(reg.get(&third).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_opens_stay_within_cap() {
        let reg = registry(3600, 8);
        for _ in 0..100 {
            reg.open();
        }
        assert_eq!(reg.len(), 8);
    }
}
