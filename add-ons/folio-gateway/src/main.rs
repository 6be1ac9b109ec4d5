//! Axum-based portfolio gateway: serves the profile, the FAQ chat and (optionally) the static page.

mod handlers;

use axum::{
    extract::{Json, State},
    http::Method,
    routing::{get, post},
    Router,
};
use folio_core::{rule_count, CoreConfig, Responder, Topic, TypingDelay};
use handlers::sessions::{self, SessionRegistry};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pre-flight check: config loads, the topic table compiles, and the port is free.
fn run_verify() -> Result<(), String> {
    print!("Checking config... ");
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;
    println!("OK ({})", config.app_name);

    print!("Checking responder rules... ");
    let rules = rule_count();
    if rules != Topic::ALL.len() {
        return Err(format!("expected {} rules, compiled {}", Topic::ALL.len(), rules));
    }
    println!("OK ({} topics)", rules);

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\n✅ SUCCESS: Ready to start gateway.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[folio-gateway] .env not loaded: {} (using system environment)", e);
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("❌ PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load()?);
    let responder = Arc::new(Responder::builtin());
    tracing::info!(
        target: "folio::gateway",
        topics = rule_count(),
        projects = responder.profile().projects.len(),
        "Knowledge store loaded for {}",
        responder.profile().name
    );

    let app = build_app(AppState::new(Arc::clone(&config), responder));

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} listening on {}", config.app_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) responder: Arc<Responder>,
    pub(crate) sessions: Arc<SessionRegistry>,
}

impl AppState {
    fn new(config: Arc<CoreConfig>, responder: Arc<Responder>) -> Self {
        let sessions = Arc::new(SessionRegistry::new(
            Arc::clone(&responder),
            TypingDelay::from_config(&config),
            Duration::from_secs(config.session_idle_secs),
            config.max_sessions,
        ));
        Self {
            config,
            responder,
            sessions,
        }
    }
}

fn frontend_root_dir() -> PathBuf {
    // Prefer the working directory (run from workspace root), else workspace root relative to this crate.
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let from_cwd = cwd.join("site");
    if from_cwd.exists() {
        return from_cwd;
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("site")
}

fn build_app(state: AppState) -> Router {
    let frontend_enabled = state.config.frontend_enabled;

    // CORS: allow Backend/API (8001-8099) and Frontend/UI (3001-3099) port ranges.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &axum::http::HeaderValue, _| {
            let s = origin.to_str().unwrap_or("");
            let port = s
                .split(':')
                .last()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(0);
            (3001..=3099).contains(&port) || (8001..=8099).contains(&port)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS, Method::DELETE])
        .allow_headers(tower_http::cors::Any);

    let mut app = Router::new()
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .route("/api/v1/profile", get(profile))
        .route("/api/v1/ask", post(ask))
        .route("/api/v1/sessions", post(sessions::create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::get_session).delete(sessions::close_session),
        )
        .route("/api/v1/sessions/:id/messages", post(sessions::post_message))
        .with_state(state);

    if frontend_enabled {
        let frontend_dir = frontend_root_dir();
        let index_file = frontend_dir.join("index.html");
        let assets_dir = frontend_dir.join("assets");

        app = app.route_service("/", ServeFile::new(index_file));

        if assets_dir.exists() {
            app = app.nest_service("/assets", ServeDir::new(assets_dir));
        }
    }

    app.layer(cors)
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – app identity, chat pacing and the topic table.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let topics: Vec<&str> = Topic::ALL.iter().map(Topic::as_str).collect();
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "typing_delay_ms": state.config.typing_delay_ms,
        "typing_jitter_ms": state.config.typing_jitter_ms,
        "frontend_enabled": state.config.frontend_enabled,
        "topics": topics,
        "open_sessions": state.sessions.len(),
        "max_sessions": state.config.max_sessions,
    }))
}

/// GET /api/v1/profile – the knowledge store the page sections render from.
async fn profile(State(state): State<AppState>) -> axum::Json<folio_core::Profile> {
    axum::Json(state.responder.profile().clone())
}

#[derive(Deserialize)]
struct AskRequest {
    query: String,
}

/// POST /api/v1/ask – one-shot, stateless answer with no typing delay.
async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> axum::Json<serde_json::Value> {
    let topic = state.responder.classify(&req.query);
    let response = state.responder.respond(&req.query);
    tracing::info!(
        target: "folio::gateway",
        topic = topic.map(|t| t.as_str()).unwrap_or("fallback"),
        "Ask request answered"
    );
    axum::Json(serde_json::json!({
        "topic": topic,
        "response": response,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_config() -> CoreConfig {
        CoreConfig {
            app_name: "Test Gateway".to_string(),
            port: 8001,
            typing_delay_ms: 0,
            typing_jitter_ms: 0,
            session_idle_secs: 1800,
            max_sessions: 1000,
            frontend_enabled: false,
        }
    }

    fn test_app(config: CoreConfig) -> Router {
        build_app(AppState::new(Arc::new(config), Arc::new(Responder::builtin())))
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let res = test_app(test_config())
            .oneshot(empty_request("GET", "/api/v1/health"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_returns_app_identity_and_topics() {
        let config = CoreConfig {
            app_name: "Sujith's Portfolio".to_string(),
            port: 4000,
            ..test_config()
        };
        let res = test_app(config)
            .oneshot(empty_request("GET", "/v1/status"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["app_name"], "Sujith's Portfolio");
        assert_eq!(json["port"], 4000);
        assert_eq!(json["topics"][0], "greeting");
        assert_eq!(json["topics"].as_array().unwrap().len(), Topic::ALL.len());
        assert_eq!(json["open_sessions"], 0);
    }

    #[tokio::test]
    async fn test_profile_lists_projects_in_order() {
        let res = test_app(test_config())
            .oneshot(empty_request("GET", "/api/v1/profile"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["name"], "Sujith S");
        assert_eq!(json["projects"][0]["name"], "Nanban Fund");
        assert_eq!(json["projects"][4]["name"], "Greenly");
        assert_eq!(json["skills"][0]["label"], "AI/ML");
    }

    #[tokio::test]
    async fn test_ask_returns_topic_and_response() {
        let app = test_app(test_config());
        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/ask",
                serde_json::json!({ "query": "Tell me about Nanban Fund" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["topic"], "nanban_fund");
        assert!(json["response"].as_str().unwrap().starts_with("**Nanban Fund**"));

        let res = app
            .oneshot(json_request("POST", "/api/v1/ask", serde_json::json!({ "query": "   " })))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert!(json["topic"].is_null());
        assert_eq!(json["response"], folio_core::respond(""));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = test_app(test_config());

        let res = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/sessions"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let json = body_json(res).await;
        let id = json["session_id"].as_str().unwrap().to_string();
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "assistant");

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{}/messages", id),
                serde_json::json!({ "content": "What projects has he built?" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json["message"]["role"], "assistant");
        assert_eq!(
            json["message"]["content"],
            folio_core::respond("What projects has he built?")
        );

        let res = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{}", id)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "What projects has he built?");
        assert_eq!(json["typing"], false);

        let res = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/v1/sessions/{}", id)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{}", id)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_reports_typing_while_reply_pending() {
        let config = CoreConfig {
            typing_delay_ms: 300,
            ..test_config()
        };
        let app = test_app(config);
        let res = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/sessions"))
            .await
            .unwrap();
        let id = body_json(res).await["session_id"].as_str().unwrap().to_string();

        let post = app.clone().oneshot(json_request(
            "POST",
            &format!("/api/v1/sessions/{}/messages", id),
            serde_json::json!({ "content": "contact" }),
        ));
        let mid_delay = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let started = tokio::time::Instant::now();
            let res = app
                .clone()
                .oneshot(empty_request("GET", &format!("/api/v1/sessions/{}", id)))
                .await
                .unwrap();
            assert!(started.elapsed() < Duration::from_millis(250));
            body_json(res).await
        };
        let (posted, snapshot) = tokio::join!(post, mid_delay);

        assert_eq!(snapshot["typing"], true);
        let messages = snapshot["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "contact");

        assert_eq!(posted.unwrap().status(), StatusCode::OK);
        let res = app
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{}", id)))
            .await
            .unwrap();
        let json = body_json(res).await;
        assert_eq!(json["typing"], false);
        assert_eq!(json["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_message_rejected_and_transcript_untouched() {
        let app = test_app(test_config());
        let res = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/sessions"))
            .await
            .unwrap();
        let id = body_json(res).await["session_id"].as_str().unwrap().to_string();

        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{}/messages", id),
                serde_json::json!({ "content": "  \n " }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .oneshot(empty_request("GET", &format!("/api/v1/sessions/{}", id)))
            .await
            .unwrap();
        assert_eq!(body_json(res).await["messages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = test_app(test_config());
        let missing = uuid::Uuid::new_v4();
        let res = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{}/messages", missing),
                serde_json::json!({ "content": "hi" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .oneshot(empty_request("DELETE", &format!("/api/v1/sessions/{}", missing)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_streamed_reply_concatenates_to_full_response() {
        let app = test_app(test_config());
        let res = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/sessions"))
            .await
            .unwrap();
        let id = body_json(res).await["session_id"].as_str().unwrap().to_string();

        let res = app
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{}/messages", id),
                serde_json::json!({ "content": "What are your skills?", "stream": true }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(text, folio_core::respond("What are your skills?"));
    }

    #[tokio::test]
    async fn test_frontend_index_served_when_enabled() {
        let config = CoreConfig {
            frontend_enabled: true,
            ..test_config()
        };
        let res = test_app(config)
            .oneshot(empty_request("GET", "/"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/v1/sessions"));
        assert!(html.contains("id=\"typing\""));
        assert!(html.contains("p.certifications"));
    }
}
