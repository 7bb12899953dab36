//! HTTP transport for Kaiwatore
//!
//! Thin axum layer over the coach pipeline: request DTOs in, pipeline
//! call, response DTOs out. Wire field names match what the frontend
//! already sends (`session_id`, `user_message`, `conversation_history`),
//! and the client-supplied history is accepted but ignored because the
//! server-side store is authoritative.

use crate::coach::{EmotionLabel, ImpressionResult, ImpressionSummarizer, TurnOrchestrator};
use crate::config::Config;
use crate::error::{KaiwatoreError, Result};
use crate::providers::create_provider;
use crate::session::SessionStore;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state handed to every handler
pub struct AppState {
    /// Session store; also reachable through the pipeline components
    pub store: SessionStore,
    /// Per-message pipeline
    pub orchestrator: TurnOrchestrator,
    /// End-of-session summarizer
    pub summarizer: ImpressionSummarizer,
}

impl AppState {
    /// Wires the full pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the configured provider cannot be constructed
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.provider)?;
        let store = SessionStore::new();
        let orchestrator =
            TurnOrchestrator::new(provider.clone(), store.clone(), &config.coach);
        let summarizer =
            ImpressionSummarizer::new(provider, store.clone(), config.coach.rng_seed);
        Ok(Self {
            store,
            orchestrator,
            summarizer,
        })
    }
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct CreateSessionResponse {
    session_id: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ConversationRequest {
    session_id: String,
    user_message: String,
    /// Accepted for wire compatibility; the store is authoritative
    #[serde(default)]
    #[allow(dead_code)]
    conversation_history: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ConversationResponse {
    bot_response: String,
    voice_feedback: String,
    detected_patterns: Vec<EmotionLabel>,
}

#[derive(Debug, Deserialize)]
struct ConversationEndRequest {
    session_id: String,
}

/// Error wrapper mapping pipeline failures onto HTTP statuses
struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0.downcast_ref::<KaiwatoreError>() {
            Some(KaiwatoreError::SessionNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Session not found".to_string())
            }
            _ => {
                tracing::error!("Request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

/// Builds the application router with CORS and request tracing
///
/// # Errors
///
/// Returns error if the configured frontend origin is not a valid
/// header value
pub fn build_router(state: Arc<AppState>, frontend_origin: &str) -> Result<Router> {
    let mut origins = vec![HeaderValue::from_str(frontend_origin).map_err(|_| {
        KaiwatoreError::Config(format!("Invalid frontend origin: {}", frontend_origin))
    })?];
    // The local dev origin stays allowed alongside the configured one
    if frontend_origin != "http://localhost:3000" {
        origins.push(HeaderValue::from_static("http://localhost:3000"));
    }

    // Credentials rule out wildcards, so methods and headers mirror the
    // preflight request instead
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(root))
        .route("/api/session/create", post(create_session))
        .route("/api/conversation/message", post(send_message))
        .route("/api/conversation/end", post(end_conversation))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Runs the HTTP server until shutdown
///
/// # Errors
///
/// Returns error on provider construction, bind, or serve failure
pub async fn run(config: Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let router = build_router(state, &config.server.frontend_origin)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Kaiwatore listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "kaiwatore API is running! 🍾",
    })
}

async fn create_session(State(state): State<Arc<AppState>>) -> Json<CreateSessionResponse> {
    let session = state.store.create();
    Json(CreateSessionResponse {
        session_id: session.id,
        created_at: session.created_at,
    })
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConversationRequest>,
) -> std::result::Result<Json<ConversationResponse>, ApiError> {
    let outcome = state
        .orchestrator
        .process_message(&request.session_id, &request.user_message)
        .await?;

    Ok(Json(ConversationResponse {
        bot_response: outcome.bot_reply,
        voice_feedback: outcome.voice_feedback,
        detected_patterns: vec![outcome.emotion],
    }))
}

async fn end_conversation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConversationEndRequest>,
) -> std::result::Result<Json<ImpressionResult>, ApiError> {
    let result = state.summarizer.summarize(&request.session_id).await?;
    Ok(Json(result))
}
