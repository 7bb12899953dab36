use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use kaiwatore::config::CoachConfig;
use kaiwatore::providers::CompletionProvider;
use kaiwatore::server::{build_router, AppState};
use kaiwatore::session::{Role, SessionStore};
use kaiwatore::test_utils::{FailingProvider, ScriptedProvider};
use kaiwatore::coach::{ImpressionSummarizer, TurnOrchestrator};

fn app_with(provider: Arc<dyn CompletionProvider>) -> (Router, SessionStore) {
    let store = SessionStore::new();
    let state = Arc::new(AppState {
        store: store.clone(),
        orchestrator: TurnOrchestrator::new(
            provider.clone(),
            store.clone(),
            &CoachConfig::default(),
        ),
        summarizer: ImpressionSummarizer::new(provider, store.clone(), Some(1)),
    });
    let router = build_router(state, "http://localhost:3000").unwrap();
    (router, store)
}

async fn send_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_liveness_body() {
    let (router, _) = app_with(Arc::new(FailingProvider));

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "kaiwatore API is running! 🍾");
}

#[tokio::test]
async fn test_create_session_returns_id_and_timestamp() {
    let (router, store) = app_with(Arc::new(FailingProvider));

    let (status, body) = send_json(&router, "/api/session/create", json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let session_id = body["session_id"].as_str().unwrap();
    assert!(!session_id.is_empty());
    assert!(body["created_at"].is_string());
    assert!(store.contains(session_id));
}

#[tokio::test]
async fn test_message_unknown_session_is_404() {
    let (router, _) = app_with(Arc::new(FailingProvider));

    let (status, body) = send_json(
        &router,
        "/api/conversation/message",
        json!({"session_id": "missing", "user_message": "こんにちは"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Session not found");
}

#[tokio::test]
async fn test_end_unknown_session_is_404() {
    let (router, _) = app_with(Arc::new(FailingProvider));

    let (status, body) = send_json(
        &router,
        "/api/conversation/end",
        json!({"session_id": "missing"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Session not found");
}

#[tokio::test]
async fn test_message_flow_appends_three_turns_per_message() {
    // Two messages, three provider calls each: emotion, reply, feedback
    let provider = Arc::new(ScriptedProvider::with_responses([
        "喜び",
        "ほんまに？ええやん！",
        "【みおの気持ち】\n喜んでるで。",
        "中立",
        "そうなんや〜",
        "【みおの気持ち】\n普通やで。",
    ]));
    let (router, store) = app_with(provider);

    let (_, created) = send_json(&router, "/api/session/create", json!({})).await;
    let session_id = created["session_id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &router,
        "/api/conversation/message",
        json!({
            "session_id": session_id,
            "user_message": "昨日は映画を観てきたんですよ",
            "conversation_history": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bot_response"], "ほんまに？ええやん！");
    assert_eq!(body["detected_patterns"], json!(["喜び"]));

    let (status, _) = send_json(
        &router,
        "/api/conversation/message",
        json!({"session_id": session_id, "user_message": "来週もまた行くつもりなんです"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 3N growth in strict user/bot/voice order
    let history = store.history(&session_id).unwrap();
    assert_eq!(history.len(), 6);
    for chunk in history.chunks(3) {
        assert_eq!(chunk[0].role, Role::User);
        assert_eq!(chunk[1].role, Role::Bot);
        assert_eq!(chunk[2].role, Role::Voice);
    }
}

#[tokio::test]
async fn test_end_returns_impression_shape() {
    // One message (three calls), then the impression call
    let provider = Arc::new(ScriptedProvider::with_responses([
        "喜び",
        "めっちゃええやん！",
        "【みおの気持ち】\n喜んでるで。",
        "今日は楽しかったわ〜！また来てな！",
    ]));
    let (router, _) = app_with(provider);

    let (_, created) = send_json(&router, "/api/session/create", json!({})).await;
    let session_id = created["session_id"].as_str().unwrap().to_string();

    send_json(
        &router,
        "/api/conversation/message",
        json!({"session_id": session_id, "user_message": "今日はありがとう、楽しかったです！"}),
    )
    .await;

    let (status, body) = send_json(
        &router,
        "/api/conversation/end",
        json!({"session_id": session_id}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["impression_text"], "今日は楽しかったわ〜！また来てな！");
    assert!(body["emotion_scores"].is_object());
    assert!(body["memorable_moments"].is_array());
    let want = body["want_to_talk_again"].as_i64().unwrap();
    assert!((10..=95).contains(&want));
}

#[tokio::test]
async fn test_degraded_provider_still_serves() {
    // Every provider call fails; the API must still answer with fallbacks
    let (router, _) = app_with(Arc::new(FailingProvider));

    let (_, created) = send_json(&router, "/api/session/create", json!({})).await;
    let session_id = created["session_id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &router,
        "/api/conversation/message",
        json!({"session_id": session_id, "user_message": "昨日は映画を観てきたんですよ"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bot_response"], "えーっと、ちょっと考えちゃった〜💦");
    assert_eq!(body["voice_feedback"], "");
    assert_eq!(body["detected_patterns"], json!(["中立"]));

    let (status, body) = send_json(
        &router,
        "/api/conversation/end",
        json!({"session_id": session_id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["impression_text"].as_str().unwrap().is_empty());
}
