// tests/gemini_client.rs
//
// Drives GeminiClient against a throwaway local server standing in for the API.

use std::sync::{Arc, Mutex};

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use mindreader::gemini::{GeminiClient, GenerationClient, GenerationError};

#[derive(Debug, Clone)]
struct Seen {
    api_key: Option<String>,
    body: Value,
}

/// Serve one canned status/body on the generateContent route. Returns the base URL.
async fn spawn_fake(status: StatusCode, body: &'static str) -> (String, Arc<Mutex<Vec<Seen>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = Router::new().route(
        "/v1beta/models/{*rest}",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(Seen {
                    api_key: headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: request,
                });
                (status, [("content-type", "application/json")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

#[tokio::test]
async fn test_success_returns_text_and_sends_prompt() {
    let (base_url, seen) = spawn_fake(
        StatusCode::OK,
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"**【表面官方說法】**"},{"text":" 尊重 "}]},"finishReason":"STOP"}]}"#,
    )
    .await;

    let client = GeminiClient::new("secret-key".to_string(), base_url, "gemini-1.5-flash")
        .with_temperature(Some(1.1));
    let text = client.generate("針對人物「蔣萬安」").await.unwrap();
    assert_eq!(text, "**【表面官方說法】** 尊重 ");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].api_key.as_deref(), Some("secret-key"));
    assert_eq!(seen[0].body["contents"][0]["parts"][0]["text"], json!("針對人物「蔣萬安」"));
    assert!(seen[0].body["generationConfig"]["temperature"].is_number());
}

#[tokio::test]
async fn test_forbidden_is_unauthorized() {
    let (base_url, seen) = spawn_fake(
        StatusCode::FORBIDDEN,
        r#"{"error":{"code":403,"message":"API key not valid. Please pass a valid API key.","status":"PERMISSION_DENIED"}}"#,
    )
    .await;

    let client = GeminiClient::new("bad-key".to_string(), base_url, "gemini-1.5-flash");
    let err = client.generate("prompt").await.unwrap_err();

    assert!(matches!(err, GenerationError::Unauthorized { status: 403, .. }));
    assert!(err.to_string().contains("API key not valid"));
    assert!(!err.to_string().contains("bad-key"));
    // Single attempt, no retry
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rate_limited_is_quota() {
    let (base_url, seen) = spawn_fake(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error":{"code":429,"message":"Resource has been exhausted (e.g. check quota).","status":"RESOURCE_EXHAUSTED"}}"#,
    )
    .await;

    let client = GeminiClient::new("k".to_string(), base_url, "gemini-1.5-flash");
    let err = client.generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::QuotaExceeded { .. }));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_garbage_body_is_malformed() {
    let (base_url, _seen) = spawn_fake(StatusCode::OK, "not json at all").await;

    let client = GeminiClient::new("k".to_string(), base_url, "gemini-1.5-flash");
    assert!(matches!(client.generate("prompt").await, Err(GenerationError::Malformed(_))));
}

#[tokio::test]
async fn test_blocked_prompt() {
    let (base_url, _seen) = spawn_fake(StatusCode::OK, r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).await;

    let client = GeminiClient::new("k".to_string(), base_url, "gemini-1.5-flash");
    let err = client.generate("prompt").await.unwrap_err();
    assert_eq!(err.to_string(), "prompt blocked: SAFETY");
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new("secret-key".to_string(), format!("http://{}", addr), "gemini-1.5-flash");
    let err = client.generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::Transport(_)));
    assert!(!err.to_string().contains("secret-key"));
}
