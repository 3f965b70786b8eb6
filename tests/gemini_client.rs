use relaybot::api::{CompletionService, GeminiClient};
use relaybot::error::RelayError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

async fn client_for(server: &MockServer, timeout: Duration) -> GeminiClient {
    GeminiClient::new(
        "test-key",
        &format!("{}/v1beta/", server.uri()),
        "gemini-1.5-flash",
        timeout,
    )
    .unwrap()
}

#[tokio::test]
async fn test_generate_posts_prompt_and_extracts_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [{ "parts": [{ "text": "Reply ONLY in en language." }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "Sure!" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5)).await;
    let reply = client.generate("Reply ONLY in en language.").await.unwrap();

    assert_eq!(reply, "Sure!");
}

#[tokio::test]
async fn test_http_error_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5)).await;
    let err = client.generate("hi").await.unwrap_err();

    match err {
        RelayError::ApiError { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5)).await;
    assert!(matches!(
        client.generate("hi").await,
        Err(RelayError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "candidates": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200)).await;
    assert!(matches!(
        client.generate("hi").await,
        Err(RelayError::Timeout)
    ));
}

#[test]
fn test_generate_url() {
    let client = GeminiClient::new(
        "k",
        "https://generativelanguage.googleapis.com/v1beta/",
        "gemini-1.5-flash",
        Duration::from_secs(1),
    )
    .unwrap();

    assert_eq!(
        client.generate_url(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
    );
}
