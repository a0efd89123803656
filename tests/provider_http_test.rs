// HTTP-level provider tests against a mock server
//
// These exercise the real request/response path: URL construction, status
// handling, payload extraction and the retry ceiling.

use mockito::Matcher;

use manna::config::ProviderEntry;
use manna::providers::{GeminiClient, OllamaClient, ProviderError, WisdomProvider};
use manna::wisdom::get_wisdom;
use manna::wisdom::types::{Version, FALLBACK_REFERENCE};

/// Gemini response wrapping `text` as the single candidate part.
fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

fn envelope() -> String {
    serde_json::json!({
        "answer": "Love is patient, love is kind.",
        "reference": "1 Corinthians 13:4",
        "topic": "Love",
        "explanation": "Paul describes the character of love."
    })
    .to_string()
}

/// Ollama chat response wrapping `content` in the message envelope.
fn ollama_body(content: &str) -> String {
    serde_json::json!({
        "message": { "role": "assistant", "content": content }
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_gemini_success_roundtrip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(&envelope()))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string())
        .unwrap()
        .with_base_url(server.url());
    let wisdom = client.ask("What is love?", Version::Niv).await.unwrap();

    assert_eq!(wisdom.answer, "Love is patient, love is kind.");
    assert_eq!(wisdom.reference, "1 Corinthians 13:4");
    assert!(!wisdom.is_error());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_partial_payload_is_repaired_not_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(gemini_body(r#"{"answer":"Be anxious for nothing."}"#))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string())
        .unwrap()
        .with_base_url(server.url());
    let wisdom = client.ask("What about worry?", Version::Nkjv).await.unwrap();

    assert_eq!(wisdom.answer, "Be anxious for nothing.");
    assert_eq!(wisdom.reference, FALLBACK_REFERENCE);
}

#[tokio::test]
async fn test_gemini_auth_failure_makes_exactly_one_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error": {"message": "API key not valid"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = GeminiClient::new("bad-key".to_string())
        .unwrap()
        .with_base_url(server.url());
    let err = client.ask("What is love?", Version::Niv).await.unwrap_err();

    assert!(matches!(err, ProviderError::Api { .. }));
    assert!(!err.is_transient());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_rate_limit_retries_to_the_ceiling() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("rate limit exceeded")
        .expect(2)
        .create_async()
        .await;

    // Two attempts keeps the real backoff wait in this test short.
    let client = GeminiClient::new("test-key".to_string())
        .unwrap()
        .with_base_url(server.url())
        .with_max_attempts(2);
    let err = client.ask("What is love?", Version::Niv).await.unwrap_err();

    assert!(err.is_transient());
    assert!(err.user_message().contains("Too many requests"));
    mock.assert_async().await;
}

// ---------------------------------------------------------------------------
// Ollama
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_ollama_success_roundtrip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ollama_body(&envelope()))
        .create_async()
        .await;

    let client = OllamaClient::new(server.url(), "llama3.2".to_string()).unwrap();
    let wisdom = client.ask("What is love?", Version::Esv).await.unwrap();

    assert_eq!(wisdom.topic, "Love");
    assert!(!wisdom.is_error());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ollama_server_error_fails_fast_with_one_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body("model not loaded")
        .expect(1)
        .create_async()
        .await;

    let client = OllamaClient::new(server.url(), "llama3.2".to_string()).unwrap();
    let err = client.ask("What is love?", Version::Niv).await.unwrap_err();

    match err {
        ProviderError::Api { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("model not loaded"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ollama_prose_reply_names_local_configuration() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body(ollama_body("Love is a virtue, not a JSON object."))
        .create_async()
        .await;

    let client = OllamaClient::new(server.url(), "llama3.2".to_string()).unwrap();
    let err = client.ask("What is love?", Version::Niv).await.unwrap_err();

    match err {
        ProviderError::Config(message) => assert!(message.contains("llama3.2")),
        other => panic!("expected Config error, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Dispatch routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_local_entry_routes_to_local_transport() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body(ollama_body(&envelope()))
        .expect(1)
        .create_async()
        .await;

    let entry = ProviderEntry::Ollama {
        endpoint: server.url(),
        model: "llama3.2".to_string(),
    };
    let wisdom = get_wisdom("What is love?", Version::Nlt, &entry).await;

    assert!(!wisdom.is_error());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cloud_entry_without_key_never_reaches_any_transport() {
    let entry = ProviderEntry::Gemini {
        api_key: String::new(),
        model: None,
    };
    let wisdom = get_wisdom("What is love?", Version::Niv, &entry).await;

    assert!(wisdom.is_error());
    assert!(wisdom.error.as_deref().unwrap().contains("GEMINI_API_KEY"));
}
