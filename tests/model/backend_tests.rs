// Model backend tests - request shape and reply extraction per provider

use droidpilot_core::config::{ModelConfig, ModelKind};
use droidpilot_core::model::{CompletionRequest, ModelError, build_model};
use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn model_config(kind: ModelKind, endpoint: String, api_key: Option<&str>) -> ModelConfig {
    ModelConfig {
        id: kind.to_string(),
        kind,
        endpoint,
        model: "test-model".into(),
        api_key: api_key.map(String::from),
        api_path: None,
    }
}

fn request(prompt: &str) -> CompletionRequest {
    CompletionRequest {
        model: "test-model".into(),
        prompt: prompt.into(),
    }
}

#[tokio::test]
async fn ollama_returns_message_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"model": "test-model", "stream": false, "format": "json"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "{\"status\":\"completed\",\"message\":\"done\"}"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = build_model(&model_config(ModelKind::Ollama, server.uri(), None));
    let reply = model.complete(request("Open the calculator")).await.expect("reply");
    assert_eq!(reply, r#"{"status":"completed","message":"done"}"#);
}

#[tokio::test]
async fn ollama_empty_message_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": {"content": " "}})))
        .mount(&server)
        .await;

    let model = build_model(&model_config(ModelKind::Ollama, server.uri(), None));
    let result = model.complete(request("hi")).await;
    assert!(matches!(result, Err(ModelError::InvalidResponse { .. })));
}

#[tokio::test]
#[serial]
async fn openai_sends_bearer_key_from_environment() {
    // SAFETY: serialised with the other environment-mutating tests.
    unsafe { std::env::set_var("DROIDPILOT_TEST_OPENAI_KEY", "sk-test") };
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"status\":\"completed\",\"message\":\"ok\"}"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = model_config(
        ModelKind::OpenAi,
        server.uri(),
        Some("DROIDPILOT_TEST_OPENAI_KEY"),
    );
    let model = build_model(&config);
    unsafe { std::env::remove_var("DROIDPILOT_TEST_OPENAI_KEY") };

    let reply = model.complete(request("hi")).await.expect("reply");
    assert!(reply.contains("\"ok\""));
}

#[tokio::test]
#[serial]
async fn gemini_sends_key_as_query_parameter() {
    unsafe { std::env::set_var("DROIDPILOT_TEST_GEMINI_KEY", "g-test") };
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .and(query_param("key", "g-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"status\":\"completed\",\"message\":\"ok\"}"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = model_config(
        ModelKind::Gemini,
        server.uri(),
        Some("DROIDPILOT_TEST_GEMINI_KEY"),
    );
    let model = build_model(&config);
    unsafe { std::env::remove_var("DROIDPILOT_TEST_GEMINI_KEY") };

    let reply = model.complete(request("hi")).await.expect("reply");
    assert!(reply.contains("completed"));
}

#[tokio::test]
async fn keyed_backend_without_key_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = model_config(
        ModelKind::Gemini,
        server.uri(),
        Some("DROIDPILOT_TEST_KEY_THAT_IS_NEVER_SET"),
    );
    let result = build_model(&config).complete(request("hi")).await;
    assert!(matches!(result, Err(ModelError::MissingApiKey { .. })));
}

#[tokio::test]
async fn server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let model = build_model(&model_config(ModelKind::Ollama, server.uri(), None));
    let result = model.complete(request("hi")).await;
    assert!(matches!(result, Err(ModelError::Network { .. })));
}
