// HTTP tool invoker tests against a mock JSON-RPC endpoint

use droidpilot_core::rpc::{JsonRpcRequest, TOOL_ERROR_CODE, TRANSPORT_ERROR_CODE};
use droidpilot_core::tooling::{HttpToolInvoker, ToolInvokeError, ToolInvoker, resolve_response};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn invoker_for(server: &MockServer) -> HttpToolInvoker {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .expect("client");
    HttpToolInvoker::with_client(format!("{}/mcp/", server.uri()), http)
}

#[tokio::test]
async fn posts_tool_call_and_returns_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mcp/"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "mobile_launch_app", "arguments": {"app": "calculator"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "result": {"content": [{"type": "text", "text": "launched"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = JsonRpcRequest::call_tool(7, "mobile_launch_app", json!({"app": "calculator"}));
    let response = invoker_for(&server).invoke(request).await;

    assert_eq!(response.numeric_id(), Some(7));
    assert!(response.error.is_none());
    let output = resolve_response(7, response).expect("success");
    assert_eq!(output["content"][0]["text"], "launched");
}

#[tokio::test]
async fn tools_list_sends_empty_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list", "params": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"tools": [{"name": "mobile_take_screenshot"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = invoker_for(&server).invoke(JsonRpcRequest::list_tools(1)).await;
    assert!(resolve_response(1, response).is_ok());
}

#[tokio::test]
async fn bare_string_error_maps_to_tool_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": 3, "error": "device not found"})),
        )
        .mount(&server)
        .await;

    let request = JsonRpcRequest::call_tool(3, "mobile_use_device", json!({}));
    let response = invoker_for(&server).invoke(request).await;

    let error = response.error.clone().expect("error present");
    assert_eq!(error.code, TOOL_ERROR_CODE);
    assert_eq!(error.message, "device not found");
    assert!(!response.is_transport_failure());
}

#[tokio::test]
async fn http_failure_becomes_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let response = invoker_for(&server)
        .invoke(JsonRpcRequest::list_tools(4))
        .await;

    assert!(response.is_transport_failure());
    assert_eq!(response.numeric_id(), Some(4));
    let error = response.error.expect("error present");
    assert_eq!(error.code, TRANSPORT_ERROR_CODE);
    assert!(error.message.contains("502"), "message: {}", error.message);
}

#[tokio::test]
async fn http_error_with_foreign_json_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not Found"})))
        .mount(&server)
        .await;

    let response = invoker_for(&server)
        .invoke(JsonRpcRequest::list_tools(4))
        .await;

    assert!(response.is_transport_failure());
    assert_eq!(response.numeric_id(), Some(4));
    match resolve_response(4, response) {
        Err(ToolInvokeError::Transport { message }) => {
            assert!(message.starts_with("HTTP 404"), "message: {message}");
            assert!(message.contains("Not Found"));
        }
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn json_rpc_error_with_http_error_status_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 5,
            "error": {"code": -32602, "message": "Invalid params"}
        })))
        .mount(&server)
        .await;

    let response = invoker_for(&server)
        .invoke(JsonRpcRequest::call_tool(5, "mobile_launch_app", json!({})))
        .await;

    assert_eq!(
        resolve_response(5, response),
        Err(ToolInvokeError::Rpc {
            code: -32602,
            message: "Invalid params".into()
        })
    );
}

#[tokio::test]
async fn non_json_body_becomes_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&server)
        .await;

    let response = invoker_for(&server)
        .invoke(JsonRpcRequest::list_tools(6))
        .await;

    let error = response.error.expect("error present");
    assert_eq!(error.code, TRANSPORT_ERROR_CODE);
    assert!(error.message.contains("proxy login"));
}

#[tokio::test]
async fn slow_server_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({"jsonrpc": "2.0", "id": 8, "result": {}})),
        )
        .mount(&server)
        .await;

    let response = invoker_for(&server)
        .invoke(JsonRpcRequest::list_tools(8))
        .await;
    assert!(response.is_transport_failure());
}
