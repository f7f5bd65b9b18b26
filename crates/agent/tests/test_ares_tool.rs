//! HTTP tests for the Ares search tool against a mock server

use mockito::Matcher;
use reagent_agent::{ActionInput, AresInternetTool, Tool, ToolError};
use serde_json::json;

fn tool_for(server: &mockito::Server) -> AresInternetTool {
    AresInternetTool::new(Some("test-ares-key".to_string()))
        .unwrap()
        .with_url(format!("{}/live/predict", server.url()))
}

#[tokio::test]
async fn test_ares_returns_response_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/live/predict")
        .match_header("x-api-key", "test-ares-key")
        .match_body(Matcher::Json(json!({ "query": ["capital of France"] })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"response_text": "Paris is the capital of France."}}"#)
        .create_async()
        .await;

    let tool = tool_for(&server);
    let output = tool
        .run(ActionInput::Raw("capital of France".to_string()))
        .await
        .unwrap();

    assert_eq!(output, "Paris is the capital of France.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ares_strips_quotes_from_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/live/predict")
        .match_body(Matcher::Json(json!({ "query": ["rust news"] })))
        .with_status(200)
        .with_body(r#"{"data": {"response_text": "ok"}}"#)
        .create_async()
        .await;

    let tool = tool_for(&server);
    let output = tool
        .run(ActionInput::Structured(json!("\"rust news\"")))
        .await
        .unwrap();

    assert_eq!(output, "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ares_empty_response_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/live/predict")
        .with_status(200)
        .with_body(r#"{"data": {"response_text": "   "}}"#)
        .create_async()
        .await;

    let tool = tool_for(&server);
    let output = tool
        .run(ActionInput::Raw("obscure".to_string()))
        .await
        .unwrap();

    assert_eq!(
        output,
        "No information found for this query. Please try a different search term."
    );
}

#[tokio::test]
async fn test_ares_unexpected_structure_lists_data_keys() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/live/predict")
        .with_status(200)
        .with_body(r#"{"data": {"answer": "x"}}"#)
        .create_async()
        .await;

    let tool = tool_for(&server);
    let err = tool
        .run(ActionInput::Raw("q".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::UnexpectedResponse(_)));
    assert!(err.to_string().contains("Data keys"));
    assert!(err.to_string().contains("answer"));
}

#[tokio::test]
async fn test_ares_unexpected_structure_lists_response_keys() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/live/predict")
        .with_status(200)
        .with_body(r#"{"result": "x"}"#)
        .create_async()
        .await;

    let tool = tool_for(&server);
    let err = tool
        .run(ActionInput::Raw("q".to_string()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Response keys"));
    assert!(err.to_string().contains("result"));
}

#[tokio::test]
async fn test_ares_non_json_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/live/predict")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let tool = tool_for(&server);
    let err = tool
        .run(ActionInput::Raw("q".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::UnexpectedResponse(_)));
    assert!(err.to_string().contains("<html>gateway</html>"));
}

#[tokio::test]
async fn test_ares_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/live/predict")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let tool = tool_for(&server);
    let err = tool
        .run(ActionInput::Raw("q".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Request(_)));
    assert!(err.to_string().starts_with("HTTP request failed - "));
}

#[tokio::test]
async fn test_ares_empty_query_skips_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/live/predict")
        .expect(0)
        .create_async()
        .await;

    let tool = tool_for(&server);
    let err = tool
        .run(ActionInput::Raw("\"\"".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::InvalidInput(_)));
    mock.assert_async().await;
}

#[test]
fn test_ares_catalogue_entry() {
    let tool = AresInternetTool::new(Some("key".to_string())).unwrap();
    let entry = tool.catalogue_entry();

    assert!(entry.starts_with("Tool Name: ares_internet_search_tool\n"));
    assert!(entry.contains("Tool Description: Tool to search real-time relevant content"));
    assert!(entry.contains("Tool Input: A single string parameter"));
}

#[test]
fn test_ares_from_config() {
    let mut config = reagent_config::Config::default();
    config.tools.ares.api_key = "cfg-key".to_string();
    config.tools.ares.url = "http://localhost:9/predict".to_string();
    config.tools.ares.timeout_secs = 5;

    let tool = AresInternetTool::from_config(&config).unwrap();
    assert_eq!(tool.url(), "http://localhost:9/predict");
    assert_eq!(tool.timeout(), std::time::Duration::from_secs(5));
}
