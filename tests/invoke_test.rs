mod helpers;

use helpers::{text_item, unreachable_bridge, MockBackend, Reply};
use nlweb_bridge::truncate::serialized_len;
use rmcp::model::{CallToolResult, GetPromptResult, PromptMessageContent, PromptMessageRole};
use serde_json::{json, Map, Value};

fn only_text(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1);
    result.content[0]
        .as_text()
        .expect("text content")
        .text
        .clone()
}

fn only_message(result: &GetPromptResult) -> String {
    assert_eq!(result.messages.len(), 1);
    assert_eq!(result.messages[0].role, PromptMessageRole::User);
    match &result.messages[0].content {
        PromptMessageContent::Text { text } => text.clone(),
        other => panic!("expected text message, got {other:?}"),
    }
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn tool_call_forwards_name_and_arguments() {
    let backend = MockBackend::start(|_| {
        Reply::Result(json!({"content": [{"type": "text", "text": "42 results"}]}))
    })
    .await;

    let result = backend
        .bridge()
        .invoke_tool("ask", args(json!({"query": "spicy soup"})))
        .await;
    assert_ne!(result.is_error, Some(true));

    let parsed: Value = serde_json::from_str(&only_text(&result)).unwrap();
    assert_eq!(parsed, json!({"content": [{"type": "text", "text": "42 results"}]}));

    let requests = backend.requests();
    assert_eq!(requests[0]["method"], "tools/call");
    assert_eq!(
        requests[0]["params"],
        json!({"name": "ask", "arguments": {"query": "spicy soup"}})
    );
}

#[tokio::test]
async fn tool_call_output_is_pretty_printed() {
    let backend = MockBackend::start(|_| Reply::Result(json!({"content": []}))).await;
    let result = backend.bridge().invoke_tool("ask", Map::new()).await;
    assert_eq!(only_text(&result), "{\n  \"content\": []\n}");
}

#[tokio::test]
async fn tool_call_output_keeps_backend_key_order() {
    let backend = MockBackend::start(|_| {
        Reply::Raw(
            200,
            r#"{"jsonrpc":"2.0","id":1,"result":{"content":[{"type":"text","text":"hit","url":"u","annotations":{"z":1,"a":2}}]}}"#
                .into(),
        )
    })
    .await;

    let result = backend.bridge().invoke_tool("ask", Map::new()).await;
    let expected = r#"{
  "content": [
    {
      "type": "text",
      "text": "hit",
      "url": "u",
      "annotations": {
        "z": 1,
        "a": 2
      }
    }
  ]
}"#;
    assert_eq!(only_text(&result), expected);
}

#[tokio::test]
async fn tool_call_failure_becomes_error_text() {
    let result = unreachable_bridge()
        .invoke_tool("ask", args(json!({"query": "x"})))
        .await;
    assert_eq!(result.is_error, Some(true));
    assert!(only_text(&result).starts_with("Error: Request failed: "));
}

#[tokio::test]
async fn tool_call_rpc_error_becomes_error_text() {
    let backend =
        MockBackend::start(|_| Reply::Error(json!({"message": "Unknown tool: nope"}))).await;
    let result = backend.bridge().invoke_tool("nope", Map::new()).await;
    assert_eq!(only_text(&result), "Error: Unknown tool: nope");
}

#[tokio::test]
async fn large_tool_output_keeps_leading_items() {
    // Five items totalling ~60,000 characters: 4 x ~10k then one ~20k.
    let items: Vec<Value> = ['a', 'b', 'c', 'd']
        .iter()
        .map(|&c| text_item(9_900, c))
        .chain(std::iter::once(text_item(19_900, 'e')))
        .collect();
    let response = json!({"content": items.clone()});
    assert!(serialized_len(&response) > 59_000);

    let backend = MockBackend::start(move |_| Reply::Result(response.clone())).await;
    let result = backend.bridge().invoke_tool("ask", Map::new()).await;

    let parsed: Value = serde_json::from_str(&only_text(&result)).unwrap();
    let content = parsed["content"].as_array().unwrap();
    assert_eq!(content.len(), 5);
    assert_eq!(&content[..4], &items[..4]);
    assert_eq!(content[4], json!({"type": "text", "text": "... (truncated)"}));
    assert!(serialized_len(&parsed) <= 40_000);
}

#[tokio::test]
async fn non_structured_result_is_not_truncated() {
    let long = "z".repeat(50_000);
    let expected = long.clone();
    let backend = MockBackend::start(move |_| Reply::Result(json!(long.clone()))).await;
    let result = backend.bridge().invoke_tool("ask", Map::new()).await;
    assert_eq!(only_text(&result), format!("\"{expected}\""));
}

#[tokio::test]
async fn prompt_is_resolved() {
    let backend = MockBackend::start(|_| {
        Reply::Result(json!({"name": "faq", "prompt_text": "How can I help?"}))
    })
    .await;

    let result = backend.bridge().resolve_prompt("faq", Some(Map::new())).await;
    assert_eq!(result.description.as_deref(), Some("Prompt: faq"));
    assert_eq!(only_message(&result), "How can I help?");

    let requests = backend.requests();
    assert_eq!(requests[0]["method"], "tools/get_prompt");
    assert_eq!(
        requests[0]["params"],
        json!({"name": "faq", "arguments": {"prompt_id": "faq"}})
    );
}

#[tokio::test]
async fn prompt_without_arguments_gets_prompt_id() {
    let backend = MockBackend::start(|_| Reply::Result(json!({}))).await;
    let result = backend.bridge().resolve_prompt("faq", None).await;

    assert_eq!(result.description.as_deref(), Some("Prompt: faq"));
    assert_eq!(only_message(&result), "Prompt for faq");
    assert_eq!(
        backend.requests()[0]["params"]["arguments"],
        json!({"prompt_id": "faq"})
    );
}

#[tokio::test]
async fn explicit_prompt_id_is_kept() {
    let backend = MockBackend::start(|_| Reply::Result(json!({"prompt_text": "hi"}))).await;
    let arguments = args(json!({"prompt_id": "faq-v2", "query": "returns"}));
    backend.bridge().resolve_prompt("faq", Some(arguments)).await;

    assert_eq!(
        backend.requests()[0]["params"]["arguments"],
        json!({"prompt_id": "faq-v2", "query": "returns"})
    );
}

#[tokio::test]
async fn unreachable_prompt_reports_failure() {
    let result = unreachable_bridge().resolve_prompt("faq", Some(Map::new())).await;
    let description = result.description.clone().unwrap();
    assert!(description.contains("Failed to get prompt faq"));
    let text = only_message(&result);
    assert!(text.starts_with("Error: Request failed: "), "got {text}");
}

#[tokio::test]
async fn malformed_prompt_body_reports_processing_error() {
    let backend = MockBackend::start(|_| Reply::Result(json!(["not", "an", "object"]))).await;
    let result = backend.bridge().resolve_prompt("faq", None).await;
    assert_eq!(result.description.as_deref(), Some("Error getting prompt faq"));
    assert!(only_message(&result).starts_with("Error: "));
}
