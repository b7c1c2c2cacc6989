//! Tool invocation and prompt resolution.
//!
//! Both handlers always produce a well-formed MCP result. Backend failures and
//! reshape errors end up as readable text for the caller instead of protocol
//! errors.

use rmcp::model::{
    CallToolResult, Content, GetPromptResult, JsonObject, PromptMessage, PromptMessageRole,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::rpc::{BackendForwarder, METHOD_CALL_TOOL, METHOD_GET_PROMPT};
use crate::truncate::Truncator;

/// Argument key carrying the prompt identifier to the backend.
pub const PROMPT_ID_KEY: &str = "prompt_id";

/// Backend answer to `tools/get_prompt`.
#[derive(Debug, Deserialize)]
struct PromptBody {
    name: Option<String>,
    prompt_text: Option<String>,
}

/// Forward a tool call and render the result as one text item.
pub async fn call_tool(
    forwarder: &BackendForwarder,
    truncator: Truncator,
    name: &str,
    arguments: JsonObject,
) -> CallToolResult {
    tracing::info!(tool = name, "call_tool");

    let params = json!({ "name": name, "arguments": arguments });
    let result = match forwarder.forward(METHOD_CALL_TOOL, params).await {
        Ok(result) => result,
        Err(e) => return CallToolResult::error(vec![Content::text(format!("Error: {e}"))]),
    };

    match render_tool_output(&truncator, result) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "error processing tool response");
            CallToolResult::error(vec![Content::text(format!(
                "Error processing response: {e}"
            ))])
        }
    }
}

/// Truncate structured results to the budget and pretty-print them.
pub fn render_tool_output(truncator: &Truncator, result: Value) -> Result<String, serde_json::Error> {
    let shaped = if result.is_object() || result.is_array() {
        let truncated = truncator.truncate(&result);
        if truncated != result {
            tracing::info!(max_length = truncator.max_length(), "tool output truncated");
        }
        truncated
    } else {
        result
    };
    serde_json::to_string_pretty(&shaped)
}

/// Forward a prompt request and wrap the answer as a single user message.
pub async fn get_prompt(
    forwarder: &BackendForwarder,
    name: &str,
    arguments: Option<JsonObject>,
) -> GetPromptResult {
    tracing::info!(prompt = name, "get_prompt");

    let mut arguments = arguments.unwrap_or_default();
    if !arguments.contains_key(PROMPT_ID_KEY) {
        arguments.insert(PROMPT_ID_KEY.into(), Value::String(name.to_string()));
    }
    let prompt_id = arguments
        .get(PROMPT_ID_KEY)
        .and_then(Value::as_str)
        .unwrap_or(name)
        .to_string();

    let params = json!({ "name": name, "arguments": arguments });
    let result = match forwarder.forward(METHOD_GET_PROMPT, params).await {
        Ok(result) => result,
        Err(e) => {
            return user_message(
                format!("Failed to get prompt {prompt_id}"),
                format!("Error: {e}"),
            )
        }
    };

    match serde_json::from_value::<PromptBody>(result) {
        Ok(body) => {
            let title = body.name.unwrap_or_else(|| name.to_string());
            let text = body
                .prompt_text
                .unwrap_or_else(|| format!("Prompt for {name}"));
            user_message(format!("Prompt: {title}"), text)
        }
        Err(e) => {
            tracing::warn!(prompt = name, error = %e, "error processing prompt");
            user_message(format!("Error getting prompt {name}"), format!("Error: {e}"))
        }
    }
}

fn user_message(description: String, text: String) -> GetPromptResult {
    GetPromptResult {
        description: Some(description),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    }
}
