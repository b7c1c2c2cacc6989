//! JSON-RPC 2.0 request envelopes and response decoding.

use serde::Serialize;
use serde_json::{json, Value};

use super::{ForwardError, ForwardOutcome};

pub const JSONRPC_VERSION: &str = "2.0";

/// Fixed request id. The local MCP runtime owns real correlation; the backend
/// only ever sees one call per HTTP request.
pub const REQUEST_ID: u64 = 1;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Outbound JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

/// Build the request envelope for `method`.
pub fn encode(method: &str, params: Value) -> RpcRequest {
    RpcRequest {
        jsonrpc: JSONRPC_VERSION,
        id: REQUEST_ID,
        method: method.to_string(),
        params,
    }
}

/// Turn a 2xx response body into a [`ForwardOutcome`].
///
/// An `error` member wins over `result`. A missing `result` decodes as `{}`.
pub fn decode(body: &str) -> ForwardOutcome {
    let parsed: Value = serde_json::from_str(body).map_err(|_| ForwardError::Malformed)?;

    if let Some(error) = parsed.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR)
            .to_string();
        let code = error.get("code").and_then(Value::as_i64);
        return Err(ForwardError::Rpc { message, code });
    }

    Ok(parsed.get("result").cloned().unwrap_or_else(|| json!({})))
}
