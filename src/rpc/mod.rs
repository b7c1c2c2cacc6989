//! JSON-RPC plumbing towards the NLWeb backend.
//!
//! [`envelope`] builds and parses JSON-RPC 2.0 envelopes, [`forward`] ships them
//! over HTTP. Every failure, whatever its source, comes back as a [`ForwardError`]
//! inside a [`ForwardOutcome`], so callers only branch on success vs. failure.

pub mod envelope;
pub mod forward;

pub use envelope::{decode, encode, RpcRequest};
pub use forward::BackendForwarder;

/// Method used to discover the backend's tools.
pub const METHOD_LIST_TOOLS: &str = "tools/list";
/// Method used to discover the backend's prompts.
pub const METHOD_LIST_PROMPTS: &str = "tools/list_prompts";
/// Method used to invoke a tool.
pub const METHOD_CALL_TOOL: &str = "tools/call";
/// Method used to resolve a prompt.
pub const METHOD_GET_PROMPT: &str = "tools/get_prompt";

/// Result of one forwarded call: the backend's `result` value, or a failure.
pub type ForwardOutcome = Result<serde_json::Value, ForwardError>;

/// Why a forwarded call failed. The `Display` text is what the local caller sees.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForwardError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    /// DNS, connection refused, timeout, or a broken response stream.
    #[error("Request failed: {0}")]
    Request(String),

    /// Anything else that went wrong while issuing the call.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),

    /// The backend answered with a JSON-RPC `error` object.
    #[error("{message}")]
    Rpc { message: String, code: Option<i64> },

    /// The response body was not JSON.
    #[error("malformed response")]
    Malformed,
}
