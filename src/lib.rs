//! MCP bridge to an NLWeb server.
//!
//! `nlweb-bridge` is an [MCP](https://modelcontextprotocol.io/) server that owns no
//! tools of its own. Tool and prompt discovery, tool calls and prompt
//! resolution are all forwarded as JSON-RPC 2.0 calls over HTTP to an NLWeb
//! backend, and the answers are reshaped into MCP results.
//!
//! | MCP operation | Backend method | Failure behaviour |
//! |---------------|----------------|-------------------|
//! | `tools/list` | `tools/list` | single `ask_nlw` fallback tool |
//! | `prompts/list` | `tools/list_prompts` | single `ask_nlw` fallback prompt |
//! | `tools/call` | `tools/call` | `Error: <message>` text result |
//! | `prompts/get` | `tools/get_prompt` | user message carrying the error |
//!
//! Tool output is capped at a serialized-size budget (40,000 by default) by the
//! [`truncate`] module, which keeps whole leading content items.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files, environment variables and CLI flags
//! - [`rpc`]: JSON-RPC envelopes and the HTTP forwarder
//! - [`truncate`]: Output-size budget for tool results
//! - [`bridge`]: MCP handlers for discovery, tool calls and prompts
//! - [`server`]: stdio and Streamable HTTP entry points

pub mod bridge;
pub mod config;
pub mod rpc;
pub mod server;
pub mod truncate;
