//! Tool and prompt discovery against the backend, with a built-in fallback.
//!
//! A listing is all-or-nothing: if the call fails, or any record in it does not
//! reshape cleanly, the caller gets the single `ask_nlw` descriptor instead.

use std::sync::Arc;

use rmcp::model::{JsonObject, Prompt, PromptArgument, Tool};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::rpc::{BackendForwarder, METHOD_LIST_PROMPTS, METHOD_LIST_TOOLS};

/// Name of the fallback tool and prompt.
pub const FALLBACK_NAME: &str = "ask_nlw";

const FALLBACK_DESCRIPTION: &str = "Connects with the NLWeb server to answer questions";

/// A tool as advertised by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonObject,
}

/// A prompt as advertised by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromptDescriptor {
    pub id: String,
    pub description: String,
    #[serde(default = "default_prompt_arguments")]
    pub arguments: Vec<PromptArgumentDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromptArgumentDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Deserialize)]
struct ToolListing {
    tools: Vec<ToolDescriptor>,
}

#[derive(Deserialize)]
struct PromptListing {
    prompts: Vec<PromptDescriptor>,
}

fn query_argument() -> PromptArgumentDescriptor {
    PromptArgumentDescriptor {
        name: "query".into(),
        description: Some("query string in english".into()),
        required: true,
    }
}

fn default_prompt_arguments() -> Vec<PromptArgumentDescriptor> {
    vec![query_argument()]
}

/// The tool advertised when the backend cannot tell us its own.
pub fn fallback_tool() -> ToolDescriptor {
    let schema = json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The query string to send to the NLWeb server"
            }
        },
        "required": ["query"]
    });

    ToolDescriptor {
        name: FALLBACK_NAME.into(),
        description: FALLBACK_DESCRIPTION.into(),
        input_schema: schema.as_object().cloned().unwrap_or_default(),
    }
}

/// The prompt advertised when the backend cannot tell us its own.
pub fn fallback_prompt() -> PromptDescriptor {
    PromptDescriptor {
        id: FALLBACK_NAME.into(),
        description: FALLBACK_DESCRIPTION.into(),
        arguments: default_prompt_arguments(),
    }
}

/// Reshape a `tools/list` result. Any malformed record fails the whole listing.
pub fn parse_tools(result: Value) -> Result<Vec<ToolDescriptor>, serde_json::Error> {
    serde_json::from_value::<ToolListing>(result).map(|listing| listing.tools)
}

/// Reshape a `tools/list_prompts` result. Any malformed record fails the whole listing.
pub fn parse_prompts(result: Value) -> Result<Vec<PromptDescriptor>, serde_json::Error> {
    serde_json::from_value::<PromptListing>(result).map(|listing| listing.prompts)
}

/// Discover the backend's tools, falling back to [`fallback_tool`].
pub async fn discover_tools(forwarder: &BackendForwarder) -> Vec<ToolDescriptor> {
    let result = match forwarder.forward(METHOD_LIST_TOOLS, json!({})).await {
        Ok(result) => result,
        Err(_) => return vec![fallback_tool()],
    };

    match parse_tools(result) {
        Ok(tools) => {
            tracing::debug!(count = tools.len(), "discovered backend tools");
            tools
        }
        Err(e) => {
            tracing::warn!(error = %e, "error processing tools, using fallback");
            vec![fallback_tool()]
        }
    }
}

/// Discover the backend's prompts, falling back to [`fallback_prompt`].
pub async fn discover_prompts(forwarder: &BackendForwarder) -> Vec<PromptDescriptor> {
    let result = match forwarder.forward(METHOD_LIST_PROMPTS, json!({})).await {
        Ok(result) => result,
        Err(_) => return vec![fallback_prompt()],
    };

    match parse_prompts(result) {
        Ok(prompts) => {
            tracing::debug!(count = prompts.len(), "discovered backend prompts");
            prompts
        }
        Err(e) => {
            tracing::warn!(error = %e, "error processing prompts, using fallback");
            vec![fallback_prompt()]
        }
    }
}

impl From<ToolDescriptor> for Tool {
    fn from(tool: ToolDescriptor) -> Self {
        Tool::new(tool.name, tool.description, Arc::new(tool.input_schema))
    }
}

impl From<PromptArgumentDescriptor> for PromptArgument {
    fn from(arg: PromptArgumentDescriptor) -> Self {
        PromptArgument {
            name: arg.name,
            title: None,
            description: arg.description,
            required: Some(arg.required),
        }
    }
}

impl From<PromptDescriptor> for Prompt {
    fn from(prompt: PromptDescriptor) -> Self {
        let arguments = prompt.arguments.into_iter().map(PromptArgument::from).collect();
        Prompt::new(prompt.id, Some(prompt.description), Some(arguments))
    }
}
