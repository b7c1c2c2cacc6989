//! CLI `doctor` command: check the NLWeb backend and print a health report.

use anyhow::Result;
use serde_json::json;

use nlweb_bridge::bridge::discovery::{parse_prompts, parse_tools};
use nlweb_bridge::config::BridgeConfig;
use nlweb_bridge::rpc::{BackendForwarder, METHOD_LIST_PROMPTS, METHOD_LIST_TOOLS};

/// Run discovery against the backend without fallbacks and report what came back.
pub async fn doctor(config: &BridgeConfig) -> Result<()> {
    let forwarder = BackendForwarder::new(&config.backend)?;

    println!("NLWeb Bridge Health Report");
    println!("==========================");
    println!();
    println!("Backend:           {}", forwarder.url());
    println!("Timeout:           {}s", config.backend.timeout_secs);
    println!("Output budget:     {}", config.limits.max_tool_output);
    println!();

    let mut healthy = true;

    match forwarder.forward(METHOD_LIST_TOOLS, json!({})).await {
        Ok(result) => match parse_tools(result) {
            Ok(tools) => {
                println!("Tools:             {} advertised", tools.len());
                for tool in &tools {
                    println!("  - {}", tool.name);
                }
            }
            Err(e) => {
                healthy = false;
                println!("Tools:             MALFORMED ({e})");
            }
        },
        Err(e) => {
            healthy = false;
            println!("Tools:             FAILED ({e})");
        }
    }

    match forwarder.forward(METHOD_LIST_PROMPTS, json!({})).await {
        Ok(result) => match parse_prompts(result) {
            Ok(prompts) => {
                println!("Prompts:           {} advertised", prompts.len());
                for prompt in &prompts {
                    println!("  - {}", prompt.id);
                }
            }
            Err(e) => {
                healthy = false;
                println!("Prompts:           MALFORMED ({e})");
            }
        },
        Err(e) => {
            healthy = false;
            println!("Prompts:           FAILED ({e})");
        }
    }

    println!();
    if healthy {
        println!("Status:            OK");
    } else {
        println!("Status:            DEGRADED (MCP clients will only see the ask_nlw fallback)");
        println!();
        println!("Check that the NLWeb server is running and that --server / --endpoint");
        println!("point at its MCP endpoint.");
    }

    Ok(())
}
