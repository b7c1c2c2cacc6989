use anyhow::{Context, Result};
use rmcp::model::JsonObject;

use nlweb_bridge::bridge::NlwebBridge;
use nlweb_bridge::config::BridgeConfig;

/// Invoke a tool through the bridge, exactly as an MCP client would, and print the text.
pub async fn call(config: &BridgeConfig, name: &str, args: &str) -> Result<()> {
    let arguments: JsonObject =
        serde_json::from_str(args).context("--args must be a JSON object")?;

    let bridge = NlwebBridge::from_config(config)?;
    let result = bridge.invoke_tool(name, arguments).await;

    for item in &result.content {
        if let Some(text) = item.as_text() {
            println!("{}", text.text);
        }
    }

    if result.is_error == Some(true) {
        anyhow::bail!("tool call failed");
    }
    Ok(())
}
