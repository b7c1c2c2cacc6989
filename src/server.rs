//! MCP server initialization for stdio and Streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that build the
//! bridge once from configuration and hand it to the rmcp runtime.

use crate::bridge::NlwebBridge;
use crate::config::BridgeConfig;
use anyhow::Result;
use rmcp::ServiceExt;

/// Run whichever transport the config selects.
pub async fn serve(config: BridgeConfig) -> Result<()> {
    match config.server.transport.as_str() {
        "http" => serve_http(config).await,
        _ => serve_stdio(config).await,
    }
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: BridgeConfig) -> Result<()> {
    let bridge = NlwebBridge::from_config(&config)?;
    tracing::info!(
        backend = %bridge.forwarder().url(),
        "starting NLWeb MCP bridge on stdio"
    );

    let transport = rmcp::transport::stdio();

    let server = bridge.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: BridgeConfig) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let bind_addr = format!("{host}:{port}");

    let bridge = NlwebBridge::from_config(&config)?;
    tracing::info!(
        addr = %bind_addr,
        backend = %bridge.forwarder().url(),
        "starting NLWeb MCP bridge on Streamable HTTP"
    );

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(bridge.clone()),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
