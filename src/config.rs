use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::truncate::MAX_TOOL_OUTPUT_LENGTH;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BridgeConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub limits: LimitsConfig,
}

/// How the bridge itself is exposed to the local MCP client.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// The NLWeb server every operation is forwarded to.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_tool_output: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            host: "127.0.0.1".into(),
            port: 8765,
            log_level: "info".into(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".into(),
            endpoint: "/mcp".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tool_output: MAX_TOOL_OUTPUT_LENGTH,
        }
    }
}

impl BackendConfig {
    /// Full URL of the JSON-RPC endpoint: base URL and endpoint path joined verbatim.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.url, self.endpoint)
    }
}

/// Returns `~/.nlweb-bridge/`
pub fn default_bridge_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nlweb-bridge")
}

/// Returns the default config file path: `~/.nlweb-bridge/config.toml`
pub fn default_config_path() -> PathBuf {
    default_bridge_dir().join("config.toml")
}

impl BridgeConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            BridgeConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (NLWEB_SERVER_URL, NLWEB_ENDPOINT, NLWEB_BRIDGE_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NLWEB_SERVER_URL") {
            self.backend.url = val;
        }
        if let Ok(val) = std::env::var("NLWEB_ENDPOINT") {
            self.backend.endpoint = val;
        }
        if let Ok(val) = std::env::var("NLWEB_BRIDGE_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// Apply `--server` / `--endpoint` command-line flags, which win over file and env.
    pub fn apply_cli_overrides(&mut self, server: Option<String>, endpoint: Option<String>) {
        if let Some(url) = server {
            self.backend.url = url;
        }
        if let Some(endpoint) = endpoint {
            self.backend.endpoint = endpoint;
        }
    }

    /// Reject configurations the bridge cannot start with.
    pub fn validate(&self) -> Result<()> {
        let url = self.backend.endpoint_url();
        reqwest::Url::parse(&url).with_context(|| format!("invalid backend URL: {url}"))?;
        anyhow::ensure!(
            self.backend.timeout_secs > 0,
            "backend.timeout_secs must be greater than zero"
        );
        anyhow::ensure!(
            self.limits.max_tool_output > 0,
            "limits.max_tool_output must be greater than zero"
        );
        anyhow::ensure!(
            matches!(self.server.transport.as_str(), "stdio" | "http"),
            "unknown transport: {}. Supported: stdio, http",
            self.server.transport
        );
        Ok(())
    }
}
