//! HTTP forwarding of JSON-RPC calls to the NLWeb backend.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use super::{decode, encode, ForwardError, ForwardOutcome};
use crate::config::BackendConfig;

/// Sends one JSON-RPC request per logical operation to a fixed backend URL.
///
/// Cheap to share: the underlying `reqwest::Client` pools connections and is
/// safe to use from concurrent tasks.
#[derive(Debug, Clone)]
pub struct BackendForwarder {
    client: reqwest::Client,
    url: String,
}

impl BackendForwarder {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            url: config.endpoint_url(),
        })
    }

    /// The endpoint every call is POSTed to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward `method` with `params`. Single attempt, no retries.
    pub async fn forward(&self, method: &str, params: Value) -> ForwardOutcome {
        tracing::debug!(url = %self.url, method, "forwarding to backend");

        let outcome = self.send(method, params).await;
        if let Err(e) = &outcome {
            tracing::warn!(url = %self.url, method, error = %e, "backend call failed");
        }
        outcome
    }

    async fn send(&self, method: &str, params: Value) -> ForwardOutcome {
        let request = encode(method, params);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if !status.is_success() {
            return Err(ForwardError::Http {
                status: status.as_u16(),
                body,
            });
        }

        decode(&body)
    }
}

/// Builder errors mean we never got as far as the network.
///
/// With a configuration that passed `BridgeConfig::validate` the URL always
/// parses, so in practice every error lands in `Request`; the builder branch
/// stays for malformed URLs built outside that path.
fn classify(e: reqwest::Error) -> ForwardError {
    if e.is_builder() {
        ForwardError::Unexpected(e.to_string())
    } else {
        ForwardError::Request(e.to_string())
    }
}
