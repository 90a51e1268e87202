// src/gateway.rs
use crate::logging::Logger;
use crate::types::{Config, OsintError};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure categories for a single outbound request. The display strings are
/// what ends up in a platform outcome's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed")]
    ConnectionFailure,

    #[error("HTTP Error")]
    HttpStatus(u16),

    #[error("{0}")]
    Unknown(String),
}

impl Serialize for GatewayError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GatewayResponse {
    Success {
        code: u16,
        content: String,
        headers: BTreeMap<String, String>,
    },
    Error {
        error: GatewayError,
    },
}

#[async_trait]
pub trait Fetch: Send + Sync {
    /// Single GET attempt. Never fails; faults come back as `GatewayResponse::Error`.
    async fn fetch(&self, url: &str, timeout_secs: u64) -> GatewayResponse;
}

#[derive(Clone)]
pub struct Gateway {
    client: Client,
    logger: Arc<dyn Logger>,
}

impl Gateway {
    pub fn new(config: &Config, logger: Arc<dyn Logger>) -> Result<Self, OsintError> {
        // Build HTTP client
        let mut client_builder = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(!config.verify_tls);

        // Add proxy if configured
        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| OsintError::ConfigError(format!("Invalid proxy URL: {}", e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder
            .build()
            .map_err(|e| OsintError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Gateway { client, logger })
    }

    async fn attempt(&self, url: &str, timeout_secs: u64) -> Result<GatewayResponse, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await?
            .error_for_status()?;

        let code = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let content = response.text().await?;

        Ok(GatewayResponse::Success {
            code,
            content,
            headers,
        })
    }
}

#[async_trait]
impl Fetch for Gateway {
    async fn fetch(&self, url: &str, timeout_secs: u64) -> GatewayResponse {
        self.logger.info(&format!("Requesting: {}", url));

        match self.attempt(url, timeout_secs).await {
            Ok(response) => response,
            Err(e) => {
                let error = classify(&e);
                let line = match &error {
                    GatewayError::Timeout => format!("Timeout error for {}", url),
                    GatewayError::ConnectionFailure => format!("Connection error for {}", url),
                    GatewayError::HttpStatus(_) => format!("HTTP error: {}", e),
                    GatewayError::Unknown(message) => format!("Unexpected error: {}", message),
                };
                self.logger.error(&line);
                GatewayResponse::Error { error }
            }
        }
    }
}

/// First match wins; a connect attempt that runs out of time counts as a timeout.
/// A peer that resets or closes the connection before answering is a
/// connection failure, same as a refused connect.
fn classify(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() || err.is_request() {
        GatewayError::ConnectionFailure
    } else if let Some(status) = err.status() {
        GatewayError::HttpStatus(status.as_u16())
    } else {
        GatewayError::Unknown(err.to_string())
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}
