//! HTTP client with retries and failover
//!
//! This module provides the HTTP client a sensor node uses to talk to the
//! central registry. The registry carries no authentication; the client
//! focuses on timeouts, per-server retry, and rotating across configured
//! registry addresses on transport failures.

use std::{sync::RwLock, time::Duration};

use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, warn};

use crate::error::{ClientError, Result};

/// Configuration for the registry HTTP client
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// List of registry addresses to connect to
    pub server_addrs: Vec<String>,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            server_addrs: vec!["http://localhost:8080".to_string()],
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config with a single registry address
    pub fn new(server_addr: &str) -> Self {
        Self {
            server_addrs: vec![server_addr.to_string()],
            ..Default::default()
        }
    }

    /// Create a config with multiple registry addresses
    pub fn with_servers(server_addrs: Vec<String>) -> Self {
        Self {
            server_addrs,
            ..Default::default()
        }
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }
}

/// HTTP client with failover support across registry addresses
pub struct RegistryHttpClient {
    client: Client,
    config: HttpClientConfig,
    current_server_index: RwLock<usize>,
}

impl RegistryHttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        if config.server_addrs.is_empty() {
            return Err(ClientError::Other(anyhow::anyhow!(
                "no registry address configured"
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config,
            current_server_index: RwLock::new(0),
        })
    }

    /// Get the current registry URL
    fn current_server(&self) -> String {
        let index = *self
            .current_server_index
            .read()
            .unwrap_or_else(|e| e.into_inner());
        self.config.server_addrs[index].clone()
    }

    /// Switch to the next registry address (for failover)
    fn switch_to_next_server(&self) {
        let mut index = self
            .current_server_index
            .write()
            .unwrap_or_else(|e| e.into_inner());
        *index = (*index + 1) % self.config.server_addrs.len();
        debug!("Switched to registry index: {}", *index);
    }

    /// Build full URL for a path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.current_server().trim_end_matches('/'), path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_with_retry(
            |client, url| async move { client.get(&url).send().await },
            path,
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::Other(anyhow::anyhow!("serialize request body: {}", e)))?;
        self.request_with_retry(
            |client, url| {
                let body = body.clone();
                async move { client.post(&url).json(&body).send().await }
            },
            path,
        )
        .await
    }

    /// Make a POST request with JSON body, ignoring the response body
    pub async fn post_json_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::Other(anyhow::anyhow!("serialize request body: {}", e)))?;

        let max_retries = self.config.server_addrs.len();
        let mut last_error = None;

        for _ in 0..max_retries {
            let url = self.build_url(path);

            match self.client.post(&url).json(&body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(());
                    }
                    let body = response.text().await.unwrap_or_default();
                    error!("Request failed with status {}: {}", status, body);
                    return Err(ClientError::RegistryError {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(e) => {
                    warn!("Request failed: {}, switching to next registry", e);
                    self.switch_to_next_server();
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ClientError::Other(anyhow::anyhow!("all registry servers failed"))))
    }

    /// Make a GET request and hand back the raw response, still rotating
    /// across registries on transport errors. Used where a non-success
    /// status is meaningful rather than an error.
    pub async fn get_response(&self, path: &str) -> Result<Response> {
        let max_retries = self.config.server_addrs.len();
        let mut last_error = None;

        for _ in 0..max_retries {
            let url = self.build_url(path);

            match self.client.get(&url).send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!("Request failed: {}, switching to next registry", e);
                    self.switch_to_next_server();
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ClientError::Other(anyhow::anyhow!("all registry servers failed"))))
    }

    /// Generic request with retry logic
    async fn request_with_retry<T, F, Fut>(&self, request_fn: F, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(Client, String) -> Fut,
        Fut: std::future::Future<Output = std::result::Result<Response, reqwest::Error>>,
    {
        let max_retries = self.config.server_addrs.len();
        let mut last_error = None;

        for _ in 0..max_retries {
            let url = self.build_url(path);

            match request_fn(self.client.clone(), url).await {
                Ok(response) => {
                    return self.handle_response(response).await;
                }
                Err(e) => {
                    warn!("Request failed: {}, switching to next registry", e);
                    self.switch_to_next_server();
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ClientError::Other(anyhow::anyhow!("all registry servers failed"))))
    }

    /// Handle response and parse JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let result = response.json::<T>().await?;
            Ok(result)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Request failed with status {}: {}", status, body);
            Err(ClientError::RegistryError {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpClientConfig::default();
        assert_eq!(config.server_addrs.len(), 1);
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.read_timeout_ms, 30000);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpClientConfig::new("http://localhost:8080").with_timeouts(3000, 15000);

        assert_eq!(config.server_addrs[0], "http://localhost:8080");
        assert_eq!(config.connect_timeout_ms, 3000);
        assert_eq!(config.read_timeout_ms, 15000);
    }

    #[test]
    fn test_config_with_servers() {
        let config = HttpClientConfig::with_servers(vec![
            "http://registry1:8080".to_string(),
            "http://registry2:8080".to_string(),
        ]);

        assert_eq!(config.server_addrs.len(), 2);
    }

    #[test]
    fn test_no_servers_is_an_error() {
        let config = HttpClientConfig::with_servers(vec![]);
        assert!(RegistryHttpClient::new(config).is_err());
    }

    #[test]
    fn test_build_url() {
        let config = HttpClientConfig::new("http://localhost:8080");
        let client = RegistryHttpClient::new(config).unwrap();

        assert_eq!(
            client.build_url("/api/sensors/register"),
            "http://localhost:8080/api/sensors/register"
        );
    }

    #[test]
    fn test_build_url_trailing_slash() {
        let config = HttpClientConfig::new("http://localhost:8080/");
        let client = RegistryHttpClient::new(config).unwrap();

        assert_eq!(
            client.build_url("/api/sensors/1/readings"),
            "http://localhost:8080/api/sensors/1/readings"
        );
    }

    #[test]
    fn test_failover_rotation() {
        let config = HttpClientConfig::with_servers(vec![
            "http://registry1:8080".to_string(),
            "http://registry2:8080".to_string(),
        ]);
        let client = RegistryHttpClient::new(config).unwrap();

        assert_eq!(client.current_server(), "http://registry1:8080");
        client.switch_to_next_server();
        assert_eq!(client.current_server(), "http://registry2:8080");
        client.switch_to_next_server();
        assert_eq!(client.current_server(), "http://registry1:8080");
    }
}
