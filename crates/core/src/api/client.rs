//! reqwest-backed `ArrApi` implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{error, info};

use super::probe::poll_until;
use super::{ApiError, ArrApi};

/// Per-request timeout for regular API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-probe timeout while waiting for readiness.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
/// Delay between readiness probes.
const PROBE_INTERVAL: Duration = Duration::from_secs(2);

const API_KEY_HEADER: &str = "X-Api-Key";

/// HTTP client for one *Arr service.
pub struct ArrClient {
    name: String,
    base_url: String,
    client: Client,
}

impl ArrClient {
    /// Create a client for the service at `base_url`.
    ///
    /// Every request carries the API key header and declares JSON content.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, api_key: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.into();
        Self {
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/v3/{}", self.base_url, endpoint)
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint_url(endpoint);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_connect() {
                ApiError::ConnectionFailed(e.to_string())
            } else {
                ApiError::Api(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Api(format!("Failed to parse response: {}", e)))
    }

    /// Log-and-return wrapper so every failed call leaves one diagnostic
    /// line naming the endpoint.
    async fn logged(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let verb = method.as_str().to_string();
        let result = self.request(method, endpoint, body).await;
        if let Err(e) = &result {
            error!(service = %self.name, endpoint, error = %e, "{} request failed", verb);
        }
        result
    }
}

#[async_trait]
impl ArrApi for ArrClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.logged(Method::GET, endpoint, None).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        self.logged(Method::POST, endpoint, Some(body)).await
    }

    async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        self.logged(Method::PUT, endpoint, Some(body)).await
    }

    async fn wait_for_ready(&self, timeout: Duration) -> bool {
        info!(service = %self.name, "Waiting for service to be ready");
        let url = self.endpoint_url("system/status");

        let ready = poll_until(timeout, PROBE_INTERVAL, || {
            let request = self.client.get(&url).timeout(PROBE_TIMEOUT);
            async move {
                match request.send().await {
                    Ok(response) => response.status() == StatusCode::OK,
                    Err(_) => false,
                }
            }
        })
        .await;

        if ready {
            info!(service = %self.name, "Service is ready");
        } else {
            error!(
                service = %self.name,
                timeout_secs = timeout.as_secs(),
                "Service not ready before timeout"
            );
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let client = ArrClient::new("Sonarr", "http://localhost:8989", "key");
        assert_eq!(
            client.endpoint_url("downloadclient"),
            "http://localhost:8989/api/v3/downloadclient"
        );
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = ArrClient::new("Radarr", "http://localhost:7878/", "key");
        assert_eq!(
            client.endpoint_url("system/status"),
            "http://localhost:7878/api/v3/system/status"
        );
    }

    #[test]
    fn test_invalid_api_key_does_not_panic() {
        // Header values reject control characters; the client falls back to
        // an empty key rather than failing construction.
        let client = ArrClient::new("Sonarr", "http://localhost:8989", "bad\nkey");
        assert_eq!(client.name(), "Sonarr");
    }
}
