//! HTTP client
//!
//! One request per call, no retries. Every request gets the default headers,
//! the authenticator and (when configured) a rate limiter permit. Failed
//! statuses are turned into errors before the body is decoded.

use super::rate_limit::RateLimiter;
use crate::auth::{AuthConfig, Authenticator};
use crate::config::RateLimitConfig;
use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Transport settings
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub rate_limit: Option<RateLimitConfig>,
    /// Sent with every request
    pub default_headers: StringMap,
    pub user_agent: String,
    /// Verify TLS certificates
    pub ssl_verify: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers: StringMap::new(),
            user_agent: format!("ec3-client/{}", env!("CARGO_PKG_VERSION")),
            ssl_verify: true,
        }
    }
}

impl HttpClientConfig {
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for [`HttpClientConfig`]
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn rate_limit(mut self, limit: RateLimitConfig) -> Self {
        self.config.rate_limit = Some(limit);
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn ssl_verify(mut self, verify: bool) -> Self {
        self.config.ssl_verify = verify;
        self
    }

    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query string and body of one request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub query: StringMap,
    pub body: Option<Value>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one query parameter
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Replace the query parameters
    #[must_use]
    pub fn query_map(mut self, query: StringMap) -> Self {
        self.query = query;
        self
    }

    /// Send `body` as JSON
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Authenticated HTTP client
pub struct HttpClient {
    client: Client,
    default_headers: StringMap,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Unauthenticated client
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, AuthConfig::None)
    }

    /// Client that authenticates every request with `auth`
    pub fn with_auth(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()?;

        if !config.ssl_verify {
            debug!("TLS certificate verification disabled");
        }

        Ok(Self {
            client,
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
            default_headers: config.default_headers,
            authenticator: Authenticator::new(auth),
        })
    }

    /// Whether requests wait on a rate limiter
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send a request to an absolute URL
    ///
    /// Any 4xx/5xx response is turned into [`Error::HttpStatus`].
    pub async fn send(&self, method: Method, url: &str, config: RequestConfig) -> Result<Response> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.clone(), url);
        for (name, value) in &self.default_headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(body) = &config.body {
            req = req.json(body);
        }
        req = self.authenticator.apply(req);

        debug!(%method, url, params = config.query.len(), "Sending request");
        let response = req.send().await?;
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            return Err(status_error(response).await);
        }

        debug!(%method, url, status = status.as_u16(), "Request succeeded");
        Ok(response)
    }

    /// Send a request and decode the JSON body
    ///
    /// An empty body decodes to `Value::Null`.
    pub async fn request_json(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Value> {
        let text = self.send(method, url, config).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("default_headers", &self.default_headers)
            .field("authenticator", &self.authenticator)
            .field("has_rate_limiter", &self.has_rate_limiter())
            .finish_non_exhaustive()
    }
}

/// Build the error for a failed response, consuming its body
async fn status_error(response: Response) -> Error {
    let status = response.status();
    let kind = if status.is_client_error() {
        "Client"
    } else {
        "Server"
    };
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let url = response.url().to_string();

    let mut message = format!("{kind} Error: {reason} for url: {url}");
    let body = response.text().await.unwrap_or_default();
    if let Some(detail) = error_detail(&body) {
        message.push_str(&format!(" [Error: {detail}]"));
    }

    Error::http_status(status.as_u16(), message)
}

/// The `"error"` field of a JSON error body, if there is one
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
