//! Client configuration
//!
//! `ClientConfig` can be built in code or loaded from a YAML/JSON file:
//!
//! ```yaml
//! bearer_token: "abc123"
//! page_size: 250
//! max_records: 1000
//! ssl_verify: false
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default EC3 API root
pub const DEFAULT_BASE_URL: &str = "https://buildingtransparency.org/api/";

/// Records per page requested unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 250;

/// Runtime configuration for [`Ec3Client`](crate::Ec3Client)
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API token sent as `Authorization: Bearer <token>`
    pub bearer_token: String,

    /// API root, must end with `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Extension used by the format-suffixed endpoints (e.g. `epds/{id}.json`)
    #[serde(default = "default_format")]
    pub response_format: String,

    /// Records per page (1..=250)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Cap on records returned by a paginated fetch
    #[serde(default = "default_max_records")]
    pub max_records: u64,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub ssl_verify: bool,

    /// Drop null-valued fields from responses
    #[serde(default = "default_true")]
    pub remove_nulls: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional client-side throttle
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_records() -> u64 {
    u64::MAX
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("ec3-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_burst() -> u32 {
    1
}

impl ClientConfig {
    /// Create a config with defaults for everything but the token
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            base_url: default_base_url(),
            response_format: default_format(),
            page_size: default_page_size(),
            max_records: default_max_records(),
            ssl_verify: true,
            remove_nulls: true,
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            rate_limit: None,
        }
    }

    /// Parse a YAML (or JSON) document
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Set the API root
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the paginated fetch cap
    #[must_use]
    pub fn with_max_records(mut self, max_records: u64) -> Self {
        self.max_records = max_records;
        self
    }

    /// Toggle TLS certificate verification
    #[must_use]
    pub fn with_ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = verify;
        self
    }

    /// Toggle null removal
    #[must_use]
    pub fn with_remove_nulls(mut self, remove: bool) -> Self {
        self.remove_nulls = remove;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_seconds = timeout.as_secs();
        self
    }

    /// Enable client-side rate limiting
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// `max_records` as a usize, saturating on 32-bit targets
    pub fn max_records_usize(&self) -> usize {
        usize::try_from(self.max_records).unwrap_or(usize::MAX)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.bearer_token.trim().is_empty() {
            return Err(Error::missing_field("bearer_token"));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size),
            ));
        }
        if self.max_records == 0 {
            return Err(Error::invalid_value("max_records", "must be at least 1"));
        }
        if self.response_format.is_empty() {
            return Err(Error::invalid_value("response_format", "must not be empty"));
        }
        url::Url::parse(&self.base_url)?;
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("bearer_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("response_format", &self.response_format)
            .field("page_size", &self.page_size)
            .field("max_records", &self.max_records)
            .field("ssl_verify", &self.ssl_verify)
            .field("remove_nulls", &self.remove_nulls)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
