//! HTTP transport
//!
//! Provides the HTTP client used by every request the crate makes.
//!
//! # Features
//!
//! - **Authentication**: bearer token on every request
//! - **Status handling**: 4xx/5xx become [`Error::HttpStatus`](crate::Error::HttpStatus),
//!   enriched with the `"error"` field of a JSON error body when present
//! - **TLS toggle**: certificate verification can be switched off
//! - **Rate Limiting**: optional token bucket limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::RateLimiter;

#[cfg(test)]
mod tests;
