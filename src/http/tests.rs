//! Tests for the HTTP client module

use super::client::error_detail;
use super::*;
use crate::auth::AuthConfig;
use crate::config::RateLimitConfig;
use crate::error::Error;
use reqwest::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plain_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::default()).unwrap()
}

#[test]
fn test_config_defaults() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_none());
    assert!(config.ssl_verify);
    assert!(config.user_agent.starts_with("ec3-client/"));
}

#[test]
fn test_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .header("Accept", "application/json")
        .user_agent("ec3-tests")
        .ssl_verify(false)
        .build();

    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.default_headers["Accept"], "application/json");
    assert_eq!(config.user_agent, "ec3-tests");
    assert!(!config.ssl_verify);
}

#[test]
fn test_request_config() {
    let config = RequestConfig::new()
        .param("page_size", "250")
        .json(json!({"category": "Concrete"}));

    assert_eq!(config.query["page_size"], "250");
    assert_eq!(config.body, Some(json!({"category": "Concrete"})));

    let replaced = config.query_map(crate::types::StringMap::new());
    assert!(replaced.query.is_empty());
}

#[test]
fn test_error_detail_extraction() {
    assert_eq!(
        error_detail(r#"{"error": "Invalid token"}"#),
        Some("Invalid token".to_string())
    );
    assert_eq!(
        error_detail(r#"{"error": {"code": 7}}"#),
        Some(r#"{"code":7}"#.to_string())
    );
    assert_eq!(error_detail(r#"{"error": null}"#), None);
    assert_eq!(error_detail(r#"{"detail": "nope"}"#), None);
    assert_eq!(error_detail("<html>Bad Gateway</html>"), None);
}

#[tokio::test]
async fn test_get_json_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/materials"))
        .and(query_param("name__like", "steel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "m1"}])))
        .mount(&server)
        .await;

    let data = plain_client()
        .request_json(
            Method::GET,
            &format!("{}/api/materials", server.uri()),
            RequestConfig::new().param("name__like", "steel"),
        )
        .await
        .unwrap();

    assert_eq!(data, json!([{"id": "m1"}]));
}

#[tokio::test]
async fn test_post_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/materials/convert-query"))
        .and(body_json(json!({"mf": "!EC3 search"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let data = plain_client()
        .request_json(
            Method::POST,
            &format!("{}/api/materials/convert-query", server.uri()),
            RequestConfig::new().json(json!({"mf": "!EC3 search"})),
        )
        .await
        .unwrap();

    assert_eq!(data["ok"], true);
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let data = plain_client()
        .request_json(Method::GET, &server.uri(), RequestConfig::new())
        .await
        .unwrap();
    assert!(data.is_null());
}

#[tokio::test]
async fn test_bearer_auth_and_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .and(header("Authorization", "Bearer secret123"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .header("Accept", "application/json")
        .build();
    let client = HttpClient::with_auth(config, AuthConfig::bearer("secret123")).unwrap();
    client
        .send(
            Method::GET,
            &format!("{}/api/projects", server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_client_error_enriched_with_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/epds"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid token"})),
        )
        .mount(&server)
        .await;

    let url = format!("{}/api/epds", server.uri());
    let err = plain_client()
        .send(Method::GET, &url, RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.to_string(),
        format!("HTTP 401: Client Error: Unauthorized for url: {url} [Error: Invalid token]")
    );
}

#[tokio::test]
async fn test_server_error_with_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = plain_client()
        .send(Method::GET, &server.uri(), RequestConfig::new())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("HTTP 502: Server Error: Bad Gateway for url:"));
    assert!(!message.contains("[Error:"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = plain_client()
        .send(Method::GET, &server.uri(), RequestConfig::new())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_invalid_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = plain_client()
        .request_json(Method::GET, &server.uri(), RequestConfig::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_rate_limited_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .rate_limit(RateLimitConfig {
            requests_per_second: 100,
            burst_size: 3,
        })
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());

    for _ in 0..3 {
        client
            .send(Method::GET, &server.uri(), RequestConfig::new())
            .await
            .unwrap();
    }
}
