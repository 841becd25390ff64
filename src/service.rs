//! Request execution and pagination service
//!
//! `ApiService` is the one component that talks to the API. Resource
//! handles borrow it and call through it; it owns the transport, the
//! endpoint builder, the pagination defaults and the null-removal switch.

use crate::auth::AuthConfig;
use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{fetch_pages, PageNumberPaginator, PageSource, FIRST_PAGE};
use crate::prune::prune;
use crate::types::{JsonValue, Method, Record, StringMap};
use async_trait::async_trait;
use tracing::{debug, info};

/// Executes requests against the EC3 API
#[derive(Debug)]
pub struct ApiService {
    http: HttpClient,
    endpoints: Endpoints,
    page_size: u32,
    max_records: usize,
    remove_nulls: bool,
}

impl ApiService {
    /// Build the service from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut http_config = HttpClientConfig::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .ssl_verify(config.ssl_verify)
            .header("Accept", "application/json");
        if let Some(limit) = config.rate_limit {
            http_config = http_config.rate_limit(limit);
        }

        let http = HttpClient::with_auth(
            http_config.build(),
            AuthConfig::bearer(config.bearer_token.clone()),
        )?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(&config.base_url, config.response_format.clone())?,
            page_size: config.page_size,
            max_records: config.max_records_usize(),
            remove_nulls: config.remove_nulls,
        })
    }

    /// Endpoint URL builder
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Configured page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Configured cap for paginated fetches
    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Whether response bodies are pruned of nulls
    pub fn remove_nulls(&self) -> bool {
        self.remove_nulls
    }

    /// Issue one request and return the (optionally pruned) JSON body
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        query: &StringMap,
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        let mut config = RequestConfig::new().query_map(query.clone());
        if let Some(body) = body {
            config = config.json(body);
        }

        let value = self.http.request_json(method.into(), url, config).await?;
        Ok(if self.remove_nulls { prune(value) } else { value })
    }

    /// GET a JSON document (detail endpoints, the category tree)
    pub async fn get(&self, url: &str, query: &StringMap) -> Result<JsonValue> {
        self.request(Method::GET, url, query, None).await
    }

    /// POST a JSON body
    pub async fn post(&self, url: &str, body: JsonValue) -> Result<JsonValue> {
        self.request(Method::POST, url, &StringMap::new(), Some(body))
            .await
    }

    /// GET a single page of records
    pub async fn get_records(&self, url: &str, query: &StringMap) -> Result<Vec<Record>> {
        let value = self.get(url, query).await?;
        into_records(value)
    }

    /// GET the first page of a collection using the configured page size
    pub async fn first_page(&self, url: &str, query: &StringMap) -> Result<Vec<Record>> {
        let paginator = PageNumberPaginator::new(self.page_size, usize::MAX);
        let mut params = query.clone();
        params.extend(paginator.page_params(FIRST_PAGE));
        self.get_records(url, &params).await
    }

    /// Paginated fetch
    ///
    /// Requests pages of `page_size` until a short page or `max_records`
    /// records. A failure on the first page is returned; a failure on a later
    /// page ends the fetch with the records gathered so far.
    pub async fn fetch(
        &self,
        url: &str,
        query: &StringMap,
        page_size: u32,
        max_records: usize,
    ) -> Result<Vec<Record>> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        if max_records == 0 {
            return Err(Error::invalid_value("max_records", "must be at least 1"));
        }

        let paginator = PageNumberPaginator::new(page_size, max_records);
        let source = EndpointPages { service: self, url };

        let records = fetch_pages(&source, query, &paginator).await?;
        info!(url, records = records.len(), "Fetched records");
        Ok(records)
    }

    /// Paginated fetch with the configured page size and cap
    pub async fn fetch_all(&self, url: &str, query: &StringMap) -> Result<Vec<Record>> {
        self.fetch(url, query, self.page_size, self.max_records)
            .await
    }
}

/// Adapts one collection URL of the service to a page source
struct EndpointPages<'a> {
    service: &'a ApiService,
    url: &'a str,
}

#[async_trait]
impl PageSource for EndpointPages<'_> {
    async fn fetch_page(&self, params: &StringMap) -> Result<Vec<Record>> {
        debug!(url = self.url, page = ?params.get("page_number"), "Requesting page");
        self.service.get_records(self.url, params).await
    }
}

/// A page body as a list of records
///
/// Arrays yield their elements, a lone object is a one-record page and
/// `null` is an empty page.
pub fn into_records(value: JsonValue) -> Result<Vec<Record>> {
    match value {
        JsonValue::Array(items) => Ok(items),
        JsonValue::Object(_) => Ok(vec![value]),
        JsonValue::Null => Ok(Vec::new()),
        other => Err(Error::decode(format!(
            "expected a list of records, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service(server: &MockServer, config: ClientConfig) -> ApiService {
        ApiService::new(&config.with_base_url(format!("{}/api/", server.uri()))).unwrap()
    }

    fn page(start: usize, count: usize) -> JsonValue {
        JsonValue::Array(
            (start..start + count)
                .map(|i| json!({"id": i, "gwp": null}))
                .collect(),
        )
    }

    async fn mount_page(server: &MockServer, number: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/materials"))
            .and(query_param("page_number", number))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[test]
    fn test_into_records_shapes() {
        assert_eq!(into_records(json!([{"a": 1}])).unwrap().len(), 1);
        assert_eq!(into_records(json!({"a": 1})).unwrap(), vec![json!({"a": 1})]);
        assert!(into_records(json!(null)).unwrap().is_empty());
        assert!(into_records(json!("nope")).is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_pages_pruned() {
        let server = MockServer::start().await;
        mount_page(&server, "1", ResponseTemplate::new(200).set_body_json(page(0, 2))).await;
        mount_page(&server, "2", ResponseTemplate::new(200).set_body_json(page(2, 1))).await;

        let svc = service(&server, ClientConfig::new("t").with_page_size(2)).await;
        let url = svc.endpoints().url("materials").unwrap();
        let records = svc.fetch_all(&url, &StringMap::new()).await.unwrap();

        assert_eq!(records, vec![json!({"id": 0}), json!({"id": 1}), json!({"id": 2})]);
    }

    #[tokio::test]
    async fn test_fetch_keeps_nulls_when_disabled() {
        let server = MockServer::start().await;
        mount_page(&server, "1", ResponseTemplate::new(200).set_body_json(page(0, 1))).await;

        let svc = service(
            &server,
            ClientConfig::new("t").with_page_size(2).with_remove_nulls(false),
        )
        .await;
        let url = svc.endpoints().url("materials").unwrap();
        let records = svc.fetch_all(&url, &StringMap::new()).await.unwrap();

        assert_eq!(records, vec![json!({"id": 0, "gwp": null})]);
    }

    #[tokio::test]
    async fn test_fetch_partial_on_second_page_error() {
        let server = MockServer::start().await;
        mount_page(&server, "1", ResponseTemplate::new(200).set_body_json(page(0, 2))).await;
        mount_page(&server, "2", ResponseTemplate::new(500)).await;
        mount_page(&server, "3", ResponseTemplate::new(200).set_body_json(page(4, 2))).await;

        let svc = service(&server, ClientConfig::new("t")).await;
        let url = svc.endpoints().url("materials").unwrap();
        let records = svc.fetch(&url, &StringMap::new(), 2, usize::MAX).await.unwrap();

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_first_page_error_propagates() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "1",
            ResponseTemplate::new(403).set_body_json(json!({"error": "Forbidden scope"})),
        )
        .await;

        let svc = service(&server, ClientConfig::new("t")).await;
        let url = svc.endpoints().url("materials").unwrap();
        let err = svc.fetch_all(&url, &StringMap::new()).await.unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("[Error: Forbidden scope]"));
    }

    #[tokio::test]
    async fn test_first_page_sends_page_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/materials"))
            .and(query_param("page_size", "100"))
            .and(query_param("page_number", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 3)))
            .expect(1)
            .mount(&server)
            .await;

        let svc = service(&server, ClientConfig::new("t")).await;
        let url = svc.endpoints().url("materials").unwrap();
        assert_eq!(svc.first_page(&url, &StringMap::new()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_prunes_single_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories/root"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "root",
                "masterformat": null,
                "subcategories": []
            })))
            .mount(&server)
            .await;

        let svc = service(&server, ClientConfig::new("t")).await;
        let url = svc.endpoints().url("categories/root").unwrap();
        let tree = svc.get(&url, &StringMap::new()).await.unwrap();

        assert_eq!(tree, json!({"id": "root", "subcategories": []}));
    }

    #[tokio::test]
    async fn test_post_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/materials/convert-query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"mf": "!EC3 search", "x": null})))
            .mount(&server)
            .await;

        let svc = service(&server, ClientConfig::new("t")).await;
        let url = svc.endpoints().url("materials/convert-query").unwrap();
        let value = svc.post(&url, json!({"category": "Concrete"})).await.unwrap();

        assert_eq!(value, json!({"mf": "!EC3 search"}));
    }

    #[tokio::test]
    async fn test_zero_page_size_rejected() {
        let server = MockServer::start().await;
        let svc = service(&server, ClientConfig::new("t")).await;
        let err = svc
            .fetch("http://unused", &StringMap::new(), 0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[tokio::test]
    async fn test_zero_max_records_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 1)))
            .expect(0)
            .mount(&server)
            .await;

        let svc = service(&server, ClientConfig::new("t")).await;
        let url = svc.endpoints().url("materials").unwrap();
        let err = svc.fetch(&url, &StringMap::new(), 10, 0).await.unwrap_err();

        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "max_records"));
    }
}
