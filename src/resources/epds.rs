//! EPD queries

use super::query::{fetch_collection, today, QueryOptions};
use crate::endpoints;
use crate::error::Result;
use crate::service::ApiService;
use crate::types::{FetchMode, JsonValue, Record, StringMap};
use chrono::NaiveDate;

/// Validity cutoff parameter for EPDs
pub const EPD_VALIDITY_KEY: &str = "date_validity_ends__gt";

/// EPD endpoints
#[derive(Debug, Clone)]
pub struct Epds<'a> {
    service: &'a ApiService,
    options: QueryOptions,
}

impl<'a> Epds<'a> {
    pub fn new(service: &'a ApiService) -> Self {
        Self {
            service,
            options: QueryOptions::default(),
        }
    }

    /// Only return these fields
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.return_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sort by a single key
    #[must_use]
    pub fn sort_by(mut self, key: impl Into<String>) -> Self {
        self.options.sort_by = Some(key.into());
        self
    }

    /// Include expired EPDs
    #[must_use]
    pub fn include_expired(mut self) -> Self {
        self.options.only_valid = false;
        self
    }

    /// Replace all query defaults
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Parameters for an EPD search on `today`
    pub fn query_params(&self, filters: &StringMap, today: NaiveDate) -> StringMap {
        self.options.assemble(filters, Some((EPD_VALIDITY_KEY, today)))
    }

    /// Search EPDs
    pub async fn get_epds(&self, filters: &StringMap, mode: FetchMode) -> Result<Vec<Record>> {
        let url = self.service.endpoints().url(endpoints::EPDS)?;
        let params = self.query_params(filters, today());
        fetch_collection(self.service, &url, &params, mode).await
    }

    /// The EPD with this Open xPD UUID
    pub async fn get_epd_by_xpduuid(&self, epd_xpd_uuid: &str) -> Result<JsonValue> {
        let url = self
            .service
            .endpoints()
            .url_with(endpoints::EPD_BY_XPD_UUID, &[("epd_xpd_uuid", epd_xpd_uuid)])?;
        self.service.get(&url, &StringMap::new()).await
    }

    /// The EPD with this EC3 id
    pub async fn get_epd_by_id(&self, id: &str) -> Result<JsonValue> {
        let url = self
            .service
            .endpoints()
            .url_with(endpoints::EPD_BY_ID, &[("id", id)])?;
        self.service.get(&url, &StringMap::new()).await
    }
}
