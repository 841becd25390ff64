//! Material queries
//!
//! Materials are searched with free-form EC3 filters (see the EC3 API docs
//! for field names) plus a few conveniences: category and masterformat
//! names, a radius around a postal code, and the validity cutoff.

use super::categories::{category_ids, Categories};
use super::query::{fetch_collection, param, today, QueryOptions};
use crate::endpoints;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, Geocoder};
use crate::service::ApiService;
use crate::types::{FetchMode, JsonValue, Record, StringMap};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Validity cutoff parameter for materials
pub const MATERIAL_VALIDITY_KEY: &str = "epd__date_validity_ends__gt";

/// Category filter parameter
pub const CATEGORY_PARAM: &str = "category";

/// Plant distance filter parameter
pub const PLANT_DISTANCE_PARAM: &str = "plant__distance__lt";

/// Material endpoints
#[derive(Clone)]
pub struct Materials<'a> {
    service: &'a ApiService,
    geocoder: &'a dyn Geocoder,
    options: QueryOptions,
}

impl<'a> Materials<'a> {
    pub fn new(service: &'a ApiService, geocoder: &'a dyn Geocoder) -> Self {
        Self {
            service,
            geocoder,
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

    /// Sort by a single key (prefix with `-` for descending)
    #[must_use]
    pub fn sort_by(mut self, key: impl Into<String>) -> Self {
        self.options.sort_by = Some(key.into());
        self
    }

    /// Include materials whose EPD has expired
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

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Parameters for a material search on `today`
    pub fn query_params(&self, filters: &StringMap, today: NaiveDate) -> StringMap {
        self.options
            .assemble(filters, Some((MATERIAL_VALIDITY_KEY, today)))
    }

    /// Parameters restricting a search to `ids`
    pub fn category_params(&self, ids: &[String], filters: &StringMap, today: NaiveDate) -> StringMap {
        let mut params = self.query_params(filters, today);
        params.insert(CATEGORY_PARAM.to_string(), ids.join(","));
        params
    }

    /// Parameters restricting a search to plants within `radius` of `at`
    pub fn region_params(
        &self,
        at: Coordinates,
        radius: &str,
        filters: &StringMap,
        today: NaiveDate,
    ) -> StringMap {
        let mut params = self.query_params(filters, today);
        params.insert("latitude".to_string(), at.latitude.to_string());
        params.insert("longitude".to_string(), at.longitude.to_string());
        params.insert(PLANT_DISTANCE_PARAM.to_string(), radius.to_string());
        params
    }

    /// Search materials
    pub async fn get_materials(&self, filters: &StringMap, mode: FetchMode) -> Result<Vec<Record>> {
        let params = self.query_params(filters, today());
        self.run(&params, mode).await
    }

    /// Materials of the EPD with this Open xPD UUID (e.g. `EC300001`)
    pub async fn get_material_by_xpduuid(&self, epd_xpd_uuid: &str) -> Result<Vec<Record>> {
        let url = self.service.endpoints().url(endpoints::MATERIALS)?;
        self.service
            .get_records(&url, &param("open_xpd_uuid", epd_xpd_uuid))
            .await
    }

    /// Search materials in the categories with these display names
    pub async fn get_materials_by_category<S: AsRef<str>>(
        &self,
        names: &[S],
        filters: &StringMap,
        mode: FetchMode,
    ) -> Result<Vec<Record>> {
        require_names(names)?;
        let lookup = Categories::new(self.service).display_name_lookup().await?;
        self.by_category_lookup(&lookup, names, filters, mode).await
    }

    /// Search materials in the categories with these masterformat names
    pub async fn get_materials_by_masterformat<S: AsRef<str>>(
        &self,
        codes: &[S],
        filters: &StringMap,
        mode: FetchMode,
    ) -> Result<Vec<Record>> {
        require_names(codes)?;
        let lookup = Categories::new(self.service).masterformat_lookup().await?;
        self.by_category_lookup(&lookup, codes, filters, mode).await
    }

    async fn by_category_lookup<S: AsRef<str>>(
        &self,
        lookup: &HashMap<String, String>,
        names: &[S],
        filters: &StringMap,
        mode: FetchMode,
    ) -> Result<Vec<Record>> {
        let ids = category_ids(lookup, names)?;
        debug!(?ids, "Resolved category filter");
        let params = self.category_params(&ids, filters, today());
        self.run(&params, mode).await
    }

    /// Search materials from plants within `radius` (e.g. `"100 mi"`) of a
    /// postal code
    pub async fn get_materials_within_region(
        &self,
        postal_code: &str,
        country_code: &str,
        radius: &str,
        filters: &StringMap,
        mode: FetchMode,
    ) -> Result<Vec<Record>> {
        let at = self.geocoder.locate(postal_code, country_code).await?;
        if at.is_null_island() {
            warn!(postal_code, country_code, "Postal code not found");
            return Err(Error::PostalCodeNotFound {
                postal_code: postal_code.to_string(),
                country_code: country_code.to_string(),
            });
        }

        let params = self.region_params(at, radius, filters, today());
        self.run(&params, mode).await
    }

    /// Aggregate statistics for materials matching `filters`
    pub async fn get_statistics(&self, filters: &StringMap) -> Result<JsonValue> {
        let url = self.service.endpoints().url(endpoints::MATERIAL_STATISTICS)?;
        self.service.get(&url, filters).await
    }

    /// Cached aggregate statistics
    pub async fn get_cached_statistics(&self, filters: &StringMap) -> Result<JsonValue> {
        let url = self
            .service
            .endpoints()
            .url(endpoints::MATERIAL_STATISTICS_CACHED)?;
        self.service.get(&url, filters).await
    }

    async fn run(&self, params: &StringMap, mode: FetchMode) -> Result<Vec<Record>> {
        let url = self.service.endpoints().url(endpoints::MATERIALS)?;
        fetch_collection(self.service, &url, params, mode).await
    }
}

impl std::fmt::Debug for Materials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materials")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A category filter needs at least one name
fn require_names<S>(names: &[S]) -> Result<()> {
    if names.is_empty() {
        return Err(Error::invalid_value(
            "names",
            "at least one category is required",
        ));
    }
    Ok(())
}
