//! Shared query parameter assembly

use crate::error::Result;
use crate::service::ApiService;
use crate::types::{FetchMode, Record, StringMap};
use chrono::{Local, NaiveDate};

/// Date format of the validity cutoff parameter
pub const VALIDITY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Per-handle query defaults
///
/// Caller-supplied filters take precedence over every default here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Fields to return, sent comma-joined as `fields`
    pub return_fields: Vec<String>,
    /// Single sort key, sent as `sort_by`
    pub sort_by: Option<String>,
    /// Only records whose validity ends after today
    pub only_valid: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            return_fields: Vec::new(),
            sort_by: None,
            only_valid: true,
        }
    }
}

impl QueryOptions {
    /// Merge `filters` with these defaults
    ///
    /// `validity` is the resource's cutoff parameter with the date to send,
    /// `None` for resources without one.
    pub fn assemble(
        &self,
        filters: &StringMap,
        validity: Option<(&str, NaiveDate)>,
    ) -> StringMap {
        let mut params = filters.clone();

        if !self.return_fields.is_empty() {
            params
                .entry("fields".to_string())
                .or_insert_with(|| self.return_fields.join(","));
        }

        if let Some(sort_by) = &self.sort_by {
            params
                .entry("sort_by".to_string())
                .or_insert_with(|| sort_by.clone());
        }

        if let (true, Some((key, today))) = (self.only_valid, validity) {
            params
                .entry(key.to_string())
                .or_insert_with(|| today.format(VALIDITY_DATE_FORMAT).to_string());
        }

        params
    }
}

/// Today's date in local time
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Run a collection query in the requested mode
pub(crate) async fn fetch_collection(
    service: &ApiService,
    url: &str,
    params: &StringMap,
    mode: FetchMode,
) -> Result<Vec<Record>> {
    match mode {
        FetchMode::FirstPage => service.first_page(url, params).await,
        FetchMode::All => service.fetch_all(url, params).await,
        FetchMode::Capped(max_records) => {
            service
                .fetch(url, params, service.page_size(), max_records)
                .await
        }
    }
}

/// Single-parameter map
pub(crate) fn param(key: &str, value: &str) -> StringMap {
    let mut params = StringMap::new();
    params.insert(key.to_string(), value.to_string());
    params
}
