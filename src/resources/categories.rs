//! Category tree and name lookups

use crate::endpoints;
use crate::error::{Error, Result};
use crate::service::ApiService;
use crate::tree::lookup_table;
use crate::types::{JsonValue, StringMap};
use std::collections::HashMap;

/// Node attribute holding the masterformat name ("03 21 00 Reinforcement Bars")
pub const MASTERFORMAT_ATTR: &str = "masterformat";

/// Node attribute holding the display name ("Rebar")
pub const DISPLAY_NAME_ATTR: &str = "display_name";

/// Category endpoints
#[derive(Debug, Clone, Copy)]
pub struct Categories<'a> {
    service: &'a ApiService,
}

impl<'a> Categories<'a> {
    pub fn new(service: &'a ApiService) -> Self {
        Self { service }
    }

    /// The whole category tree
    pub async fn get_all_categories(&self) -> Result<JsonValue> {
        let url = self.service.endpoints().url(endpoints::CATEGORIES_ROOT)?;
        self.service.get(&url, &StringMap::new()).await
    }

    /// One category with its sub-tree
    pub async fn get_category_by_id(&self, category_id: &str) -> Result<JsonValue> {
        let url = self
            .service
            .endpoints()
            .url_with(endpoints::CATEGORY_BY_ID, &[("category_id", category_id)])?;
        self.service.get(&url, &StringMap::new()).await
    }

    /// Masterformat name to category id, from the full tree
    pub async fn masterformat_lookup(&self) -> Result<HashMap<String, String>> {
        let tree = self.get_all_categories().await?;
        Ok(lookup_table(&tree, MASTERFORMAT_ATTR))
    }

    /// Display name to category id, from the full tree
    pub async fn display_name_lookup(&self) -> Result<HashMap<String, String>> {
        let tree = self.get_all_categories().await?;
        Ok(lookup_table(&tree, DISPLAY_NAME_ATTR))
    }
}

/// Translate names to category ids
///
/// Ids are de-duplicated, keeping first-seen order. Unknown names are an
/// error.
pub fn category_ids<S: AsRef<str>>(
    lookup: &HashMap<String, String>,
    names: &[S],
) -> Result<Vec<String>> {
    let mut ids: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let id = lookup
            .get(name)
            .ok_or_else(|| Error::unknown_category(name))?;
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    Ok(ids)
}
