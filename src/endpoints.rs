//! EC3 endpoint templates
//!
//! Paths are relative to the API root. Placeholders are filled per path
//! segment and percent-encoded, so ids containing reserved characters stay
//! inside their segment.

use crate::error::{Error, Result};
use crate::template;
use crate::types::StringMap;
use url::Url;

// Materials
pub const MATERIALS: &str = "materials";
pub const MATERIAL_STATISTICS: &str = "materials/statistics.{format}";
pub const MATERIAL_STATISTICS_CACHED: &str = "materials/statistics/cached.{format}";

// EPDs
pub const EPDS: &str = "epds";
pub const EPD_BY_XPD_UUID: &str = "epds/{epd_xpd_uuid}";
pub const EPD_BY_ID: &str = "epds/{id}.{format}";

// Projects
pub const PROJECTS: &str = "projects";

// Categories
pub const CATEGORIES_ROOT: &str = "categories/root";
pub const CATEGORY_BY_ID: &str = "categories/{category_id}";

/// Builds absolute endpoint URLs from templates
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    format: String,
}

impl Endpoints {
    /// Create a builder rooted at `base_url`
    pub fn new(base_url: &str, format: impl Into<String>) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!("'{base_url}' cannot be used as an API root")));
        }
        Ok(Self {
            base,
            format: format.into(),
        })
    }

    /// The API root
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL for a template whose only placeholder (if any) is `{format}`
    pub fn url(&self, template: &str) -> Result<String> {
        self.url_with(template, &[])
    }

    /// URL for a template with named placeholders
    pub fn url_with(&self, template: &str, vars: &[(&str, &str)]) -> Result<String> {
        let mut values: StringMap = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        values
            .entry("format".to_string())
            .or_insert_with(|| self.format.clone());

        let rendered = template
            .split('/')
            .map(|segment| {
                let value = template::render(segment, &values)?;
                if matches!(value.as_str(), "" | "." | "..") {
                    return Err(Error::invalid_value(
                        segment.trim_matches(|c| c == '{' || c == '}'),
                        format!("'{value}' is not a valid path segment"),
                    ));
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config("API root cannot hold a path"))?
            .pop_if_empty()
            .extend(&rendered);
        Ok(url.to_string())
    }
}
