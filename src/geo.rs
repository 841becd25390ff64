//! Postal code geocoding
//!
//! The region filter needs a latitude/longitude for a postal code. Lookups go
//! through the [`Geocoder`] trait; not-found codes resolve to
//! [`Coordinates::NULL_ISLAND`] `(0, 0)`.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Public postal code lookup service used by [`ZippopotamGeocoder`]
pub const ZIPPOPOTAM_BASE_URL: &str = "https://api.zippopotam.us";

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// `(0, 0)`, returned when a postal code is not found
    pub const NULL_ISLAND: Self = Self {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether this is the not-found sentinel
    pub fn is_null_island(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Resolves postal codes to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up `postal_code` in the two-letter `country_code`
    async fn locate(&self, postal_code: &str, country_code: &str) -> Result<Coordinates>;
}

// ============================================================================
// HTTP geocoder
// ============================================================================

/// Geocoder backed by the Zippopotam.us postal code API
///
/// `GET <base>/<country>/<postal>`; a 404 means the code is unknown.
#[derive(Debug, Clone)]
pub struct ZippopotamGeocoder {
    client: Client,
    base_url: String,
}

impl ZippopotamGeocoder {
    /// Geocoder against the public service
    pub fn new() -> Self {
        Self::with_base_url(ZIPPOPOTAM_BASE_URL)
    }

    /// Geocoder against another deployment of the same API
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn parse(body: &Value) -> Result<Coordinates> {
        let place = body
            .get("places")
            .and_then(Value::as_array)
            .and_then(|places| places.first());
        let Some(place) = place else {
            return Ok(Coordinates::NULL_ISLAND);
        };

        let latitude = coordinate(place, "latitude")?;
        let longitude = coordinate(place, "longitude")?;
        Ok(Coordinates::new(latitude, longitude))
    }
}

impl Default for ZippopotamGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinates arrive as strings ("34.0901"), occasionally as numbers
fn coordinate(place: &Value, field: &str) -> Result<f64> {
    match place.get(field) {
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| Error::geocode(format!("invalid {field} '{s}'"))),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| Error::geocode(format!("invalid {field} '{n}'"))),
        _ => Err(Error::geocode(format!("missing {field}"))),
    }
}

#[async_trait]
impl Geocoder for ZippopotamGeocoder {
    async fn locate(&self, postal_code: &str, country_code: &str) -> Result<Coordinates> {
        let mut url = url::Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::geocode("geocoder base URL cannot hold a path"))?
            .pop_if_empty()
            .push(&country_code.to_lowercase())
            .push(postal_code.trim());

        debug!(postal_code, country_code, "Geocoding postal code");
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Coordinates::NULL_ISLAND);
        }
        if !response.status().is_success() {
            return Err(Error::geocode(format!(
                "lookup failed with HTTP {}",
                response.status().as_u16()
            )));
        }

        let body: Value = response.json().await?;
        Self::parse(&body)
    }
}

// ============================================================================
// Static geocoder
// ============================================================================

/// In-memory postal code table
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    entries: HashMap<(String, String), Coordinates>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    #[must_use]
    pub fn with_entry(
        mut self,
        postal_code: &str,
        country_code: &str,
        coordinates: Coordinates,
    ) -> Self {
        self.entries.insert(key(postal_code, country_code), coordinates);
        self
    }
}

fn key(postal_code: &str, country_code: &str) -> (String, String) {
    (
        postal_code.trim().to_string(),
        country_code.trim().to_uppercase(),
    )
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn locate(&self, postal_code: &str, country_code: &str) -> Result<Coordinates> {
        Ok(self
            .entries
            .get(&key(postal_code, country_code))
            .copied()
            .unwrap_or(Coordinates::NULL_ISLAND))
    }
}
