//! Client facade
//!
//! `Ec3Client` owns the request service and the geocoder, and hands out
//! short-lived resource handles that borrow them.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::geo::{Geocoder, ZippopotamGeocoder};
use crate::resources::{Categories, Epds, Materials, Projects};
use crate::service::ApiService;
use std::sync::Arc;

/// Entry point for the EC3 API
pub struct Ec3Client {
    service: ApiService,
    geocoder: Arc<dyn Geocoder>,
}

impl Ec3Client {
    /// Client with default settings for `bearer_token`
    pub fn new(bearer_token: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(bearer_token))
    }

    /// Client from a full config
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            service: ApiService::new(&config)?,
            geocoder: Arc::new(ZippopotamGeocoder::new()),
        })
    }

    /// Swap the geocoder used by the region filter
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = geocoder;
        self
    }

    /// The shared request service
    pub fn service(&self) -> &ApiService {
        &self.service
    }

    pub fn materials(&self) -> Materials<'_> {
        Materials::new(&self.service, self.geocoder.as_ref())
    }

    pub fn epds(&self) -> Epds<'_> {
        Epds::new(&self.service)
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(&self.service)
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(&self.service)
    }
}

impl std::fmt::Debug for Ec3Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ec3Client")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
