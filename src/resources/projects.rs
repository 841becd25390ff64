//! Project queries

use super::query::{fetch_collection, param, QueryOptions};
use crate::endpoints;
use crate::error::Result;
use crate::service::ApiService;
use crate::types::{FetchMode, Record, StringMap};

/// Endpoints for projects in the caller's account
#[derive(Debug, Clone)]
pub struct Projects<'a> {
    service: &'a ApiService,
    options: QueryOptions,
}

impl<'a> Projects<'a> {
    pub fn new(service: &'a ApiService) -> Self {
        Self {
            service,
            options: QueryOptions {
                only_valid: false,
                ..QueryOptions::default()
            },
        }
    }

    /// Sort by a single key
    #[must_use]
    pub fn sort_by(mut self, key: impl Into<String>) -> Self {
        self.options.sort_by = Some(key.into());
        self
    }

    /// Parameters for a project search
    pub fn query_params(&self, filters: &StringMap) -> StringMap {
        self.options.assemble(filters, None)
    }

    /// Search projects
    pub async fn get_projects(&self, filters: &StringMap, mode: FetchMode) -> Result<Vec<Record>> {
        let url = self.service.endpoints().url(endpoints::PROJECTS)?;
        let params = self.query_params(filters);
        fetch_collection(self.service, &url, &params, mode).await
    }

    /// The project with this id
    pub async fn get_project_by_id(&self, project_id: &str) -> Result<Vec<Record>> {
        let url = self.service.endpoints().url(endpoints::PROJECTS)?;
        self.service.get_records(&url, &param("id", project_id)).await
    }

    /// Projects whose name matches `project_name`
    pub async fn get_projects_by_name(&self, project_name: &str) -> Result<Vec<Record>> {
        let url = self.service.endpoints().url(endpoints::PROJECTS)?;
        self.service
            .get_records(&url, &param("name__like", project_name))
            .await
    }
}
