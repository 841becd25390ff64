//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, LookupKind, QueryArgs};
use crate::client::Ec3Client;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::resources::QueryOptions;
use crate::types::StringMap;
use serde::Serialize;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Ec3Client::with_config(build_config(&self.cli)?)?;
        debug!(?client, "Client ready");

        match &self.cli.command {
            Commands::Materials {
                query,
                category,
                masterformat,
                postal_code,
                country,
                radius,
            } => {
                let materials = client.materials().with_options(query_options(query));
                let filters = query.filter_map();
                let records = if !category.is_empty() {
                    materials
                        .get_materials_by_category(category.as_slice(), &filters, query.mode())
                        .await?
                } else if !masterformat.is_empty() {
                    materials
                        .get_materials_by_masterformat(masterformat.as_slice(), &filters, query.mode())
                        .await?
                } else if let Some(postal_code) = postal_code {
                    materials
                        .get_materials_within_region(
                            postal_code,
                            country,
                            radius,
                            &filters,
                            query.mode(),
                        )
                        .await?
                } else {
                    materials.get_materials(&filters, query.mode()).await?
                };
                info!(records = records.len(), "Materials fetched");
                self.output(&records)
            }

            Commands::Material { xpd_uuid } => {
                let records = client.materials().get_material_by_xpduuid(xpd_uuid).await?;
                self.output(&records)
            }

            Commands::Statistics { filters, cached } => {
                let filters: StringMap = filters.iter().cloned().collect();
                let materials = client.materials();
                let stats = if *cached {
                    materials.get_cached_statistics(&filters).await?
                } else {
                    materials.get_statistics(&filters).await?
                };
                self.output(&stats)
            }

            Commands::Epds { query } => {
                let records = client
                    .epds()
                    .with_options(query_options(query))
                    .get_epds(&query.filter_map(), query.mode())
                    .await?;
                info!(records = records.len(), "EPDs fetched");
                self.output(&records)
            }

            Commands::Epd { id, by_id } => {
                let epds = client.epds();
                let epd = if *by_id {
                    epds.get_epd_by_id(id).await?
                } else {
                    epds.get_epd_by_xpduuid(id).await?
                };
                self.output(&epd)
            }

            Commands::Projects { query, name, id } => {
                let mut projects = client.projects();
                if let Some(sort_by) = &query.sort_by {
                    projects = projects.sort_by(sort_by.clone());
                }
                let records = match (name, id) {
                    (_, Some(id)) => projects.get_project_by_id(id).await?,
                    (Some(name), None) => projects.get_projects_by_name(name).await?,
                    (None, None) => {
                        projects
                            .get_projects(&query.filter_map(), query.mode())
                            .await?
                    }
                };
                self.output(&records)
            }

            Commands::Categories { id, lookup } => {
                let categories = client.categories();
                match (id, lookup) {
                    (Some(id), _) => self.output(&categories.get_category_by_id(id).await?),
                    (None, Some(LookupKind::Masterformat)) => {
                        self.output(&categories.masterformat_lookup().await?)
                    }
                    (None, Some(LookupKind::DisplayName)) => {
                        self.output(&categories.display_name_lookup().await?)
                    }
                    (None, None) => self.output(&categories.get_all_categories().await?),
                }
            }
        }
    }

    /// Print a result document to stdout
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = if self.cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Client config from the config file (if any) and command-line overrides
pub fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match (&cli.config, &cli.token) {
        (Some(path), _) => ClientConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        (None, Some(token)) => ClientConfig::new(token.clone()),
        (None, None) => {
            return Err(Error::config(
                "no API token: pass --token, set EC3_API_TOKEN or use --config",
            ))
        }
    };

    if cli.config.is_some() {
        if let Some(token) = &cli.token {
            config.bearer_token.clone_from(token);
        }
    }
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size);
    }
    if cli.insecure {
        config = config.with_ssl_verify(false);
    }
    if cli.keep_nulls {
        config = config.with_remove_nulls(false);
    }

    config.validate()?;
    Ok(config)
}

fn query_options(query: &QueryArgs) -> QueryOptions {
    QueryOptions {
        return_fields: query.fields.clone(),
        sort_by: query.sort_by.clone(),
        only_valid: !query.include_expired,
    }
}
