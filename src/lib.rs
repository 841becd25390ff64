// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ec3-client
//!
//! A thin client for the EC3 building-materials REST API
//! (<https://buildingtransparency.org/ec3/manage-apps/api-doc/api>).
//!
//! ## Features
//!
//! - **Bearer auth**: every request carries the account's API token
//! - **Pagination**: page-number pagination with a total record cap
//! - **Null removal**: EC3 returns every field; nulls are dropped by default
//! - **Filters**: validity cutoff, field selection, sort key, category and
//!   masterformat names, radius around a postal code
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ec3_client::{ClientConfig, Ec3Client, FetchMode, Result, StringMap};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Ec3Client::with_config(ClientConfig::new("token").with_max_records(500))?;
//!
//!     let mut filters = StringMap::new();
//!     filters.insert("concrete_compressive_strength_at_28d".into(), "5000 psi".into());
//!
//!     let concrete = client
//!         .materials()
//!         .with_fields(["id", "name", "gwp"])
//!         .get_materials_by_masterformat(&["03 30 00 Cast-in-Place Concrete"], &filters, FetchMode::All)
//!         .await?;
//!
//!     println!("{} materials", concrete.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Ec3Client ──► Materials / Epds / Projects / Categories   (parameter assembly)
//!                  │
//!                  ▼
//!              ApiService ──► pagination::fetch_pages      (page loop, record cap)
//!                  │      ──► prune                        (null removal)
//!                  ▼
//!              HttpClient ──► Authenticator, RateLimiter   (transport)
//! ```

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod geo;
pub mod http;
pub mod pagination;
pub mod prune;
pub mod resources;
pub mod service;
pub mod template;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use client::Ec3Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use geo::{Coordinates, Geocoder, StaticGeocoder, ZippopotamGeocoder};
pub use prune::prune;
pub use service::ApiService;
pub use types::{FetchMode, JsonObject, JsonValue, Record, StringMap};
