//! Resource handles
//!
//! Each handle borrows the shared [`ApiService`](crate::service::ApiService)
//! and assembles query parameters for one part of the API:
//!
//! - [`Materials`]: material search, category/masterformat and region filters,
//!   statistics
//! - [`Epds`]: EPD search and lookup by Open xPD UUID or id
//! - [`Projects`]: projects in the caller's account
//! - [`Categories`]: the category tree and name-to-id lookups

mod categories;
mod epds;
mod materials;
mod projects;
mod query;

pub use categories::{category_ids, Categories, DISPLAY_NAME_ATTR, MASTERFORMAT_ATTR};
pub use epds::{Epds, EPD_VALIDITY_KEY};
pub use materials::{Materials, CATEGORY_PARAM, MATERIAL_VALIDITY_KEY, PLANT_DISTANCE_PARAM};
pub use projects::Projects;
pub use query::{QueryOptions, VALIDITY_DATE_FORMAT};
