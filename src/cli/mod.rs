//! CLI module
//!
//! Command-line interface over [`Ec3Client`](crate::Ec3Client).
//!
//! # Commands
//!
//! - `materials` - Search materials (category, masterformat or region filters)
//! - `material` - Materials of one EPD by Open xPD UUID
//! - `statistics` - Material statistics
//! - `epds` / `epd` - Search EPDs, fetch one
//! - `projects` - Search projects in the account
//! - `categories` - Category tree, one category, or name-to-id lookups

mod commands;
mod runner;

pub use commands::{Cli, Commands, LookupKind, QueryArgs};
pub use runner::{build_config, Runner};
