//! CLI commands and argument parsing

use crate::types::{FetchMode, LogLevel, StringMap};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the EC3 API
#[derive(Parser, Debug)]
#[command(name = "ec3")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API token
    #[arg(long, env = "EC3_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API root URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Records per page (1-250)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Keep null-valued fields in the output
    #[arg(long, global = true)]
    pub keep_nulls: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (overrides --verbose)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by collection queries
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Filter as key=value (repeatable)
    #[arg(short, long = "filter", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,

    /// Fetch every page instead of only the first
    #[arg(long)]
    pub all: bool,

    /// Fetch pages up to this many records
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Fields to return (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Sort key (prefix with '-' for descending)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Include records whose validity has ended
    #[arg(long)]
    pub include_expired: bool,
}

impl QueryArgs {
    /// Filters as a parameter map (later duplicates win)
    pub fn filter_map(&self) -> StringMap {
        self.filters.iter().cloned().collect()
    }

    /// How many records to fetch
    pub fn mode(&self) -> FetchMode {
        match (self.max_records, self.all) {
            (Some(n), _) => FetchMode::Capped(n),
            (None, true) => FetchMode::All,
            (None, false) => FetchMode::FirstPage,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search materials
    Materials {
        #[command(flatten)]
        query: QueryArgs,

        /// Category display name (repeatable)
        #[arg(long, conflicts_with_all = ["masterformat", "postal_code"])]
        category: Vec<String>,

        /// Masterformat name, e.g. "03 21 00 Reinforcement Bars" (repeatable)
        #[arg(long, conflicts_with = "postal_code")]
        masterformat: Vec<String>,

        /// Only plants near this postal code
        #[arg(long)]
        postal_code: Option<String>,

        /// Two-letter country code of the postal code
        #[arg(long, default_value = "US")]
        country: String,

        /// Plant distance limit, e.g. "100 mi" or "50 km"
        #[arg(long, default_value = "100 mi")]
        radius: String,
    },

    /// Materials of one EPD
    Material {
        /// Open xPD UUID (e.g. EC300001)
        xpd_uuid: String,
    },

    /// Material statistics
    Statistics {
        /// Filter as key=value (repeatable)
        #[arg(short, long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,

        /// Use the cached statistics endpoint
        #[arg(long)]
        cached: bool,
    },

    /// Search EPDs
    Epds {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch one EPD
    Epd {
        /// Open xPD UUID, or EC3 id with --by-id
        id: String,

        /// Treat the argument as an EC3 id
        #[arg(long)]
        by_id: bool,
    },

    /// Search projects in your account
    Projects {
        #[command(flatten)]
        query: QueryArgs,

        /// Project name search term
        #[arg(long, conflicts_with = "id")]
        name: Option<String>,

        /// Project id
        #[arg(long)]
        id: Option<String>,
    },

    /// Category tree and lookups
    Categories {
        /// Only this category (with its sub-tree)
        #[arg(long, conflicts_with = "lookup")]
        id: Option<String>,

        /// Print a name-to-id table instead of the tree
        #[arg(long, value_enum)]
        lookup: Option<LookupKind>,
    },
}

/// Name attribute for category lookup tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LookupKind {
    /// Masterformat name to id
    Masterformat,
    /// Display name to id
    DisplayName,
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
