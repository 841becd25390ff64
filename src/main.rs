// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! EC3 CLI
//!
//! Command-line interface for querying the EC3 API

use clap::Parser;
use ec3_client::cli::{Cli, Runner};
use ec3_client::types::LogLevel;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = cli.log_level.unwrap_or(if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    // Logs go to stderr; stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::from(level).into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
