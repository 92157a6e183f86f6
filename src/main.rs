//! Fastly CLI - product enablement for Fastly services
//!
//! Every product exposes the same `enable`, `disable` and `status` commands,
//! backed by the enabled-products API.

mod api;
mod cli;
mod config;
mod errors;
mod manifest;
mod output;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::FastlyClient;
use crate::cli::{Cli, Globals};
use crate::config::Config;
use crate::errors::LogEntries;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.token.clone());
    let manifest = manifest::Data::load(&config)?;
    let client = FastlyClient::new(&config)?;

    let err_log = Arc::new(LogEntries::default());
    let globals = Globals {
        verbose: cli.verbose,
        manifest,
        client,
        err_log: err_log.clone(),
    };

    // Execute command
    let mut out = io::stdout();
    let result = cli::run(cli.command, &globals, &mut out).await;

    if result.is_err() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let persisted = Config::error_log_path().and_then(|path| err_log.persist(&path, &args));
        if let Err(err) = persisted {
            warn!("failed to persist error log: {}", err);
        }
    }

    result
}
