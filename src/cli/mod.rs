//! CLI commands module

pub mod productcore;
pub mod products;
pub mod service;

#[cfg(test)]
pub(crate) mod testutil;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::FastlyClient;
use crate::errors::ErrorLog;
use crate::manifest;
use products::summary::ProductsArgs;
use products::{
    api_discovery, bot_management, brotli_compression, ddos_protection, domain_inspector, fanout,
    image_optimizer, log_explorer_insights, origin_inspector, websockets, ProductArgs,
};

/// Fastly CLI
#[derive(Parser, Debug)]
#[command(name = "fastly")]
#[command(version)]
#[command(
    about = "Enable, disable and inspect Fastly products on your services",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fastly API token
    #[arg(short, long, global = true, env = "FASTLY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enable, disable, and check the status of API Discovery
    ApiDiscovery(ProductArgs),

    /// Enable, disable, and check the status of Bot Management
    BotManagement(ProductArgs),

    /// Enable, disable, and check the status of Brotli Compression
    BrotliCompression(ProductArgs),

    /// Enable, disable, and check the status of DDoS Protection
    DdosProtection(ProductArgs),

    /// Enable, disable, and check the status of Domain Inspector
    DomainInspector(ProductArgs),

    /// Enable, disable, and check the status of Fanout
    Fanout(ProductArgs),

    /// Enable, disable, and check the status of Image Optimizer
    ImageOptimizer(ProductArgs),

    /// Enable, disable, and check the status of Log Explorer & Insights
    LogExplorerInsights(ProductArgs),

    /// Enable, disable, and check the status of Origin Inspector
    OriginInspector(ProductArgs),

    /// Enable, disable, and check the status of WebSockets
    Websockets(ProductArgs),

    /// Enable, disable, and check the enablement status of all products
    Products(ProductsArgs),
}

/// State shared by every command for the duration of one run
pub struct Globals {
    pub verbose: bool,
    pub manifest: manifest::Data,
    pub client: FastlyClient,
    pub err_log: Arc<dyn ErrorLog>,
}

/// Dispatch a parsed command
pub async fn run<W: Write>(command: Commands, globals: &Globals, out: &mut W) -> Result<()> {
    use products::execute;

    match command {
        Commands::ApiDiscovery(args) => {
            execute(globals, &api_discovery::HOOKS, api_discovery::PRODUCT_NAME, args, out).await
        }
        Commands::BotManagement(args) => {
            execute(globals, &bot_management::HOOKS, bot_management::PRODUCT_NAME, args, out).await
        }
        Commands::BrotliCompression(args) => {
            execute(
                globals,
                &brotli_compression::HOOKS,
                brotli_compression::PRODUCT_NAME,
                args,
                out,
            )
            .await
        }
        Commands::DdosProtection(args) => {
            execute(globals, &ddos_protection::HOOKS, ddos_protection::PRODUCT_NAME, args, out)
                .await
        }
        Commands::DomainInspector(args) => {
            execute(
                globals,
                &domain_inspector::HOOKS,
                domain_inspector::PRODUCT_NAME,
                args,
                out,
            )
            .await
        }
        Commands::Fanout(args) => {
            execute(globals, &fanout::HOOKS, fanout::PRODUCT_NAME, args, out).await
        }
        Commands::ImageOptimizer(args) => {
            execute(globals, &image_optimizer::HOOKS, image_optimizer::PRODUCT_NAME, args, out)
                .await
        }
        Commands::LogExplorerInsights(args) => {
            execute(
                globals,
                &log_explorer_insights::HOOKS,
                log_explorer_insights::PRODUCT_NAME,
                args,
                out,
            )
            .await
        }
        Commands::OriginInspector(args) => {
            execute(
                globals,
                &origin_inspector::HOOKS,
                origin_inspector::PRODUCT_NAME,
                args,
                out,
            )
            .await
        }
        Commands::Websockets(args) => {
            execute(globals, &websockets::HOOKS, websockets::PRODUCT_NAME, args, out).await
        }
        Commands::Products(args) => products::summary::execute(globals, args, out).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    async fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("fastly").chain(args.iter().copied()))?;
        let (globals, _log) = testutil::globals(cli.verbose);
        let mut out = Vec::new();
        run(cli.command, &globals, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_product_subcommands() {
        let cli = Cli::try_parse_from(["fastly", "log-explorer-insights", "status", "-s", "123"])
            .unwrap();
        match cli.command {
            Commands::LogExplorerInsights(args) => match args.command {
                products::EnablementCommand::Status(service) => {
                    assert_eq!(service.service_id.as_deref(), Some("123"));
                    assert!(!service.json);
                }
                other => panic!("unexpected command: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_usage_errors_reach_no_api() {
        let err = run_args(&["ddos-protection", "enable"]).await.unwrap_err();
        assert_eq!(err.to_string(), "error reading service: no service ID found");

        let err = run_args(&["websockets", "status", "-s", "123", "--json", "--verbose"])
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid flag combination, --verbose and --json"
        );
    }

    #[tokio::test]
    async fn test_usage_errors_precede_authentication() {
        let cases = [
            (
                &["bot-management", "enable", "--json", "--verbose", "-s", "123"][..],
                "invalid flag combination, --verbose and --json",
            ),
            (
                &["bot-management", "status"][..],
                "error reading service: no service ID found",
            ),
            (
                &["products", "--enable", "fanout", "--disable", "fanout", "-s", "1"][..],
                "invalid flag combination: --enable and --disable",
            ),
        ];

        for (args, want) in cases {
            let err = run_args(args).await.unwrap_err();
            assert_eq!(err.to_string(), want, "fastly {}", args.join(" "));
        }
    }

    #[tokio::test]
    async fn test_missing_token_reported_on_request() {
        let err = run_args(&["fanout", "status", "-s", "123"]).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Authentication required. Set FASTLY_API_TOKEN or pass --token"
        );
    }
}
