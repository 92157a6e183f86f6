//! `products` command: enablement across every product at once

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{anyhow, Result};
use clap::builder::PossibleValuesParser;
use clap::Args;
use tracing::debug;

use crate::cli::productcore::EnablementStatus;
use crate::cli::products::{find, Product, PRODUCTS};
use crate::cli::service::{self, ServiceArgs};
use crate::cli::Globals;
use crate::errors::UsageError;
use crate::output;

#[derive(Args, Debug)]
pub struct ProductsArgs {
    /// Enable a product
    #[arg(long, value_parser = PossibleValuesParser::new(PRODUCTS.iter().map(|p| p.id)))]
    pub enable: Option<String>,

    /// Disable a product
    #[arg(long, value_parser = PossibleValuesParser::new(PRODUCTS.iter().map(|p| p.id)))]
    pub disable: Option<String>,

    #[command(flatten)]
    pub service: ServiceArgs,
}

pub async fn execute<W: Write>(globals: &Globals, args: ProductsArgs, out: &mut W) -> Result<()> {
    execute_with(globals, &PRODUCTS, args, out).await
}

/// Run the command against an explicit product list
pub async fn execute_with<W: Write>(
    globals: &Globals,
    products: &[Product],
    args: ProductsArgs,
    out: &mut W,
) -> Result<()> {
    if args.enable.is_some() && args.disable.is_some() {
        return Err(UsageError::EnableDisableCombo.into());
    }

    if globals.verbose && args.service.json {
        return Err(UsageError::VerboseJsonCombo.into());
    }

    let service = service::service_id(
        &args.service,
        &globals.manifest,
        &globals.client,
        globals.err_log.as_ref(),
    )
    .await
    .map_err(|e| anyhow!("failed to identify Service ID: {}", e))?;

    if globals.verbose {
        service::display_service_id(out, &service)?;
    }
    let service_id = service.id.as_str();

    let lookup = |id: &str| {
        find(products, id)
            .ok_or_else(|| anyhow::Error::from(UsageError::UnknownProduct(id.to_string())))
    };

    if let Some(ref id) = args.enable {
        let product = lookup(id)?;
        product
            .hooks
            .enable(&globals.client, service_id)
            .await
            .inspect_err(|err| log_failure(globals, err, product, service_id))
            .map_err(|e| anyhow!("failed to enable product '{}': {}", id, e))?;

        if output::write_json(out, args.service.json, &EnablementStatus { enabled: true })? {
            return Ok(());
        }
        output::success(out, &format!("Successfully enabled product '{}'", id))?;
        return Ok(());
    }

    if let Some(ref id) = args.disable {
        let product = lookup(id)?;
        product
            .hooks
            .disable(&globals.client, service_id)
            .await
            .inspect_err(|err| log_failure(globals, err, product, service_id))
            .map_err(|e| anyhow!("failed to disable product '{}': {}", id, e))?;

        if output::write_json(out, args.service.json, &EnablementStatus { enabled: false })? {
            return Ok(());
        }
        output::success(out, &format!("Successfully disabled product '{}'", id))?;
        return Ok(());
    }

    // Any failure to read a product's state shows as not enabled
    let mut statuses = Vec::with_capacity(products.len());
    for product in products {
        let enabled = product
            .hooks
            .is_enabled(&globals.client, service_id)
            .await
            .unwrap_or_else(|err| {
                debug!(product = product.id, error = %err, "product status unavailable");
                false
            });
        debug!(product = product.id, enabled, "product status");
        statuses.push((product, enabled));
    }

    let by_id: BTreeMap<&str, bool> = statuses.iter().map(|(p, e)| (p.id, *e)).collect();
    if output::write_json(out, args.service.json, &by_id)? {
        return Ok(());
    }

    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|(p, enabled)| vec![p.name.to_string(), enabled.to_string()])
        .collect();
    output::write_table(out, &["PRODUCT", "ENABLED"], &rows)?;

    Ok(())
}

fn log_failure(globals: &Globals, err: &anyhow::Error, product: &Product, service_id: &str) {
    globals.err_log.add_with_context(
        err,
        &[("product_id", product.id), ("service_id", service_id)],
    );
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::api::EnableOutput;
    use crate::cli::productcore::EnablementHooks;
    use crate::cli::testutil;

    static ENABLED: EnablementHooks<EnableOutput> = EnablementHooks {
        disable: testutil::ok_unit,
        enable: testutil::ok_output::<EnableOutput>,
        get: testutil::ok_output::<EnableOutput>,
    };

    static DISABLED: EnablementHooks<EnableOutput> = EnablementHooks {
        disable: testutil::ok_unit,
        enable: testutil::ok_output::<EnableOutput>,
        get: testutil::bad_request::<EnableOutput>,
    };

    static BROKEN: EnablementHooks<EnableOutput> = EnablementHooks {
        disable: testutil::failing_unit,
        enable: testutil::failing_output::<EnableOutput>,
        get: testutil::server_error::<EnableOutput>,
    };

    static HEALTHY: [Product; 2] = [
        Product {
            id: "fanout",
            name: "Fanout",
            hooks: &ENABLED,
        },
        Product {
            id: "websockets",
            name: "WebSockets",
            hooks: &DISABLED,
        },
    ];

    static FAILING: [Product; 2] = [
        Product {
            id: "fanout",
            name: "Fanout",
            hooks: &ENABLED,
        },
        Product {
            id: "websockets",
            name: "WebSockets",
            hooks: &BROKEN,
        },
    ];

    #[derive(Parser)]
    struct TestCli {
        #[arg(short, long, global = true)]
        verbose: bool,

        #[command(flatten)]
        args: ProductsArgs,
    }

    async fn run(products: &[Product], args: &str) -> (Result<()>, String) {
        let cli =
            TestCli::try_parse_from(std::iter::once("products").chain(args.split_whitespace()))
                .expect("valid arguments");
        let (globals, _log) = testutil::globals(cli.verbose);
        let mut out = Vec::new();

        let result = execute_with(&globals, products, cli.args, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_missing_service_id() {
        let (result, _) = run(&HEALTHY, "").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed to identify Service ID: error reading service: no service ID found"
        );
    }

    #[tokio::test]
    async fn test_enable_and_disable_together() {
        let (result, _) = run(&HEALTHY, "--enable fanout --disable fanout -s 123").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "invalid flag combination: --enable and --disable"
        );
    }

    #[tokio::test]
    async fn test_status_table() {
        let (result, stdout) = run(&HEALTHY, "--service-id 123").await;
        result.unwrap();
        assert_eq!(
            stdout,
            "PRODUCT     ENABLED\nFanout      true\nWebSockets  false\n"
        );
    }

    #[tokio::test]
    async fn test_status_json() {
        let (result, stdout) = run(&HEALTHY, "--service-id 123 --json").await;
        result.unwrap();
        assert_eq!(
            stdout,
            "{\n  \"fanout\": true,\n  \"websockets\": false\n}\n"
        );
    }

    #[tokio::test]
    async fn test_status_api_error_shows_disabled() {
        let (result, stdout) = run(&FAILING, "--service-id 123").await;
        result.unwrap();
        assert_eq!(
            stdout,
            "PRODUCT     ENABLED\nFanout      true\nWebSockets  false\n"
        );

        let (result, stdout) = run(&FAILING, "--service-id 123 --json").await;
        result.unwrap();
        assert_eq!(
            stdout,
            "{\n  \"fanout\": true,\n  \"websockets\": false\n}\n"
        );
    }

    #[tokio::test]
    async fn test_enable_product() {
        let (result, stdout) = run(&HEALTHY, "--enable websockets --service-id 123").await;
        result.unwrap();
        assert_eq!(stdout, "SUCCESS: Successfully enabled product 'websockets'\n");
    }

    #[tokio::test]
    async fn test_disable_product() {
        let (result, stdout) = run(&HEALTHY, "--disable fanout --service-id 123").await;
        result.unwrap();
        assert_eq!(stdout, "SUCCESS: Successfully disabled product 'fanout'\n");
    }

    #[tokio::test]
    async fn test_enable_failure() {
        let (result, stdout) = run(&FAILING, "--enable websockets --service-id 123").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed to enable product 'websockets': test error"
        );
        assert!(stdout.is_empty());
    }

    #[tokio::test]
    async fn test_disable_failure() {
        let (result, stdout) = run(&FAILING, "--disable websockets --service-id 123").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed to disable product 'websockets': test error"
        );
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_rejects_unknown_product() {
        assert!(TestCli::try_parse_from(["products", "--enable", "ngwaf"]).is_err());
    }
}
