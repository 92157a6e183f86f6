//! Per-product enablement commands

pub mod api_discovery;
pub mod bot_management;
pub mod brotli_compression;
pub mod ddos_protection;
pub mod domain_inspector;
pub mod fanout;
pub mod image_optimizer;
pub mod log_explorer_insights;
pub mod origin_inspector;
pub mod summary;
pub mod websockets;

use std::fmt;
use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::productcore::{Disable, Enable, Enablement, EnablementHooks, Status};
use crate::cli::service::ServiceArgs;
use crate::cli::Globals;

#[derive(Args, Debug)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: EnablementCommand,
}

#[derive(Subcommand, Debug)]
pub enum EnablementCommand {
    /// Enable the product on a service
    Enable(ServiceArgs),

    /// Disable the product on a service
    Disable(ServiceArgs),

    /// Show whether the product is enabled on a service
    Status(ServiceArgs),
}

/// Run one of the enablement commands for the product bound to `hooks`
pub async fn execute<O, W>(
    globals: &Globals,
    hooks: &EnablementHooks<O>,
    product_name: &str,
    args: ProductArgs,
    out: &mut W,
) -> Result<()>
where
    O: fmt::Debug + 'static,
    W: Write,
{
    match args.command {
        EnablementCommand::Enable(args) => {
            Enable::new(globals, hooks, product_name, args)
                .exec(out)
                .await
        }
        EnablementCommand::Disable(args) => {
            Disable::new(globals, hooks, product_name, args)
                .exec(out)
                .await
        }
        EnablementCommand::Status(args) => {
            Status::new(globals, hooks, product_name, args)
                .exec(out)
                .await
        }
    }
}

/// A registered product
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub hooks: &'static dyn Enablement,
}

/// Every product with enablement commands, ordered by ID
pub static PRODUCTS: [Product; 10] = [
    Product {
        id: api_discovery::PRODUCT_ID,
        name: api_discovery::PRODUCT_NAME,
        hooks: &api_discovery::HOOKS,
    },
    Product {
        id: bot_management::PRODUCT_ID,
        name: bot_management::PRODUCT_NAME,
        hooks: &bot_management::HOOKS,
    },
    Product {
        id: brotli_compression::PRODUCT_ID,
        name: brotli_compression::PRODUCT_NAME,
        hooks: &brotli_compression::HOOKS,
    },
    Product {
        id: ddos_protection::PRODUCT_ID,
        name: ddos_protection::PRODUCT_NAME,
        hooks: &ddos_protection::HOOKS,
    },
    Product {
        id: domain_inspector::PRODUCT_ID,
        name: domain_inspector::PRODUCT_NAME,
        hooks: &domain_inspector::HOOKS,
    },
    Product {
        id: fanout::PRODUCT_ID,
        name: fanout::PRODUCT_NAME,
        hooks: &fanout::HOOKS,
    },
    Product {
        id: image_optimizer::PRODUCT_ID,
        name: image_optimizer::PRODUCT_NAME,
        hooks: &image_optimizer::HOOKS,
    },
    Product {
        id: log_explorer_insights::PRODUCT_ID,
        name: log_explorer_insights::PRODUCT_NAME,
        hooks: &log_explorer_insights::HOOKS,
    },
    Product {
        id: origin_inspector::PRODUCT_ID,
        name: origin_inspector::PRODUCT_NAME,
        hooks: &origin_inspector::HOOKS,
    },
    Product {
        id: websockets::PRODUCT_ID,
        name: websockets::PRODUCT_NAME,
        hooks: &websockets::HOOKS,
    },
];

/// Look up a product by ID within `products`
pub fn find<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}
