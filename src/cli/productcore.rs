//! Generic enable/disable/status commands shared by every product.
//!
//! Each product binds an [`EnablementHooks`] to its API calls; the commands
//! here only ever talk to the hooks, so the same flag handling, error policy
//! and output applies to every product.

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{FastlyClient, HttpError};
use crate::cli::service::{self, ServiceArgs};
use crate::cli::Globals;
use crate::errors::UsageError;
use crate::output;

/// Future returned by a hook, borrowing the client and service ID
pub type HookFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a>>;

/// Hook returning the product's enablement payload
pub type OutputHook<O> = for<'a> fn(&'a FastlyClient, &'a str) -> HookFuture<'a, O>;

/// Hook with no payload
pub type DisableHook = for<'a> fn(&'a FastlyClient, &'a str) -> HookFuture<'a, ()>;

/// The API calls backing one product's commands
pub struct EnablementHooks<O: 'static> {
    pub disable: DisableHook,
    pub enable: OutputHook<O>,
    pub get: OutputHook<O>,
}

impl<O: 'static> Clone for EnablementHooks<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: 'static> Copy for EnablementHooks<O> {}

/// JSON body reported by every enablement command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnablementStatus {
    pub enabled: bool,
}

/// The enabled-products API answers `400 Bad Request` for a product that is
/// not enabled on the service.
pub fn is_not_enabled_signal(err: &anyhow::Error) -> bool {
    err.downcast_ref::<HttpError>()
        .is_some_and(|http| http.status_code == StatusCode::BAD_REQUEST)
}

/// Map the result of a get hook onto enabled/disabled, keeping genuine failures.
pub fn enablement_state<O>(result: Result<O>) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(err) if is_not_enabled_signal(&err) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Flag validation and service resolution common to all three commands
async fn prepare<W: Write>(globals: &Globals, args: &ServiceArgs, out: &mut W) -> Result<String> {
    if globals.verbose && args.json {
        return Err(UsageError::VerboseJsonCombo.into());
    }

    let service = service::service_id(
        args,
        &globals.manifest,
        &globals.client,
        globals.err_log.as_ref(),
    )
    .await?;

    if globals.verbose {
        service::display_service_id(out, &service)?;
    }

    Ok(service.id)
}

fn log_failure(globals: &Globals, err: &anyhow::Error, service_id: &str) {
    globals
        .err_log
        .add_with_context(err, &[("service_id", service_id)]);
}

/// `enable` for a single product
pub struct Enable<'a, O: 'static> {
    globals: &'a Globals,
    hooks: &'a EnablementHooks<O>,
    product_name: &'a str,
    args: ServiceArgs,
}

impl<'a, O: fmt::Debug + 'static> Enable<'a, O> {
    pub fn new(
        globals: &'a Globals,
        hooks: &'a EnablementHooks<O>,
        product_name: &'a str,
        args: ServiceArgs,
    ) -> Self {
        Self {
            globals,
            hooks,
            product_name,
            args,
        }
    }

    pub async fn exec<W: Write>(&self, out: &mut W) -> Result<()> {
        let service_id = prepare(self.globals, &self.args, out).await?;

        let enablement = (self.hooks.enable)(&self.globals.client, &service_id)
            .await
            .inspect_err(|err| log_failure(self.globals, err, &service_id))?;
        debug!(
            product = self.product_name,
            service_id = %service_id,
            ?enablement,
            "product enabled"
        );

        if output::write_json(out, self.args.json, &EnablementStatus { enabled: true })? {
            return Ok(());
        }

        output::success(
            out,
            &format!("Enabled {} on service {}", self.product_name, service_id),
        )?;
        Ok(())
    }
}

/// `disable` for a single product
pub struct Disable<'a, O: 'static> {
    globals: &'a Globals,
    hooks: &'a EnablementHooks<O>,
    product_name: &'a str,
    args: ServiceArgs,
}

impl<'a, O: 'static> Disable<'a, O> {
    pub fn new(
        globals: &'a Globals,
        hooks: &'a EnablementHooks<O>,
        product_name: &'a str,
        args: ServiceArgs,
    ) -> Self {
        Self {
            globals,
            hooks,
            product_name,
            args,
        }
    }

    pub async fn exec<W: Write>(&self, out: &mut W) -> Result<()> {
        let service_id = prepare(self.globals, &self.args, out).await?;

        (self.hooks.disable)(&self.globals.client, &service_id)
            .await
            .inspect_err(|err| log_failure(self.globals, err, &service_id))?;

        if output::write_json(out, self.args.json, &EnablementStatus { enabled: false })? {
            return Ok(());
        }

        output::success(
            out,
            &format!("Disabled {} on service {}", self.product_name, service_id),
        )?;
        Ok(())
    }
}

/// `status` for a single product
pub struct Status<'a, O: 'static> {
    globals: &'a Globals,
    hooks: &'a EnablementHooks<O>,
    product_name: &'a str,
    args: ServiceArgs,
}

impl<'a, O: 'static> Status<'a, O> {
    pub fn new(
        globals: &'a Globals,
        hooks: &'a EnablementHooks<O>,
        product_name: &'a str,
        args: ServiceArgs,
    ) -> Self {
        Self {
            globals,
            hooks,
            product_name,
            args,
        }
    }

    pub async fn exec<W: Write>(&self, out: &mut W) -> Result<()> {
        let service_id = prepare(self.globals, &self.args, out).await?;

        let enabled = enablement_state((self.hooks.get)(&self.globals.client, &service_id).await)
            .inspect_err(|err| log_failure(self.globals, err, &service_id))?;

        if output::write_json(out, self.args.json, &EnablementStatus { enabled })? {
            return Ok(());
        }

        let state = if enabled { "enabled" } else { "disabled" };
        output::info(
            out,
            &format!("{} is {} on service {}", self.product_name, state, service_id),
        )?;
        Ok(())
    }
}

/// Type-erased view of a product's hooks, used where products of different
/// output types sit side by side.
pub trait Enablement: Sync {
    fn enable<'a>(&'a self, client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, ()>;

    fn disable<'a>(&'a self, client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, ()>;

    /// Status with the not-enabled signal already folded into `false`
    fn is_enabled<'a>(&'a self, client: &'a FastlyClient, service_id: &'a str)
        -> HookFuture<'a, bool>;
}

impl<O: 'static> Enablement for EnablementHooks<O> {
    fn enable<'a>(&'a self, client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, ()> {
        let pending = (self.enable)(client, service_id);
        Box::pin(async move { pending.await.map(|_| ()) })
    }

    fn disable<'a>(&'a self, client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, ()> {
        (self.disable)(client, service_id)
    }

    fn is_enabled<'a>(
        &'a self,
        client: &'a FastlyClient,
        service_id: &'a str,
    ) -> HookFuture<'a, bool> {
        let pending = (self.get)(client, service_id);
        Box::pin(async move { enablement_state(pending.await) })
    }
}
