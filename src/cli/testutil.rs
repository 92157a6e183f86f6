//! Shared fixtures for command tests

use std::sync::Arc;

use anyhow::anyhow;
use reqwest::StatusCode;

use crate::api::{FastlyClient, HttpError};
use crate::cli::productcore::HookFuture;
use crate::cli::Globals;
use crate::config::Config;
use crate::errors::LogEntries;
use crate::manifest;

pub const TEST_SERVICE_ID: &str = "123";

/// Client with no API token; anything it tries to send fails
pub fn client() -> FastlyClient {
    FastlyClient::new(&Config::default()).expect("client builds")
}

/// Globals with no manifest or environment fallback for the service ID
pub fn globals(verbose: bool) -> (Globals, Arc<LogEntries>) {
    console::set_colors_enabled(false);

    let log = Arc::new(LogEntries::default());
    let globals = Globals {
        verbose,
        manifest: manifest::Data::default(),
        client: client(),
        err_log: log.clone(),
    };
    (globals, log)
}

pub fn ok_output<'a, O: Default + 'static>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, O> {
    Box::pin(async { Ok::<O, anyhow::Error>(O::default()) })
}

pub fn ok_unit<'a>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, ()> {
    Box::pin(async { Ok::<(), anyhow::Error>(()) })
}

pub fn failing_output<'a, O: 'static>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, O> {
    Box::pin(async { Err::<O, _>(anyhow!("test error")) })
}

pub fn failing_unit<'a>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, ()> {
    Box::pin(async { Err::<(), _>(anyhow!("test error")) })
}

pub fn bad_request<'a, O: 'static>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, O> {
    Box::pin(async { Err::<O, _>(anyhow::Error::new(HttpError::new(StatusCode::BAD_REQUEST))) })
}

pub fn server_error<'a, O: 'static>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, O> {
    Box::pin(async {
        Err::<O, _>(anyhow::Error::new(HttpError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
        )))
    })
}

pub fn unreachable_output<'a, O: 'static>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, O> {
    panic!("hook called before flag validation")
}

pub fn unreachable_unit<'a>(_: &'a FastlyClient, _: &'a str) -> HookFuture<'a, ()> {
    panic!("hook called before flag validation")
}
