//! DDoS Protection
//!
//! The enablement payload also carries the protection mode.

use crate::api::{DdosProtectionOutput, FastlyClient};
use crate::cli::productcore::{EnablementHooks, HookFuture};

pub const PRODUCT_ID: &str = "ddos_protection";
pub const PRODUCT_NAME: &str = "DDoS Protection";

pub static HOOKS: EnablementHooks<DdosProtectionOutput> = EnablementHooks {
    disable,
    enable,
    get,
};

fn disable<'a>(client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, ()> {
    Box::pin(client.disable_product(PRODUCT_ID, service_id))
}

fn enable<'a>(
    client: &'a FastlyClient,
    service_id: &'a str,
) -> HookFuture<'a, DdosProtectionOutput> {
    Box::pin(client.enable_product::<DdosProtectionOutput>(PRODUCT_ID, service_id))
}

fn get<'a>(client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, DdosProtectionOutput> {
    Box::pin(client.get_product::<DdosProtectionOutput>(PRODUCT_ID, service_id))
}
