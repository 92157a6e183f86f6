//! Fanout

use crate::api::{EnableOutput, FastlyClient};
use crate::cli::productcore::{EnablementHooks, HookFuture};

pub const PRODUCT_ID: &str = "fanout";
pub const PRODUCT_NAME: &str = "Fanout";

pub static HOOKS: EnablementHooks<EnableOutput> = EnablementHooks {
    disable,
    enable,
    get,
};

fn disable<'a>(client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, ()> {
    Box::pin(client.disable_product(PRODUCT_ID, service_id))
}

fn enable<'a>(client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, EnableOutput> {
    Box::pin(client.enable_product::<EnableOutput>(PRODUCT_ID, service_id))
}

fn get<'a>(client: &'a FastlyClient, service_id: &'a str) -> HookFuture<'a, EnableOutput> {
    Box::pin(client.get_product::<EnableOutput>(PRODUCT_ID, service_id))
}
