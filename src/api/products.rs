//! Enabled-products endpoints

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

use crate::api::FastlyClient;

fn enablement_path(product_id: &str, service_id: &str) -> Result<String> {
    if product_id.is_empty() {
        return Err(anyhow!("missing required field: product ID"));
    }
    if service_id.is_empty() {
        return Err(anyhow!("missing required field: service ID"));
    }
    Ok(format!(
        "/enabled-products/v1/{}/services/{}",
        product_id, service_id
    ))
}

impl FastlyClient {
    /// Fetch a product's enablement on a service.
    ///
    /// The API answers `400 Bad Request` when the product is not enabled.
    pub async fn get_product<O: DeserializeOwned>(
        &self,
        product_id: &str,
        service_id: &str,
    ) -> Result<O> {
        self.get(&enablement_path(product_id, service_id)?).await
    }

    /// Enable a product on a service
    pub async fn enable_product<O: DeserializeOwned>(
        &self,
        product_id: &str,
        service_id: &str,
    ) -> Result<O> {
        self.put(&enablement_path(product_id, service_id)?).await
    }

    /// Disable a product on a service
    pub async fn disable_product(&self, product_id: &str, service_id: &str) -> Result<()> {
        self.delete(&enablement_path(product_id, service_id)?).await
    }
}
