//! Service lookup

use anyhow::{anyhow, Result};

use crate::api::response::Service;
use crate::api::FastlyClient;

impl FastlyClient {
    /// List the services visible to the current token
    pub async fn list_services(&self) -> Result<Vec<Service>> {
        self.get("/service").await
    }

    /// Resolve a service name to its ID
    pub async fn service_id_by_name(&self, name: &str) -> Result<String> {
        let services = self
            .list_services()
            .await
            .map_err(|e| anyhow!("error listing services: {}", e))?;

        services
            .into_iter()
            .find(|s| s.name == name)
            .map(|s| s.id)
            .ok_or_else(|| anyhow!("error matching service name with available services"))
    }
}
