//! API response types

use serde::{Deserialize, Serialize};

/// Reference to an API object (`{"id": ..., "object": ...}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
}

/// Links attached to a product enablement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnablementLinks {
    #[serde(rename = "self", default)]
    pub self_link: String,
    #[serde(default)]
    pub service: String,
}

/// Product enablement as returned by the enabled-products API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnableOutput {
    #[serde(default)]
    pub product: ObjectRef,
    #[serde(default)]
    pub service: ObjectRef,
    #[serde(rename = "_links", default)]
    pub links: EnablementLinks,
}

/// DDoS Protection configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DdosProtectionConfiguration {
    #[serde(default)]
    pub mode: String,
}

/// DDoS Protection enablement, which also reports its configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DdosProtectionOutput {
    #[serde(flatten)]
    pub enablement: EnableOutput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<DdosProtectionConfiguration>,
}

/// A Fastly service, as listed by `GET /service`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_enable_output() {
        let body = r#"{
            "product": {"id": "bot_management", "object": "product"},
            "service": {"id": "123", "object": "service"},
            "_links": {"self": "/enabled-products/v1/bot_management/services/123", "service": "/service/123"}
        }"#;

        let output: EnableOutput = serde_json::from_str(body).unwrap();
        assert_eq!(output.product.id, "bot_management");
        assert_eq!(output.service.id, "123");
        assert_eq!(output.links.service, "/service/123");
    }

    #[test]
    fn test_decode_ddos_protection_output() {
        let body = r#"{
            "product": {"id": "ddos_protection", "object": "product"},
            "service": {"id": "123", "object": "service"},
            "configuration": {"mode": "log"}
        }"#;

        let output: DdosProtectionOutput = serde_json::from_str(body).unwrap();
        assert_eq!(output.enablement.product.id, "ddos_protection");
        assert_eq!(output.configuration.unwrap().mode, "log");
    }
}
