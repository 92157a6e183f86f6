//! HTTP client for the Fastly API

use anyhow::{anyhow, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{Config, ENV_API_TOKEN};

const USER_AGENT: &str = concat!("fastly-cli/", env!("CARGO_PKG_VERSION"));

/// A non-2xx response from the Fastly API.
///
/// Kept as a distinct type so callers can classify failures by status code
/// with `anyhow::Error::downcast_ref`.
#[derive(Debug, Error)]
#[error("API error ({status_code}){}", detail_suffix(.detail))]
pub struct HttpError {
    pub status_code: StatusCode,
    pub detail: Option<String>,
}

impl HttpError {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            detail: None,
        }
    }

    /// Build an error from a response body, pulling out the most useful message.
    fn from_body(status_code: StatusCode, body: &str) -> Self {
        let detail = match serde_json::from_str::<Value>(body) {
            Ok(value) => error_detail(&value),
            Err(_) => None,
        }
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });

        Self {
            detail,
            ..Self::new(status_code)
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

// Fastly answers with either `{"msg", "detail"}` or a JSON:API `errors` array.
fn error_detail(value: &Value) -> Option<String> {
    let field = |v: &Value, key: &str| {
        v.get(key)
            .and_then(|f| f.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(first) = value
        .get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
    {
        return field(first, "detail").or_else(|| field(first, "title"));
    }

    field(value, "detail").or_else(|| field(value, "msg"))
}

/// Fastly API client
pub struct FastlyClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl FastlyClient {
    /// Create a new Fastly API client
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    /// Build request with authentication headers
    fn build_request(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or_else(|| {
            anyhow!(
                "Authentication required. Set {} or pass --token",
                ENV_API_TOKEN
            )
        })?;

        Ok(self
            .client
            .request(method, url)
            .header("Accept", "application/json")
            .header("Fastly-Key", token))
    }

    /// Send a request and return the raw body of a successful response
    async fn send(&self, method: Method, path: &str) -> Result<String> {
        let url = format!("{}{}", self.endpoint, path);
        debug!("{} {}", method, url);

        let response = self.build_request(method, &url)?.send().await?;

        let status = response.status();
        let text = response.text().await?;
        trace!("Response: {}", text);

        if !status.is_success() {
            return Err(HttpError::from_body(status, &text).into());
        }

        Ok(text)
    }

    /// Make a GET request to the API
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let text = self.send(Method::GET, path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Make a PUT request to the API
    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let text = self.send(Method::PUT, path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Make a DELETE request to the API, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path).await?;
        Ok(())
    }
}
