//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::Transport;
use crate::config::ApiConfig;
use crate::error::SyncError;
use crate::table::RequestPayload;

/// Flatten a payload into query parameters.
///
/// Arrays repeat their key, nested objects are sent as JSON text, `null`
/// members are skipped.
pub fn query_pairs(payload: &RequestPayload) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(payload.len());
    for (key, value) in payload {
        match value {
            Value::Null => {}
            Value::String(s) => pairs.push((key.clone(), s.clone())),
            Value::Array(items) => {
                for item in items {
                    let text = match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    pairs.push((key.clone(), text));
                }
            }
            other => pairs.push((key.clone(), other.to_string())),
        }
    }
    pairs
}

pub struct RestClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestClient {
    pub fn new(config: &ApiConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Value, SyncError> {
        let request = match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            debug!(
                method,
                path,
                status = status.as_u16(),
                bytes = body.len(),
                "Request succeeded"
            );
            if body.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_slice(&body)?);
        }

        let payload = serde_json::from_slice(&body).unwrap_or(Value::Null);
        warn!(method, path, status = status.as_u16(), "Request rejected by backend");
        Err(SyncError::Status {
            status: status.as_u16(),
            payload,
        })
    }
}

#[async_trait]
impl Transport for RestClient {
    async fn get_json(&self, path: &str, query: &RequestPayload) -> Result<Value, SyncError> {
        let request = self.client.get(self.url(path)).query(&query_pairs(query));
        self.send("GET", path, request).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, SyncError> {
        let request = self.client.post(self.url(path)).json(body);
        self.send("POST", path, request).await
    }

    async fn patch_json(&self, path: &str, body: &Value) -> Result<Value, SyncError> {
        let request = self.client.patch(self.url(path)).json(body);
        self.send("PATCH", path, request).await
    }
}
