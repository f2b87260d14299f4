//! HTTP collaborator
//!
//! List sources and services talk to the pay / FAS REST APIs through the
//! [`Transport`] trait so tests can swap in an in-memory backend.

pub mod rest;

pub use rest::{RestClient, query_pairs};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SyncError;
use crate::table::RequestPayload;

/// JSON over HTTP. An empty success body decodes to `Value::Null`; a
/// non-success status becomes [`SyncError::Status`] carrying the body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET with the payload encoded as query parameters
    async fn get_json(&self, path: &str, query: &RequestPayload) -> Result<Value, SyncError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, SyncError>;

    async fn patch_json(&self, path: &str, body: &Value) -> Result<Value, SyncError>;
}
