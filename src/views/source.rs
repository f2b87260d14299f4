//! REST-backed table source shared by every list view

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::core_types::TotalCount;
use crate::error::SyncError;
use crate::table::{RequestPayload, TableSource};
use crate::transport::Transport;

/// `{ items, total, ...domain totals }`
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: TotalCount,
    /// View-specific totals, e.g. remaining credit across all rows
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMethod {
    /// Payload as query string
    Get,
    /// Payload as JSON body (search endpoints)
    Post,
}

pub struct RestListSource<T> {
    name: &'static str,
    transport: Arc<dyn Transport>,
    path: String,
    method: ListMethod,
    _item: PhantomData<fn() -> T>,
}

impl<T> RestListSource<T> {
    pub fn new(
        name: &'static str,
        transport: Arc<dyn Transport>,
        path: impl Into<String>,
        method: ListMethod,
    ) -> Self {
        Self {
            name,
            transport,
            path: path.into(),
            method,
            _item: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> ListMethod {
        self.method
    }
}

#[async_trait]
impl<T> TableSource for RestListSource<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Item = T;
    type Response = ListResponse<T>;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_data(
        &self,
        payload: RequestPayload,
    ) -> Result<Option<ListResponse<T>>, SyncError> {
        let body = match self.method {
            ListMethod::Get => self.transport.get_json(&self.path, &payload).await?,
            ListMethod::Post => {
                self.transport
                    .post_json(&self.path, &Value::Object(payload))
                    .await?
            }
        };
        if body.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(body)?))
    }

    fn extract_total(&self, response: &ListResponse<T>) -> TotalCount {
        response.total
    }

    fn extract_items(&self, response: ListResponse<T>) -> Vec<T> {
        response.items
    }
}
