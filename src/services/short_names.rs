//! EFT short-name actions

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::{decode_optional, traced};
use crate::dedup::RequestDeduplicator;
use crate::error::SyncError;
use crate::table::RequestPayload;
use crate::transport::Transport;
use crate::views::{LinkedAccount, ShortName};

const SHORT_NAMES_PATH: &str = "/eft-shortnames";

pub struct ShortNameService {
    transport: Arc<dyn Transport>,
    lookups: RequestDeduplicator<Arc<ShortName>, SyncError>,
}

impl ShortNameService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            lookups: RequestDeduplicator::new(),
        }
    }

    /// Fetch one short name. Concurrent calls for the same id share a request.
    pub async fn get_short_name(&self, id: i64) -> Result<Arc<ShortName>, SyncError> {
        let transport = Arc::clone(&self.transport);
        let path = format!("{}/{}", SHORT_NAMES_PATH, id);
        let result = self
            .lookups
            .run(&format!("short-name-{}", id), move || async move {
                let body = transport.get_json(&path, &RequestPayload::new()).await?;
                let short_name: ShortName = serde_json::from_value(body)?;
                Ok::<_, SyncError>(Arc::new(short_name))
            })
            .await;
        traced("get_short_name", id, result)
    }

    /// Link the short name to an account
    pub async fn link_account(
        &self,
        short_name_id: i64,
        account_id: &str,
    ) -> Result<Option<LinkedAccount>, SyncError> {
        let path = format!("{}/{}/links", SHORT_NAMES_PATH, short_name_id);
        let body = json!({ "accountId": account_id });
        let result = match self.transport.post_json(&path, &body).await {
            Ok(body) => decode_optional(body),
            Err(e) => Err(e),
        };
        if result.is_ok() {
            info!(short_name_id, account_id, "Short name linked");
        }
        traced("link_account", short_name_id, result)
    }

    /// Deactivate an existing link
    pub async fn cancel_link(
        &self,
        short_name_id: i64,
        link_id: i64,
    ) -> Result<Option<LinkedAccount>, SyncError> {
        let path = format!("{}/{}/links/{}", SHORT_NAMES_PATH, short_name_id, link_id);
        let body = json!({ "statusCode": "INACTIVE" });
        let result = match self.transport.patch_json(&path, &body).await {
            Ok(body) => decode_optional(body),
            Err(e) => Err(e),
        };
        if result.is_ok() {
            info!(short_name_id, link_id, "Short name link cancelled");
        }
        traced("cancel_link", short_name_id, result)
    }

    /// Reverse the payment applied to `statement_id`
    pub async fn reverse_payment(
        &self,
        short_name_id: i64,
        statement_id: i64,
    ) -> Result<(), SyncError> {
        let path = format!("{}/{}/payment", SHORT_NAMES_PATH, short_name_id);
        let body = json!({ "action": "REVERSE", "statementId": statement_id });
        let result = self.transport.post_json(&path, &body).await.map(|_| ());
        if result.is_ok() {
            info!(short_name_id, statement_id, "Payment reversed");
        }
        traced("reverse_payment", short_name_id, result)
    }
}
