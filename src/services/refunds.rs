//! Short-name refund requests

use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use super::{decode_optional, traced};
use crate::dedup::RequestDeduplicator;
use crate::error::SyncError;
use crate::table::RequestPayload;
use crate::transport::Transport;
use crate::views::RefundRequest;

const REFUNDS_PATH: &str = "/eft-shortnames/shortname-refund";

/// Outcome an approver records on a pending refund
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundDecision {
    Approved,
    Declined { reason: String },
}

impl RefundDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundDecision::Approved => "APPROVED",
            RefundDecision::Declined { .. } => "DECLINED",
        }
    }
}

impl fmt::Display for RefundDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct RefundService {
    transport: Arc<dyn Transport>,
    lookups: RequestDeduplicator<Arc<RefundRequest>, SyncError>,
}

impl RefundService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            lookups: RequestDeduplicator::new(),
        }
    }

    /// Fetch one refund. Concurrent calls for the same id share a request.
    pub async fn get_refund(&self, id: i64) -> Result<Arc<RefundRequest>, SyncError> {
        let transport = Arc::clone(&self.transport);
        let path = format!("{}/{}", REFUNDS_PATH, id);
        let result = self
            .lookups
            .run(&format!("refund-{}", id), move || async move {
                let body = transport.get_json(&path, &RequestPayload::new()).await?;
                let refund: RefundRequest = serde_json::from_value(body)?;
                Ok::<_, SyncError>(Arc::new(refund))
            })
            .await;
        traced("get_refund", id, result)
    }

    pub async fn approve_refund(&self, id: i64) -> Result<Option<RefundRequest>, SyncError> {
        self.decide(id, RefundDecision::Approved).await
    }

    pub async fn decline_refund(
        &self,
        id: i64,
        reason: &str,
    ) -> Result<Option<RefundRequest>, SyncError> {
        self.decide(
            id,
            RefundDecision::Declined {
                reason: reason.to_string(),
            },
        )
        .await
    }

    async fn decide(
        &self,
        id: i64,
        decision: RefundDecision,
    ) -> Result<Option<RefundRequest>, SyncError> {
        let body = match &decision {
            RefundDecision::Approved => json!({ "status": decision.as_str() }),
            RefundDecision::Declined { reason } => {
                json!({ "status": decision.as_str(), "declineReason": reason })
            }
        };
        let path = format!("{}/{}", REFUNDS_PATH, id);
        let result = match self.transport.patch_json(&path, &body).await {
            Ok(body) => decode_optional(body),
            Err(e) => Err(e),
        };
        if result.is_ok() {
            info!(id, decision = %decision, "Refund decision recorded");
        }
        traced("decide_refund", id, result)
    }
}
