//! Record lookups and mutating actions
//!
//! Single-record reads go through a [`RequestDeduplicator`] so a page that
//! renders the same record from several places sends one request. Actions
//! are never deduplicated. Failures are logged and handed back unchanged;
//! the caller picks the taxonomy for the toast.
//!
//! [`RequestDeduplicator`]: crate::dedup::RequestDeduplicator

pub mod refunds;
pub mod short_names;

pub use refunds::{RefundDecision, RefundService};
pub use short_names::ShortNameService;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::classify::{ApiErrorPayload, extract_error_type};
use crate::error::SyncError;

fn log_failure(action: &'static str, id: i64, error: &SyncError) {
    let value = error.as_error_value();
    let detail = ApiErrorPayload::from_error(&value);
    warn!(
        action,
        id,
        code = error.code(),
        status = error.status(),
        error_type = extract_error_type(&value),
        detail = detail.as_ref().and_then(ApiErrorPayload::detail),
        "Action failed"
    );
}

/// Decode an action response. Some endpoints answer 204 with no body.
fn decode_optional<T: DeserializeOwned>(body: Value) -> Result<Option<T>, SyncError> {
    if body.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(body)?))
}

/// Log and pass through
fn traced<T>(
    action: &'static str,
    id: i64,
    result: Result<T, SyncError>,
) -> Result<T, SyncError> {
    if let Err(e) = &result {
        log_failure(action, id, e);
    }
    result
}
