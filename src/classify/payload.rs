//! Typed view of the backend error body

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::classifier::CARRIERS;

/// `{ type, title, detail?, rootCause? }` as sent by the pay and FAS APIs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorPayload {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<Box<ApiErrorPayload>>,
}

impl ApiErrorPayload {
    /// First decodable body, searched in the same carrier order as the
    /// type and message extractors
    pub fn from_error(error: &Value) -> Option<Self> {
        CARRIERS
            .iter()
            .filter_map(|carrier| error.pointer(carrier))
            .filter(|body| body.is_object())
            .find_map(|body| serde_json::from_value(body.clone()).ok())
    }

    /// Most specific detail available: own detail, else the root cause's
    pub fn detail(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or_else(|| self.root_cause.as_ref().and_then(|c| c.detail.as_deref()))
    }
}
