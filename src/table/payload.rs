//! Outgoing request payloads

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::warn;

use crate::filter::Filters;
use crate::filter::payload::is_date_range;

/// JSON object sent to the backend (query string for GET, body otherwise)
pub type RequestPayload = Map<String, Value>;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn valid_date(field: &str, member: &str, value: &Value) -> Option<Value> {
    let raw = value.as_str()?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(_) => Some(Value::String(raw.to_string())),
        Err(e) => {
            warn!(field, member, value = raw, error = %e, "Dropping invalid date filter");
            None
        }
    }
}

/// `{ page, limit, ...filterPayload }` with date ranges flattened into
/// top-level `startDate` / `endDate`.
pub fn default_payload(filters: &Filters) -> RequestPayload {
    let mut payload = RequestPayload::new();
    payload.insert("page".to_string(), filters.page_number.into());
    payload.insert("limit".to_string(), filters.page_limit.into());

    for (field, value) in filters.filter_payload.iter() {
        if is_date_range(value) {
            for member in ["startDate", "endDate"] {
                if let Some(date) = value.get(member).and_then(|v| valid_date(field, member, v)) {
                    payload.insert(member.to_string(), date);
                }
            }
        } else {
            payload.insert(field.clone(), value.clone());
        }
    }
    payload
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(members) => members.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Remove `null`, `""`, `[]` and `{}` members. `false` and `0` are real
/// filter values and stay.
pub fn strip_empty(mut payload: RequestPayload) -> RequestPayload {
    payload.retain(|_, value| !is_empty(value));
    payload
}
