//! Pure extractors over arbitrary error values

use serde_json::Value;

use super::taxonomy::Taxonomy;
use crate::error::SyncError;

/// Fallback when the error carries neither a title nor a type
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Where an error body may sit, most specific first
pub(crate) const CARRIERS: [&str; 3] = ["/response/_data", "/response/data", "/data"];

/// Try `carrier.<field>` then `carrier.rootCause.<field>` for each carrier.
/// The first string found wins.
fn lookup<'a>(error: &'a Value, field: &str) -> Option<&'a str> {
    CARRIERS.iter().find_map(|carrier| {
        let body = error.pointer(carrier)?;
        body.get(field)
            .and_then(Value::as_str)
            .or_else(|| {
                body.get("rootCause")
                    .and_then(|cause| cause.get(field))
                    .and_then(Value::as_str)
            })
    })
}

/// Machine-readable error code, e.g. `RS_CHILD_HAS_TRANSACTIONS`
pub fn extract_error_type(error: &Value) -> Option<&str> {
    lookup(error, "type")
}

/// Backend-supplied human sentence (`title`)
pub fn extract_error_message(error: &Value) -> Option<&str> {
    lookup(error, "title")
}

/// Best available user-facing sentence for `error`. Never empty.
pub fn get_domain_error_message(error: &Value, taxonomy: Taxonomy) -> String {
    if let Some(title) = extract_error_message(error).filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    match extract_error_type(error).filter(|t| !t.is_empty()) {
        Some(code) => match taxonomy.message_for(code) {
            Some(message) => message.to_string(),
            None => format!("An error occurred: {}", code),
        },
        None => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

/// Toast text for a failed action
pub fn user_message(error: &SyncError, taxonomy: Taxonomy) -> String {
    get_domain_error_message(&error.as_error_value(), taxonomy)
}
