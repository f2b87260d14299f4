//! Filter payload values

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Truthiness as the UI layer understands it: `null`, `false`, `0` and
/// `""` are empty; every array and object counts as set.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Object with `startDate` and/or `endDate` members
pub fn is_date_range(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("startDate") || obj.contains_key("endDate"))
}

/// A date range only filters once the end of the range is chosen
pub fn date_range_is_set(value: &Value) -> bool {
    value.get("endDate").is_some_and(is_truthy)
}

/// Field name → value, keys defined per view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterPayload(Map<String, Value>);

impl FilterPayload {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for FilterPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_date_range_detection() {
        let open = json!({ "startDate": "2025-01-01", "endDate": null });
        let closed = json!({ "startDate": "2025-01-01", "endDate": "2025-01-31" });
        assert!(is_date_range(&open));
        assert!(!date_range_is_set(&open));
        assert!(date_range_is_set(&closed));
        assert!(!is_date_range(&json!({ "value": 1 })));
        assert!(!is_date_range(&json!("2025-01-01")));
    }

    #[test]
    fn test_payload_serializes_as_plain_object() {
        let payload = FilterPayload::new()
            .with("state", "LINKED")
            .with("amount", 10);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "state": "LINKED", "amount": 10 })
        );
    }
}
