//! What a list view plugs into the orchestrator

use async_trait::async_trait;

use super::payload::{RequestPayload, default_payload};
use crate::core_types::TotalCount;
use crate::error::SyncError;
use crate::filter::Filters;

/// Payload builder, fetch and extractors for one list view.
///
/// The orchestrator knows nothing about HTTP verbs or the response shape
/// beyond what these hooks expose.
#[async_trait]
pub trait TableSource: Send + Sync {
    type Item: Clone + Send + Sync;
    type Response: Send;

    /// Name used in logs
    fn name(&self) -> &'static str;

    fn build_payload(&self, filters: &Filters) -> RequestPayload {
        default_payload(filters)
    }

    /// `Ok(None)` means the backend returned nothing usable; the table is
    /// left as it was.
    async fn fetch_data(
        &self,
        payload: RequestPayload,
    ) -> Result<Option<Self::Response>, SyncError>;

    fn extract_total(&self, response: &Self::Response) -> TotalCount;

    fn extract_items(&self, response: Self::Response) -> Vec<Self::Item>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use serde_json::Value;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// In-memory backend over `rows`, filtered by an optional `name`
    /// substring and paged by `page` / `limit`
    pub struct MockSource {
        pub rows: Vec<String>,
        pub payloads: Mutex<Vec<RequestPayload>>,
        pub fail: AtomicBool,
        pub empty_response: AtomicBool,
        pub dispatched: AtomicUsize,
        pub gate: Option<std::sync::Arc<Notify>>,
        in_flight: AtomicUsize,
        /// Most fetches ever running at once
        pub max_in_flight: AtomicUsize,
    }

    pub struct MockResponse {
        pub items: Vec<String>,
        pub total: usize,
    }

    impl MockSource {
        pub fn new(rows: &[&str]) -> Self {
            Self {
                rows: rows.iter().map(|r| r.to_string()).collect(),
                payloads: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
                empty_response: AtomicBool::new(false),
                dispatched: AtomicUsize::new(0),
                gate: None,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }

        pub fn numbered(count: usize) -> Self {
            let rows: Vec<String> = (1..=count).map(|i| format!("row-{}", i)).collect();
            let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
            Self::new(&refs)
        }

        pub fn with_gate(mut self, gate: std::sync::Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub fn last_payload(&self) -> Option<RequestPayload> {
            self.payloads.lock().unwrap().last().cloned()
        }

        pub fn dispatched(&self) -> usize {
            self.dispatched.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TableSource for MockSource {
        type Item = String;
        type Response = MockResponse;

        fn name(&self) -> &'static str {
            "mock"
        }

        async fn fetch_data(
            &self,
            payload: RequestPayload,
        ) -> Result<Option<MockResponse>, SyncError> {
            self.dispatched.fetch_add(1, Ordering::SeqCst);
            self.payloads.lock().unwrap().push(payload.clone());
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(running, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail.load(Ordering::SeqCst) {
                return Err(SyncError::Transport("mock backend down".into()));
            }
            if self.empty_response.load(Ordering::SeqCst) {
                return Ok(None);
            }

            let needle = payload.get("name").and_then(Value::as_str).unwrap_or("");
            let matching: Vec<&String> =
                self.rows.iter().filter(|r| r.contains(needle)).collect();
            let page = payload.get("page").and_then(Value::as_u64).unwrap_or(1) as usize;
            let limit = payload.get("limit").and_then(Value::as_u64).unwrap_or(20) as usize;
            let items = matching
                .iter()
                .skip((page - 1) * limit)
                .take(limit)
                .map(|r| r.to_string())
                .collect();
            Ok(Some(MockResponse {
                items,
                total: matching.len(),
            }))
        }

        fn extract_total(&self, response: &MockResponse) -> usize {
            response.total
        }

        fn extract_items(&self, response: MockResponse) -> Vec<String> {
            response.items
        }
    }
}
