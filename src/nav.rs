//! Navigation persistence
//!
//! Leaving a list view stores its filters and pagination flags; coming
//! back rebuilds the orchestrator from them and re-fetches the saved page.
//! Loaded rows are never stored.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::SyncError;
use crate::filter::Filters;
use crate::pagination::LoadState;
use crate::table::{TableOptions, TableSource, TableState, TableSyncOrchestrator};

/// Filters plus pagination flags of one view at the moment it was left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub filters: Filters,
    pub load_state: LoadState,
    pub saved_at: DateTime<Utc>,
}

impl ViewSnapshot {
    pub fn capture<S: TableSource>(table: &TableSyncOrchestrator<S>) -> Self {
        Self {
            filters: table.filters(),
            load_state: table.load_state(),
            saved_at: Utc::now(),
        }
    }

    /// Fresh orchestrator over an empty table carrying the saved filters.
    /// Call [`TableSyncOrchestrator::resume`] to fetch the saved page.
    pub fn restore<S: TableSource>(
        &self,
        source: Arc<S>,
        options: TableOptions,
    ) -> TableSyncOrchestrator<S> {
        let state = TableState::new(self.filters.clone()).shared();
        TableSyncOrchestrator::with_options(state, source, options.with_load_state(self.load_state))
    }
}

/// Snapshots keyed by view name
#[derive(Debug, Default)]
pub struct NavigationStore {
    snapshots: DashMap<String, ViewSnapshot>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `table` under its source name
    pub fn save<S: TableSource>(&self, table: &TableSyncOrchestrator<S>) {
        let view = table.source().name();
        let snapshot = ViewSnapshot::capture(table);
        debug!(
            view,
            page = snapshot.filters.page_number,
            active = snapshot.filters.is_active,
            "View snapshot saved"
        );
        self.snapshots.insert(view.to_string(), snapshot);
    }

    pub fn insert(&self, view: &str, snapshot: ViewSnapshot) {
        self.snapshots.insert(view.to_string(), snapshot);
    }

    pub fn get(&self, view: &str) -> Option<ViewSnapshot> {
        self.snapshots.get(view).map(|entry| entry.value().clone())
    }

    pub fn forget(&self, view: &str) -> Option<ViewSnapshot> {
        self.snapshots.remove(view).map(|(_, snapshot)| snapshot)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Views sorted by name so the output is stable
    pub fn to_json(&self) -> Result<String, SyncError> {
        let ordered: BTreeMap<String, ViewSnapshot> = self
            .snapshots
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        let ordered: BTreeMap<String, ViewSnapshot> = serde_json::from_str(json)?;
        Ok(Self {
            snapshots: ordered.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterPayload;
    use crate::table::source::mock::MockSource;
    use serde_json::json;

    fn table(rows: usize) -> TableSyncOrchestrator<MockSource> {
        let state = TableState::new(Filters::new(
            2,
            FilterPayload::new().with("state", "LINKED").with("name", ""),
        ))
        .shared();
        TableSyncOrchestrator::new(state, Arc::new(MockSource::numbered(rows)))
    }

    #[tokio::test]
    async fn test_save_and_restore_round_trip() {
        let store = NavigationStore::new();
        let orch = table(8);
        orch.get_next(true).await;
        orch.get_next(false).await;
        store.save(&orch);

        let snapshot = store.get("mock").unwrap();
        assert_eq!(snapshot.filters.page_number, 2);
        assert_eq!(snapshot.load_state.current_page, 2);
        assert!(!snapshot.load_state.is_initial_load);

        let restored = snapshot.restore(Arc::new(MockSource::numbered(8)), TableOptions::default());
        assert!(restored.results().is_empty());
        restored.resume().await;
        assert_eq!(restored.results(), vec!["row-3", "row-4"]);

        restored.get_next(false).await;
        assert_eq!(restored.results(), vec!["row-3", "row-4", "row-5", "row-6"]);
    }

    #[tokio::test]
    async fn test_restore_keeps_filters_and_clear_uses_given_defaults() {
        let orch = table(5);
        orch.update_filter("name", json!("row-5")).await;
        let snapshot = ViewSnapshot::capture(&orch);
        assert!(snapshot.filters.is_active);

        let defaults = FilterPayload::new().with("state", "LINKED").with("name", "");
        let restored = snapshot.restore(
            Arc::new(MockSource::numbered(5)),
            TableOptions::default().with_defaults(defaults),
        );
        restored.resume().await;
        assert_eq!(restored.results(), vec!["row-5"]);

        restored.clear_filters().await;
        assert_eq!(restored.results().len(), 2);
        assert!(!restored.filters().is_active);
    }

    #[test]
    fn test_json_round_trip_and_forget() {
        let store = NavigationStore::new();
        store.insert(
            "refunds",
            ViewSnapshot {
                filters: Filters::new(10, FilterPayload::new().with("status", "PENDING_APPROVAL")),
                load_state: LoadState::default(),
                saved_at: Utc::now(),
            },
        );

        let json = store.to_json().unwrap();
        assert!(json.contains("\"pageLimit\":10"));
        assert!(json.contains("\"savedAt\""));

        let loaded = NavigationStore::from_json(&json).unwrap();
        assert_eq!(loaded.get("refunds"), store.get("refunds"));
        assert!(loaded.forget("refunds").is_some());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = NavigationStore::from_json("{\"x\": 1}").unwrap_err();
        assert_eq!(err.code(), "DECODE_ERROR");
    }
}
