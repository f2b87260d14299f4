//! Table synchronization orchestrator
//!
//! Composes [`FilterState`] and [`PaginationLoader`] over a caller-owned
//! [`TableState`] and a [`TableSource`]. One implementation serves every
//! list view; the view only supplies the source.
//!
//! # Load paths
//!
//! - [`TableSyncOrchestrator::load_table_data`]: explicit loads and filter
//!   edits. Edits always rewind to page 1 and replace results.
//! - [`TableSyncOrchestrator::get_next`]: infinite scroll through the
//!   embedded loader. Always appends after the first page.
//!
//! Both paths claim the embedded loader before touching the table, so at
//! most one fetch per table is in flight and extra requests are dropped.
//! The table's `loading` flag mirrors that claim and is cleared by a drop
//! guard, so a cancelled load never leaves the table stuck.
//!
//! A response is applied whenever it settles. There is no generation
//! check, so a slow response can still land after a newer filter edit.

use serde_json::Value;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::payload::{RequestPayload, strip_empty};
use super::source::TableSource;
use super::state::{SharedTableState, TableState, lock_state};
use crate::config::ListConfig;
use crate::core_types::{FIRST_PAGE, PageNumber, TotalCount};
use crate::error::SyncError;
use crate::filter::{ActivityRule, FilterPayload, FilterState, Filters};
use crate::pagination::{
    LoadOutcome, LoadPhase, LoadState, PageFetcher, PageResult, PaginationLoader,
};

/// Pseudo-field that moves the page cursor instead of editing a filter
pub const PAGE_FIELD: &str = "page";

/// Per-table knobs
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub rules: FilterState,
    pub rule: ActivityRule,
    pub page_field: String,
    /// Starting pagination state, e.g. from a navigation snapshot
    pub load_state: LoadState,
    /// Payload `clear_filters` restores. Taken from the table state at
    /// construction when unset.
    pub defaults: Option<FilterPayload>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            rules: FilterState::default(),
            rule: ActivityRule::default(),
            page_field: PAGE_FIELD.to_string(),
            load_state: LoadState::default(),
            defaults: None,
        }
    }
}

impl TableOptions {
    pub fn from_config(config: &ListConfig) -> Self {
        Self {
            rules: FilterState::new(config.structural_key.clone()),
            page_field: config.page_field.clone(),
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, rule: ActivityRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_defaults(mut self, defaults: FilterPayload) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn with_load_state(mut self, load_state: LoadState) -> Self {
        self.load_state = load_state;
        self
    }
}

struct SyncContext<S: TableSource> {
    state: SharedTableState<S::Item>,
    source: Arc<S>,
    rules: FilterState,
    rule: ActivityRule,
}

struct Applied<T> {
    items: Vec<T>,
    loaded: usize,
    total: TotalCount,
}

impl<S: TableSource> SyncContext<S> {
    fn view(&self) -> &'static str {
        self.source.name()
    }

    /// Recompute activity, then build the stripped payload
    fn prepare(&self, filters: &mut Filters) -> RequestPayload {
        self.rules.apply(self.rule, filters, None, Value::Null);
        strip_empty(self.source.build_payload(filters))
    }

    fn apply(&self, response: S::Response, append: bool) -> Applied<S::Item> {
        let total = self.source.extract_total(&response);
        let items = self.source.extract_items(response);

        let mut state = lock_state(&self.state);
        if append {
            state.results.extend(items.iter().cloned());
        } else {
            state.results = items.clone();
        }
        state.total_results = total;
        if state.results.len() > total {
            warn!(
                view = self.view(),
                loaded = state.results.len(),
                total,
                "Backend total shrank between pages"
            );
        }

        Applied {
            items,
            loaded: state.results.len(),
            total,
        }
    }
}

/// Clears the table's `loading` flag when dropped
struct LoadingFlag<T> {
    state: SharedTableState<T>,
}

impl<T> LoadingFlag<T> {
    /// Caller has already set `loading` under the table lock
    fn held(state: &SharedTableState<T>) -> Self {
        Self {
            state: Arc::clone(state),
        }
    }
}

impl<T> Drop for LoadingFlag<T> {
    fn drop(&mut self) {
        lock_state(&self.state).loading = false;
    }
}

/// What an explicit load does once the loader is claimed
struct Plan {
    append: bool,
    rewind: bool,
}

/// Loader callback: same build → fetch → extract sequence as
/// `load_table_data`, in scroll mode. Only runs under the loader's claim.
pub struct ScrollFetcher<S: TableSource> {
    ctx: Arc<SyncContext<S>>,
}

#[async_trait]
impl<S: TableSource> PageFetcher for ScrollFetcher<S> {
    type Item = S::Item;

    async fn fetch_page(
        &self,
        page: PageNumber,
        append: bool,
    ) -> Result<PageResult<S::Item>, SyncError> {
        let payload = {
            let mut state = lock_state(&self.ctx.state);
            state.loading = true;
            state.filters.page_number = page;
            self.ctx.prepare(&mut state.filters)
        };
        let _loading = LoadingFlag::held(&self.ctx.state);

        match self.ctx.source.fetch_data(payload).await {
            Ok(Some(response)) => {
                let applied = self.ctx.apply(response, append);
                Ok(PageResult {
                    has_more: applied.loaded < applied.total,
                    items: applied.items,
                })
            }
            Ok(None) => {
                debug!(view = self.ctx.view(), page, "Empty response, table unchanged");
                let complete = lock_state(&self.ctx.state).is_complete();
                Ok(PageResult {
                    items: Vec::new(),
                    has_more: !complete,
                })
            }
            Err(e) => Err(e),
        }
    }
}

pub struct TableSyncOrchestrator<S: TableSource> {
    ctx: Arc<SyncContext<S>>,
    loader: PaginationLoader<ScrollFetcher<S>>,
    page_field: String,
    /// Payload at construction, restored by `clear_filters`
    defaults: FilterPayload,
}

impl<S: TableSource> TableSyncOrchestrator<S> {
    pub fn new(state: SharedTableState<S::Item>, source: Arc<S>) -> Self {
        Self::with_options(state, source, TableOptions::default())
    }

    pub fn with_options(
        state: SharedTableState<S::Item>,
        source: Arc<S>,
        options: TableOptions,
    ) -> Self {
        let defaults = match options.defaults {
            Some(defaults) => defaults,
            None => lock_state(&state).filters.filter_payload.clone(),
        };
        let ctx = Arc::new(SyncContext {
            state,
            source,
            rules: options.rules,
            rule: options.rule,
        });
        let loader = PaginationLoader::with_state(
            ScrollFetcher {
                ctx: Arc::clone(&ctx),
            },
            options.load_state,
        );
        Self {
            ctx,
            loader,
            page_field: options.page_field,
            defaults,
        }
    }

    pub fn state(&self) -> &SharedTableState<S::Item> {
        &self.ctx.state
    }

    pub fn source(&self) -> &S {
        &self.ctx.source
    }

    pub fn filters(&self) -> Filters {
        lock_state(&self.ctx.state).filters.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.snapshot()
    }

    pub fn phase(&self) -> LoadPhase {
        self.loader.phase()
    }

    pub fn reached_end(&self) -> bool {
        self.loader.reached_end()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Copy of the current rows
    pub fn results(&self) -> Vec<S::Item> {
        lock_state(&self.ctx.state).results.clone()
    }

    /// Load the page the filters point at.
    ///
    /// `col` equal to the page field moves the cursor to `val`. Any other
    /// `col` is an explicit filter edit: the value is merged under the
    /// table's activity rule, the cursor rewinds to page 1, results are
    /// replaced even if `append_results` is set and `reached_end` clears.
    ///
    /// Dropped while the table is loading. Failures are logged, leave the
    /// current rows in place and stop infinite scroll.
    pub async fn load_table_data(
        &self,
        col: Option<&str>,
        val: Value,
        append_results: bool,
    ) -> LoadOutcome {
        let view = self.ctx.view();
        let rules = &self.ctx.rules;
        let rule = self.ctx.rule;
        let page_field = self.page_field.as_str();

        self.dispatch(|state| match col {
            Some(field) if field == page_field => {
                match val
                    .as_u64()
                    .and_then(|p| PageNumber::try_from(p).ok())
                    .filter(|p| *p >= FIRST_PAGE)
                {
                    Some(page) => state.filters.page_number = page,
                    None => warn!(view, value = %val, "Ignoring invalid page number"),
                }
                Plan {
                    append: append_results,
                    rewind: false,
                }
            }
            Some(field) => {
                rules.apply(rule, &mut state.filters, Some(field), val);
                state.filters.page_number = FIRST_PAGE;
                debug!(view, field, "Filter edited, rewinding to first page");
                Plan {
                    append: false,
                    rewind: true,
                }
            }
            None => Plan {
                append: append_results,
                rewind: false,
            },
        })
        .await
    }

    /// Explicit filter edit from a filter control. Rewinds pagination to
    /// page 1 and replaces the rows.
    pub async fn update_filter(&self, col: &str, val: Value) -> LoadOutcome {
        self.load_table_data(Some(col), val, false).await
    }

    /// Infinite scroll. `is_initial_load` fetches page 1 and replaces rows.
    pub async fn get_next(&self, is_initial_load: bool) -> LoadOutcome {
        self.loader.get_next(is_initial_load).await
    }

    /// Drop loaded rows and start again from page 1
    pub async fn reload(&self) -> LoadOutcome {
        self.restart(|_| {}).await
    }

    /// Restore the construction-time filters, keeping the partition
    pub async fn clear_filters(&self) -> LoadOutcome {
        let rules = &self.ctx.rules;
        let defaults = &self.defaults;
        self.restart(|state| rules.clear(&mut state.filters, defaults))
            .await
    }

    /// Switch the structural partition (e.g. LINKED → UNLINKED)
    pub async fn set_partition(&self, value: Value) -> LoadOutcome {
        let rules = &self.ctx.rules;
        self.restart(move |state| rules.set_partition(&mut state.filters, value))
            .await
    }

    /// Re-fetch the page the filters point at, replacing rows. Used after
    /// restoring a navigation snapshot.
    pub async fn resume(&self) -> LoadOutcome {
        self.load_table_data(None, Value::Null, false).await
    }

    async fn restart<F>(&self, edit: F) -> LoadOutcome
    where
        F: FnOnce(&mut TableState<S::Item>),
    {
        self.dispatch(|state| {
            edit(state);
            state.clear_results();
            state.filters.page_number = FIRST_PAGE;
            Plan {
                append: false,
                rewind: true,
            }
        })
        .await
    }

    /// Claim the loader, apply `edit` to the table and fetch the page the
    /// filters then point at. `edit` only runs once the claim is held.
    async fn dispatch<F>(&self, edit: F) -> LoadOutcome
    where
        F: FnOnce(&mut TableState<S::Item>) -> Plan,
    {
        let view = self.ctx.view();

        let (claim, payload, page, append) = {
            let mut state = lock_state(&self.ctx.state);
            let Some(claim) = self.loader.begin() else {
                debug!(view, "Table already loading, dropping request");
                return LoadOutcome::Dropped;
            };
            let plan = edit(&mut state);
            state.loading = true;
            let payload = self.ctx.prepare(&mut state.filters);
            let page = state.filters.page_number;
            claim.start(page, plan.rewind);
            (claim, payload, page, plan.append)
        };
        let loading = LoadingFlag::held(&self.ctx.state);

        let outcome = match self.ctx.source.fetch_data(payload).await {
            Ok(Some(response)) => {
                let applied = self.ctx.apply(response, append);
                let reached_end = applied.loaded >= applied.total;
                self.loader.set_reached_end(reached_end);
                debug!(
                    view,
                    page,
                    append,
                    loaded = applied.loaded,
                    total = applied.total,
                    "Table loaded"
                );
                LoadOutcome::Loaded {
                    page,
                    items: applied.items.len(),
                    has_more: !reached_end,
                }
            }
            Ok(None) => {
                debug!(view, page, "Empty response, table unchanged");
                LoadOutcome::Loaded {
                    page,
                    items: 0,
                    has_more: !self.loader.reached_end(),
                }
            }
            Err(e) => {
                error!(view, page, code = e.code(), error = %e, "Table load failed, keeping previous results");
                self.loader.set_reached_end(true);
                LoadOutcome::Failed { page }
            }
        };
        // Table flag first, so a load that claims next never sees it cleared
        drop(loading);
        drop(claim);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::source::mock::MockSource;
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn table(
        source: MockSource,
        limit: u32,
        payload: FilterPayload,
    ) -> TableSyncOrchestrator<MockSource> {
        let state = TableState::new(Filters::new(limit, payload)).shared();
        TableSyncOrchestrator::new(state, Arc::new(source))
    }

    fn sent_page(source: &MockSource) -> u64 {
        source.last_payload().unwrap()["page"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_initial_load_replaces_and_tracks_total() {
        let orch = table(MockSource::numbered(5), 2, FilterPayload::new());
        let outcome = orch.load_table_data(None, Value::Null, false).await;

        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                page: 1,
                items: 2,
                has_more: true
            }
        );
        let state = lock_state(orch.state()).clone();
        assert_eq!(state.results, vec!["row-1", "row-2"]);
        assert_eq!(state.total_results, 5);
        assert!(!state.loading);
        assert!(!orch.reached_end());
    }

    #[tokio::test]
    async fn test_page_field_appends() {
        let orch = table(MockSource::numbered(3), 2, FilterPayload::new());
        orch.load_table_data(None, Value::Null, false).await;
        orch.load_table_data(Some("page"), json!(2), true).await;

        assert_eq!(orch.results(), vec!["row-1", "row-2", "row-3"]);
        assert_eq!(orch.filters().page_number, 2);
        assert!(orch.reached_end());
    }

    #[tokio::test]
    async fn test_filter_edit_rewinds_and_replaces() {
        let orch = table(
            MockSource::new(&["alpha", "beta", "alphabet", "gamma"]),
            1,
            FilterPayload::new().with("name", ""),
        );
        orch.get_next(true).await;
        orch.get_next(false).await;
        orch.get_next(false).await;
        assert_eq!(orch.results().len(), 3);

        let outcome = orch.load_table_data(Some("name"), json!("alpha"), true).await;
        assert!(outcome.dispatched());
        assert_eq!(orch.results(), vec!["alpha"]);
        assert_eq!(orch.filters().page_number, 1);
        assert!(orch.filters().is_active);
        assert!(!orch.reached_end());
        assert_eq!(sent_page(orch.source()), 1);

        orch.get_next(false).await;
        assert_eq!(orch.results(), vec!["alpha", "alphabet"]);
        assert!(orch.reached_end());
    }

    #[tokio::test]
    async fn test_empty_fields_are_not_sent() {
        let orch = table(
            MockSource::numbered(1),
            20,
            FilterPayload::new().with("state", "LINKED").with("name", ""),
        );
        orch.load_table_data(None, Value::Null, false).await;
        let payload = orch.source().last_payload().unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({ "page": 1, "limit": 20, "state": "LINKED" })
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_results_and_stops_scroll() {
        let orch = table(MockSource::numbered(6), 2, FilterPayload::new());
        orch.get_next(true).await;
        orch.source().fail.store(true, Ordering::SeqCst);

        let outcome = orch.load_table_data(Some("page"), json!(2), true).await;
        assert_eq!(outcome, LoadOutcome::Failed { page: 2 });
        assert_eq!(orch.results(), vec!["row-1", "row-2"]);
        assert!(!orch.is_loading());
        assert!(orch.reached_end());
        assert_eq!(orch.get_next(false).await, LoadOutcome::Exhausted);
    }

    #[tokio::test]
    async fn test_scroll_failure_keeps_results() {
        let orch = table(MockSource::numbered(6), 2, FilterPayload::new());
        orch.get_next(true).await;
        orch.source().fail.store(true, Ordering::SeqCst);

        assert_eq!(orch.get_next(false).await, LoadOutcome::Failed { page: 2 });
        assert_eq!(orch.results().len(), 2);
        assert_eq!(orch.phase(), LoadPhase::Exhausted);
        assert!(!orch.is_loading());
    }

    #[tokio::test]
    async fn test_empty_response_leaves_table() {
        let orch = table(MockSource::numbered(4), 2, FilterPayload::new());
        orch.get_next(true).await;
        orch.source().empty_response.store(true, Ordering::SeqCst);

        orch.load_table_data(None, Value::Null, false).await;
        assert_eq!(orch.results(), vec!["row-1", "row-2"]);
        assert_eq!(lock_state(orch.state()).total_results, 4);
    }

    #[tokio::test]
    async fn test_scroll_continues_after_explicit_load() {
        let orch = table(MockSource::numbered(5), 2, FilterPayload::new());
        orch.load_table_data(None, Value::Null, false).await;
        orch.get_next(false).await;
        assert_eq!(sent_page(orch.source()), 2);
        assert_eq!(orch.results().len(), 4);
    }

    #[tokio::test]
    async fn test_load_while_loading_is_dropped() {
        let gate = Arc::new(Notify::new());
        let orch = table(
            MockSource::numbered(10).with_gate(Arc::clone(&gate)),
            2,
            FilterPayload::new(),
        );

        let first = orch.load_table_data(None, Value::Null, false);
        let others = async {
            tokio::task::yield_now().await;
            assert!(orch.is_loading());
            let edit = orch.load_table_data(Some("name"), json!("row"), false).await;
            let scroll = orch.get_next(false).await;
            let update = orch.update_filter("name", json!("row")).await;
            gate.notify_one();
            (edit, scroll, update)
        };
        let (first, (edit, scroll, update)) = tokio::join!(first, others);

        assert!(first.dispatched());
        assert_eq!(edit, LoadOutcome::Dropped);
        assert_eq!(scroll, LoadOutcome::Dropped);
        assert_eq!(update, LoadOutcome::Dropped);
        assert_eq!(orch.source().dispatched(), 1);
        assert!(!orch.filters().filter_payload.contains("name"));
    }

    #[tokio::test]
    async fn test_cancelled_scroll_frees_table() {
        let gate = Arc::new(Notify::new());
        let orch = table(
            MockSource::numbered(10).with_gate(Arc::clone(&gate)),
            2,
            FilterPayload::new(),
        );

        let stalled = tokio::time::timeout(Duration::from_millis(20), orch.get_next(true)).await;
        assert!(stalled.is_err());
        assert!(!orch.is_loading());
        assert!(!lock_state(orch.state()).loading);
        assert_ne!(orch.phase(), LoadPhase::Loading);

        gate.notify_one();
        assert!(orch.reload().await.dispatched());
        assert_eq!(orch.source().dispatched(), 2);
        assert_eq!(orch.results(), vec!["row-1", "row-2"]);
    }

    #[tokio::test]
    async fn test_cancelled_filter_edit_frees_table() {
        let gate = Arc::new(Notify::new());
        let orch = table(
            MockSource::numbered(10).with_gate(Arc::clone(&gate)),
            2,
            FilterPayload::new().with("name", ""),
        );

        let edit = orch.update_filter("name", json!("row-1"));
        let stalled = tokio::time::timeout(Duration::from_millis(20), edit).await;
        assert!(stalled.is_err());
        assert!(!orch.is_loading());
        assert!(!lock_state(orch.state()).loading);

        gate.notify_one();
        let retry = orch.update_filter("name", json!("row-1")).await;
        assert!(retry.dispatched());
        assert_eq!(orch.results(), vec!["row-1", "row-10"]);
    }

    #[tokio::test]
    async fn test_filter_edit_reports_loader_phase() {
        let gate = Arc::new(Notify::new());
        let orch = table(
            MockSource::numbered(10).with_gate(Arc::clone(&gate)),
            2,
            FilterPayload::new().with("name", ""),
        );
        assert_eq!(orch.phase(), LoadPhase::Idle);

        let edit = orch.update_filter("name", json!("row"));
        let during = async {
            tokio::task::yield_now().await;
            let phase = orch.phase();
            let load_state = orch.load_state();
            gate.notify_one();
            (phase, load_state)
        };
        let (outcome, (phase, load_state)) = tokio::join!(edit, during);

        assert!(outcome.dispatched());
        assert_eq!(phase, LoadPhase::Loading);
        assert!(load_state.is_loading);
        assert!(!load_state.is_initial_load);
        assert_eq!(orch.phase(), LoadPhase::PartiallyLoaded);
        assert_eq!(orch.load_state().current_page, 1);
    }

    #[tokio::test]
    async fn test_exhausted_scroll_clears_loading() {
        let orch = table(MockSource::numbered(2), 5, FilterPayload::new());
        orch.get_next(true).await;

        assert_eq!(orch.get_next(false).await, LoadOutcome::Exhausted);
        assert!(!orch.is_loading());
        assert!(!lock_state(orch.state()).loading);
        assert!(orch.load_table_data(None, Value::Null, false).await.dispatched());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_never_overlap_fetches() {
        let orch = Arc::new(table(
            MockSource::numbered(40),
            3,
            FilterPayload::new().with("name", ""),
        ));

        let mut tasks = Vec::new();
        for worker in 0..8 {
            let orch = Arc::clone(&orch);
            tasks.push(tokio::spawn(async move {
                for round in 0..25 {
                    match (worker + round) % 4 {
                        0 => orch.get_next(false).await,
                        1 => orch.get_next(round == 0).await,
                        2 => orch.update_filter("name", json!("row")).await,
                        _ => orch.load_table_data(Some("page"), json!(2), true).await,
                    };
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert!(orch.source().dispatched() > 0);
        assert_eq!(orch.source().max_in_flight.load(Ordering::SeqCst), 1);
        assert!(!orch.is_loading());
        assert!(!lock_state(orch.state()).loading);
    }

    #[tokio::test]
    async fn test_update_filter_resets_pagination() {
        let orch = table(
            MockSource::numbered(30),
            5,
            FilterPayload::new().with("name", ""),
        );
        orch.get_next(true).await;
        orch.get_next(false).await;
        orch.get_next(false).await;
        assert_eq!(orch.load_state().current_page, 3);

        orch.update_filter("name", json!("row-2")).await;
        // row-2, row-20..row-29
        assert_eq!(orch.results().len(), 5);
        assert_eq!(lock_state(orch.state()).total_results, 11);
        assert_eq!(orch.filters().page_number, 1);
        assert!(!orch.reached_end());

        orch.get_next(false).await;
        assert_eq!(sent_page(orch.source()), 2);
        assert_eq!(orch.results().len(), 10);
    }

    #[tokio::test]
    async fn test_count_keys_rule_removes_cleared_filter() {
        let state = TableState::new(Filters::new(
            10,
            FilterPayload::new().with("state", "LINKED"),
        ))
        .shared();
        let orch = TableSyncOrchestrator::with_options(
            state,
            Arc::new(MockSource::numbered(3)),
            TableOptions::default().with_rule(ActivityRule::CountKeys),
        );

        orch.update_filter("name", json!("row-1")).await;
        assert!(orch.filters().is_active);
        orch.update_filter("name", json!("")).await;
        assert!(!orch.filters().filter_payload.contains("name"));
        assert!(!orch.filters().is_active);
        assert_eq!(orch.results().len(), 3);
    }

    #[tokio::test]
    async fn test_clear_filters_keeps_partition() {
        let orch = table(
            MockSource::numbered(4),
            10,
            FilterPayload::new().with("state", "LINKED").with("name", ""),
        );
        orch.set_partition(json!("UNLINKED")).await;
        orch.update_filter("name", json!("row-4")).await;
        assert_eq!(orch.results(), vec!["row-4"]);

        orch.clear_filters().await;
        let filters = orch.filters();
        assert_eq!(filters.filter_payload.get("state"), Some(&json!("UNLINKED")));
        assert_eq!(filters.filter_payload.get("name"), Some(&json!("")));
        assert!(!filters.is_active);
        assert_eq!(orch.results().len(), 4);
        assert_eq!(
            orch.source().last_payload().unwrap()["state"],
            json!("UNLINKED")
        );
    }

    #[tokio::test]
    async fn test_reload_starts_from_first_page() {
        let orch = table(MockSource::numbered(6), 2, FilterPayload::new());
        orch.get_next(true).await;
        orch.get_next(false).await;
        orch.get_next(false).await;
        assert!(orch.reached_end());

        orch.reload().await;
        assert_eq!(orch.results(), vec!["row-1", "row-2"]);
        assert!(!orch.reached_end());
        assert_eq!(orch.load_state().current_page, 1);
    }

    #[tokio::test]
    async fn test_resume_loads_saved_page() {
        let mut filters = Filters::new(2, FilterPayload::new());
        filters.page_number = 2;
        let orch = TableSyncOrchestrator::with_options(
            TableState::new(filters).shared(),
            Arc::new(MockSource::numbered(6)),
            TableOptions {
                load_state: LoadState {
                    reached_end: false,
                    is_loading: false,
                    is_initial_load: false,
                    current_page: 2,
                },
                ..TableOptions::default()
            },
        );

        orch.resume().await;
        assert_eq!(orch.results(), vec!["row-3", "row-4"]);
        orch.get_next(false).await;
        assert_eq!(orch.results(), vec!["row-3", "row-4", "row-5", "row-6"]);
        assert_eq!(orch.load_state().current_page, 3);
    }

    #[tokio::test]
    async fn test_invalid_page_value_is_ignored() {
        let orch = table(MockSource::numbered(3), 1, FilterPayload::new());
        orch.load_table_data(Some("page"), json!(0), false).await;
        assert_eq!(sent_page(orch.source()), 1);
        orch.load_table_data(Some("page"), json!("two"), false).await;
        assert_eq!(sent_page(orch.source()), 1);
    }
}
