//! Caller-owned table state

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core_types::TotalCount;
use crate::filter::Filters;

/// Rows, backend total, filters and the loading flag of one list view.
///
/// `results.len()` may exceed `total_results` when the backend total
/// shrinks between pages; that is reported as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<T> {
    pub results: Vec<T>,
    pub total_results: TotalCount,
    pub filters: Filters,
    pub loading: bool,
}

/// Handle the view keeps and lends to its orchestrator
pub type SharedTableState<T> = Arc<Mutex<TableState<T>>>;

impl<T> TableState<T> {
    pub fn new(filters: Filters) -> Self {
        Self {
            results: Vec::new(),
            total_results: 0,
            filters,
            loading: false,
        }
    }

    pub fn shared(self) -> SharedTableState<T> {
        Arc::new(Mutex::new(self))
    }

    /// Everything the backend reported has been loaded
    pub fn is_complete(&self) -> bool {
        self.results.len() >= self.total_results
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
        self.total_results = 0;
    }
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self::new(Filters::default())
    }
}

/// Lock a shared table state, recovering from a poisoned lock
pub fn lock_state<T>(state: &SharedTableState<T>) -> MutexGuard<'_, TableState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
