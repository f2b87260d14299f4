//! Pagination loader
//!
//! Drives "load page N, optionally append" against an injected
//! [`PageFetcher`] with an in-flight guard and end-of-data detection.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, warn};

use super::state::{LoadPhase, LoadState};
use crate::core_types::{FIRST_PAGE, PageNumber};
use crate::error::SyncError;

/// One fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// Fetches one page and stores it wherever the caller keeps its rows.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    type Item: Send;

    async fn fetch_page(
        &self,
        page: PageNumber,
        append: bool,
    ) -> Result<PageResult<Self::Item>, SyncError>;
}

/// What a load request turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Another load was in flight; nothing dispatched
    Dropped,
    /// `reached_end` already set; nothing dispatched
    Exhausted,
    Loaded {
        page: PageNumber,
        items: usize,
        has_more: bool,
    },
    /// Fetch failed; the list is now marked exhausted
    Failed { page: PageNumber },
}

impl LoadOutcome {
    pub fn dispatched(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. } | LoadOutcome::Failed { .. })
    }
}

/// Exclusive right to run one load. Dropping it clears `is_loading`,
/// including when the load future is cancelled mid-fetch.
#[must_use = "the load is released as soon as the claim is dropped"]
pub struct LoadClaim<'a> {
    state: &'a Mutex<LoadState>,
}

impl LoadClaim<'_> {
    /// Point the cursor at `page`. `rewind` also clears `reached_end`.
    pub fn start(&self, page: PageNumber, rewind: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.current_page = page;
        if rewind {
            state.reached_end = false;
        }
    }
}

impl Drop for LoadClaim<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_loading = false;
    }
}

pub struct PaginationLoader<F> {
    state: Mutex<LoadState>,
    fetcher: F,
}

impl<F: PageFetcher> PaginationLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_state(fetcher, LoadState::default())
    }

    /// Resume from a saved snapshot
    pub fn with_state(fetcher: F, state: LoadState) -> Self {
        Self {
            state: Mutex::new(state.settled()),
            fetcher,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn snapshot(&self) -> LoadState {
        *self.lock()
    }

    pub fn phase(&self) -> LoadPhase {
        self.lock().phase()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn reached_end(&self) -> bool {
        self.lock().reached_end
    }

    pub fn set_reached_end(&self, reached_end: bool) {
        self.lock().reached_end = reached_end;
    }

    pub fn current_page(&self) -> PageNumber {
        self.lock().current_page
    }

    pub fn reset(&self) {
        let mut state = self.lock();
        state.reset();
        debug!(loading = state.is_loading, "Pagination reset");
    }

    /// Claim the loader for a load driven from outside `get_next`.
    ///
    /// `None` while another load is in flight. The claim marks the loader
    /// Loading and past its initial load until dropped.
    pub fn begin(&self) -> Option<LoadClaim<'_>> {
        self.try_claim(true)
    }

    fn claim(&self) -> Option<LoadClaim<'_>> {
        self.try_claim(false)
    }

    fn try_claim(&self, settle_initial: bool) -> Option<LoadClaim<'_>> {
        let mut state = self.lock();
        if state.is_loading {
            return None;
        }
        state.is_loading = true;
        if settle_initial {
            state.is_initial_load = false;
        }
        Some(LoadClaim { state: &self.state })
    }

    /// Fetch `page`. Dropped if a load is already in flight.
    ///
    /// Errors are logged and swallowed; the list is marked exhausted so
    /// scrolling stops instead of hammering a failing backend.
    pub async fn load_page(&self, page: PageNumber, append: bool) -> LoadOutcome {
        let Some(claim) = self.claim() else {
            debug!(page, "Load already in flight, dropping request");
            return LoadOutcome::Dropped;
        };
        self.run(claim, page, append).await
    }

    /// Advance the list.
    ///
    /// `is_initial_load` loads page 1 replacing results; otherwise the page
    /// after the current one is appended unless the end was reached.
    pub async fn get_next(&self, is_initial_load: bool) -> LoadOutcome {
        let Some(claim) = self.claim() else {
            debug!("Load already in flight, ignoring scroll");
            return LoadOutcome::Dropped;
        };
        let (page, append) = {
            let mut state = self.lock();
            if is_initial_load {
                state.is_initial_load = false;
                (FIRST_PAGE, false)
            } else if state.reached_end {
                return LoadOutcome::Exhausted;
            } else {
                match state.current_page.checked_add(1) {
                    Some(next) => (next, true),
                    None => {
                        warn!(page = state.current_page, "Page cursor overflow, marking exhausted");
                        state.reached_end = true;
                        return LoadOutcome::Exhausted;
                    }
                }
            }
        };
        self.run(claim, page, append).await
    }

    async fn run(&self, claim: LoadClaim<'_>, page: PageNumber, append: bool) -> LoadOutcome {
        claim.start(page, false);
        let result = self.fetcher.fetch_page(page, append).await;

        let mut state = self.lock();
        let outcome = match result {
            Ok(fetched) => {
                state.reached_end = !fetched.has_more;
                debug!(
                    page,
                    append,
                    items = fetched.items.len(),
                    has_more = fetched.has_more,
                    "Page loaded"
                );
                LoadOutcome::Loaded {
                    page,
                    items: fetched.items.len(),
                    has_more: fetched.has_more,
                }
            }
            Err(e) => {
                state.reached_end = true;
                error!(page, code = e.code(), error = %e, "Page load failed, pagination stopped");
                LoadOutcome::Failed { page }
            }
        };
        drop(state);
        drop(claim);
        outcome
    }
}
