//! Load state and its derived phase

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::{FIRST_PAGE, PageNumber};

/// Raw pagination flags, owned by one [`super::PaginationLoader`].
///
/// Plain data so navigation snapshots can store and restore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadState {
    pub reached_end: bool,
    pub is_loading: bool,
    pub is_initial_load: bool,
    pub current_page: PageNumber,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            reached_end: false,
            is_loading: false,
            is_initial_load: true,
            current_page: FIRST_PAGE,
        }
    }
}

impl LoadState {
    pub fn phase(&self) -> LoadPhase {
        if self.is_loading {
            LoadPhase::Loading
        } else if self.reached_end {
            LoadPhase::Exhausted
        } else if self.is_initial_load {
            LoadPhase::Idle
        } else {
            LoadPhase::PartiallyLoaded
        }
    }

    /// Back to Idle. Loaded rows are not the loader's to clear.
    pub fn reset(&mut self) {
        self.reached_end = false;
        self.is_initial_load = true;
        self.current_page = FIRST_PAGE;
    }

    /// Restored snapshots must never resume mid-flight.
    pub fn settled(mut self) -> Self {
        self.is_loading = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    /// Nothing requested since construction or the last reset
    Idle,
    /// A page fetch is in flight
    Loading,
    /// At least one page loaded, more available
    PartiallyLoaded,
    /// Terminal until reset: no more pages, or the last fetch failed
    Exhausted,
}

impl LoadPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPhase::Idle => "IDLE",
            LoadPhase::Loading => "LOADING",
            LoadPhase::PartiallyLoaded => "PARTIALLY_LOADED",
            LoadPhase::Exhausted => "EXHAUSTED",
        }
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
