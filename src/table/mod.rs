//! Generic list synchronization
//!
//! Every paginated, filterable list view is a [`TableSource`] driven by a
//! [`TableSyncOrchestrator`] over a [`TableState`] the view owns.

pub mod orchestrator;
pub mod payload;
pub mod source;
pub mod state;

pub use orchestrator::{PAGE_FIELD, ScrollFetcher, TableOptions, TableSyncOrchestrator};
pub use payload::{RequestPayload, default_payload, strip_empty};
pub use source::TableSource;
pub use state::{SharedTableState, TableState, lock_state};
