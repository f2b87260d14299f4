//! Filter state for list views
//!
//! A view's [`Filters`] carry the user's filter payload plus the page
//! cursor. [`FilterState`] applies edits to them and decides whether any
//! user-meaningful filter is set (the "clear filters" affordance).
//!
//! Two activity rules coexist on purpose:
//! - [`FilterState::handle_filters`] scans values: a field counts when
//!   truthy, a date range counts once its `endDate` is set.
//! - [`FilterState::update_filter`] counts keys: falsy values are removed
//!   from the payload, and the filters are active when more than one key
//!   (the structural partition) remains.
//!
//! Views that always transmit the partition key use the second rule, views
//! with a sparse payload use the first. Callers pick per view.

pub mod payload;
pub mod state;

pub use payload::{FilterPayload, is_truthy};
pub use state::{ActivityRule, FilterState, Filters};

/// Payload key holding the structural partition (e.g. LINKED / UNLINKED).
/// Never counts as a user filter.
pub const STRUCTURAL_KEY: &str = "state";
