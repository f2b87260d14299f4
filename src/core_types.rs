//! Core types used throughout the crate
//!
//! Type aliases that give pagination arithmetic a semantic name.

/// 1-based page index as sent to the backend.
///
/// # Constraints:
/// - **Never zero**: page 1 is the first page
/// - **Resets**: returns to 1 on every explicit filter edit
pub type PageNumber = u32;

/// Page size requested from the backend. Always greater than zero.
pub type PageLimit = u32;

/// Total row count reported by the backend for the current filter set.
pub type TotalCount = usize;

/// First page of every list.
pub const FIRST_PAGE: PageNumber = 1;

/// Page size used when a view does not configure one.
pub const DEFAULT_PAGE_LIMIT: PageLimit = 20;
