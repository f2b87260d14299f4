//! fas_list_sync - incremental list synchronization for the FAS / EFT
//! admin screens
//!
//! Keeps paginated, filterable tables in sync with the pay and FAS REST
//! APIs, collapses duplicate record lookups and turns backend errors into
//! user-facing messages.
//!
//! # Modules
//!
//! - [`dedup`] - One in-flight request per key
//! - [`filter`] - Filter payload and activity rules
//! - [`pagination`] - Load state machine and page loader
//! - [`table`] - Table state and the sync orchestrator
//! - [`classify`] - Backend error classification and taxonomies
//! - [`transport`] - HTTP seam and the reqwest client
//! - [`views`] - Concrete list views
//! - [`services`] - Record lookups and mutating actions
//! - [`nav`] - Navigation snapshots

// Core types - must be first!
pub mod core_types;

pub mod config;
pub mod error;
pub mod logging;

// List engine
pub mod dedup;
pub mod filter;
pub mod pagination;
pub mod table;

pub mod classify;
pub mod transport;

// Application layer
pub mod nav;
pub mod services;
pub mod views;

// Convenient re-exports at crate root
pub use classify::{Taxonomy, get_domain_error_message, user_message};
pub use config::{AppConfig, ListConfig};
pub use core_types::{PageLimit, PageNumber, TotalCount};
pub use dedup::RequestDeduplicator;
pub use error::SyncError;
pub use filter::{ActivityRule, FilterPayload, FilterState, Filters};
pub use nav::{NavigationStore, ViewSnapshot};
pub use pagination::{LoadOutcome, LoadPhase, LoadState, PageFetcher, PageResult, PaginationLoader};
pub use table::{TableOptions, TableSource, TableState, TableSyncOrchestrator};
pub use transport::{RestClient, Transport};
