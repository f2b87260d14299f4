//! Infinite-scroll pagination
//!
//! # State Machine
//!
//! ```text
//! Idle → Loading → PartiallyLoaded → Loading → ... → Exhausted
//!   ↑                                                    │
//!   └──────────────────── reset() ───────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. **Drop, don't queue**: a load requested while one is in flight is
//!    discarded. Callers throttle re-triggers (debounce, scroll sentinels).
//! 2. **Exhausted is sticky**: once `reached_end` is set no further page
//!    is fetched until `reset()`.
//! 3. **Fail closed**: a failed fetch is logged and marks the list
//!    exhausted instead of retrying forever.
//! 4. **Released on drop**: the in-flight flag lives in a [`LoadClaim`],
//!    so a cancelled load frees the loader.

pub mod loader;
pub mod state;

pub use loader::{LoadClaim, LoadOutcome, PageFetcher, PageResult, PaginationLoader};
pub use state::{LoadPhase, LoadState};
