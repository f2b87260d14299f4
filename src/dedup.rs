//! Request deduplication
//!
//! Collapses concurrent identical requests into a single in-flight future.
//! This is not a cache: the entry for a key exists exactly as long as the
//! underlying request is pending, and is removed the moment it settles,
//! before any caller observes the result. A call issued after settlement
//! always starts a fresh request.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Handle every caller of one key awaits. Resolves to the same value (or
/// the same error) for all of them.
pub type InFlight<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

type Registry<T, E> = Arc<Mutex<HashMap<String, InFlight<T, E>>>>;

fn lock<T, E>(registry: &Registry<T, E>) -> MutexGuard<'_, HashMap<String, InFlight<T, E>>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RequestDeduplicator<T, E> {
    inflight: Registry<T, E>,
}

impl<T, E> RequestDeduplicator<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Join the in-flight request for `key`, or start one with `factory`.
    ///
    /// `factory` runs at most once per in-flight period and is called with
    /// the registry locked, so it must only build the future, never call
    /// back into this deduplicator.
    pub fn run<F, Fut>(&self, key: &str, factory: F) -> InFlight<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let mut inflight = lock(&self.inflight);
        if let Some(existing) = inflight.get(key) {
            debug!(key, "Joining in-flight request");
            return existing.clone();
        }

        let request = factory();
        let registry = Arc::clone(&self.inflight);
        let owned_key = key.to_string();
        let shared = async move {
            let result = request.await;
            lock(&registry).remove(&owned_key);
            debug!(key = %owned_key, ok = result.is_ok(), "In-flight request settled");
            result
        }
        .boxed()
        .shared();

        debug!(key, "Dispatching request");
        inflight.insert(key.to_string(), shared.clone());
        shared
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        lock(&self.inflight).contains_key(key)
    }

    /// Number of distinct keys currently pending
    pub fn in_flight(&self) -> usize {
        lock(&self.inflight).len()
    }
}

impl<T, E> Default for RequestDeduplicator<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for RequestDeduplicator<T, E> {
    fn clone(&self) -> Self {
        Self {
            inflight: Arc::clone(&self.inflight),
        }
    }
}
