//! Read-model invalidation for cached views.
//!
//! Dashboard responses are cached per view path (e.g.
//! `/dashboard/{user}/2026-08`) and every envelope or transaction mutation
//! revalidates the affected path prefix. Revalidation is fire-and-forget:
//! it only drops cache entries, so a failed or racing invalidation costs
//! at most one stale read within the cache TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::warn;

/// Default cache capacity (number of view entries).
const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// Default time-to-live for cached views (60 seconds).
const DEFAULT_TTL_SECS: u64 = 60;

/// Cache of rendered view payloads keyed by view path.
#[derive(Clone)]
pub struct ViewCache {
    cache: Cache<String, Arc<serde_json::Value>>,
}

impl ViewCache {
    /// Creates a view cache with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a view cache with custom capacity and TTL.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Self { cache }
    }

    /// Looks up a cached view.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Arc<serde_json::Value>> {
        self.cache.get(path)
    }

    /// Stores a rendered view.
    pub fn insert(&self, path: String, view: serde_json::Value) {
        self.cache.insert(path, Arc::new(view));
    }

    /// Signals that cached views under a path prefix are stale.
    ///
    /// Fire-and-forget: no acknowledgment, nothing to await, and a failure
    /// to register the invalidation is only logged.
    pub fn revalidate(&self, path: &str) {
        let prefix = path.to_string();
        if let Err(e) = self
            .cache
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            warn!(error = %e, "Failed to revalidate view cache");
        }
    }

    /// Drops every cached view.
    pub fn revalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Number of cached views.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks; useful in tests where entry counts
    /// are asserted right after an insert or invalidation.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_miss_then_hit() {
        let views = ViewCache::new();
        assert!(views.get("/dashboard/u1/2026-08").is_none());

        views.insert("/dashboard/u1/2026-08".to_string(), json!({"income": 100}));
        let cached = views.get("/dashboard/u1/2026-08").expect("cached");
        assert_eq!(cached["income"], 100);
    }

    #[test]
    fn test_revalidate_drops_matching_prefix_only() {
        let views = ViewCache::new();
        views.insert("/dashboard/u1/2026-07".to_string(), json!(1));
        views.insert("/dashboard/u1/2026-08".to_string(), json!(2));
        views.insert("/dashboard/u2/2026-08".to_string(), json!(3));

        views.revalidate("/dashboard/u1");
        views.run_pending_tasks();

        assert!(views.get("/dashboard/u1/2026-07").is_none());
        assert!(views.get("/dashboard/u1/2026-08").is_none());
        assert!(views.get("/dashboard/u2/2026-08").is_some());
    }

    #[test]
    fn test_revalidate_all() {
        let views = ViewCache::new();
        views.insert("/dashboard/u1/2026-08".to_string(), json!(1));
        views.insert("/dashboard/u2/2026-08".to_string(), json!(2));

        views.revalidate_all();
        views.run_pending_tasks();

        assert!(views.get("/dashboard/u1/2026-08").is_none());
        assert!(views.get("/dashboard/u2/2026-08").is_none());
    }

    #[test]
    fn test_revalidating_absent_path_is_noop() {
        let views = ViewCache::new();
        views.revalidate("/dashboard/missing");
    }
}
