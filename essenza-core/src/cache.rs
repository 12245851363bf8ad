//! In-memory page cache keyed by route path.
//!
//! The gateway marks the listing page stale after a successful create so the
//! next read of that page misses and the host refetches it.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

/// A cached page payload.
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub data: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
    pub stale: bool,
}

impl CachedPage {
    /// Explicitly invalidated, or older than `max_age` when one is set.
    pub fn is_expired(&self, max_age: Option<TimeDelta>) -> bool {
        if self.stale {
            return true;
        }
        match max_age {
            Some(max_age) => Utc::now() - self.fetched_at > max_age,
            None => false,
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub fresh: usize,
    pub stale: usize,
}

#[derive(Debug, Default)]
pub struct PageCache {
    pages: DashMap<String, CachedPage>,
    /// Entries older than this read as stale. None keeps them until invalidated.
    max_age: Option<TimeDelta>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Store fresh data for a path.
    pub fn put(&self, path: &str, data: serde_json::Value) {
        self.pages.insert(
            normalize_path(path),
            CachedPage {
                data,
                fetched_at: Utc::now(),
                stale: false,
            },
        );
    }

    /// Fresh data for a path. Stale or missing entries return None.
    pub fn get(&self, path: &str) -> Option<serde_json::Value> {
        let key = normalize_path(path);
        match self.pages.get(&key) {
            Some(page) if !page.is_expired(self.max_age) => {
                tracing::debug!(path = %key, "page cache hit");
                Some(page.data.clone())
            }
            Some(_) => {
                tracing::debug!(path = %key, "page cache stale");
                None
            }
            None => None,
        }
    }

    /// Mark the entry for `path` stale. Returns true if an entry existed.
    pub fn revalidate_path(&self, path: &str) -> bool {
        let key = normalize_path(path);
        match self.pages.get_mut(&key) {
            Some(mut page) => {
                page.stale = true;
                tracing::debug!(path = %key, "page cache invalidated");
                true
            }
            None => false,
        }
    }

    pub fn is_stale(&self, path: &str) -> bool {
        self.pages
            .get(&normalize_path(path))
            .map(|p| p.is_expired(self.max_age))
            .unwrap_or(false)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        for page in self.pages.iter() {
            if page.is_expired(self.max_age) {
                stats.stale += 1;
            } else {
                stats.fresh += 1;
            }
        }
        stats
    }
}

/// "/recipes/" and "/recipes" share an entry; the root stays "/".
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_then_get() {
        let cache = PageCache::new();
        cache.put("/recipes", json!([{"title": "Soup"}]));
        assert_eq!(cache.get("/recipes"), Some(json!([{"title": "Soup"}])));
        assert_eq!(cache.get("/recipes/"), Some(json!([{"title": "Soup"}])));
    }

    #[test]
    fn test_revalidate_marks_stale() {
        let cache = PageCache::new();
        cache.put("/recipes", json!([]));
        assert!(cache.revalidate_path("/recipes"));
        assert!(cache.is_stale("/recipes"));
        assert_eq!(cache.get("/recipes"), None);
        assert_eq!(cache.stats(), CacheStats { fresh: 0, stale: 1 });
    }

    #[test]
    fn test_refill_after_revalidate() {
        let cache = PageCache::new();
        cache.put("/recipes", json!([]));
        cache.revalidate_path("/recipes");
        cache.put("/recipes", json!([1]));
        assert_eq!(cache.get("/recipes"), Some(json!([1])));
    }

    #[test]
    fn test_revalidate_missing_entry() {
        let cache = PageCache::new();
        assert!(!cache.revalidate_path("/recipes"));
        assert!(!cache.is_stale("/recipes"));
    }

    #[test]
    fn test_entries_older_than_max_age_are_stale() {
        let cache = PageCache::new().with_max_age(TimeDelta::minutes(5));
        cache.put("/recipes", json!([]));
        cache.put("/", json!({}));
        assert_eq!(cache.get("/recipes"), Some(json!([])));

        if let Some(mut page) = cache.pages.get_mut("/recipes") {
            page.fetched_at = Utc::now() - TimeDelta::minutes(10);
        }

        assert_eq!(cache.get("/recipes"), None);
        assert!(cache.is_stale("/recipes"));
        assert_eq!(cache.stats(), CacheStats { fresh: 1, stale: 1 });
    }

    #[test]
    fn test_no_max_age_never_expires() {
        let cache = PageCache::new();
        cache.put("/recipes", json!([]));
        if let Some(mut page) = cache.pages.get_mut("/recipes") {
            page.fetched_at = Utc::now() - TimeDelta::days(365);
        }
        assert_eq!(cache.get("/recipes"), Some(json!([])));
    }

    #[test]
    fn test_root_path_kept() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/recipes/"), "/recipes");
    }
}
