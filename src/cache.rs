//! Keyed fetch cache for the admin pages: remembers the last good value per key so a
//! failed refetch can still show data next to its error.

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

/// Outcome of a fetch: data, an error, both (stale data), or neither (still loading).
#[derive(Clone, Debug, PartialEq)]
pub struct Fetched<T, E> {
    pub data: Option<T>,
    pub error: Option<E>,
}

impl<T, E> Fetched<T, E> {
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }
}

pub struct FetchCache<T> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T> Default for FetchCache<T> {
    fn default() -> Self {
        FetchCache {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone> FetchCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Always revalidates. On success the value is cached; on failure the cached value (if any)
    /// is returned alongside the error.
    pub async fn fetch<F, E>(&self, key: &str, fetcher: F) -> Fetched<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        match fetcher.await {
            Ok(value) => {
                self.mutate(key, value.clone());
                Fetched {
                    data: Some(value),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "fetch failed");
                Fetched {
                    data: self.get(key),
                    error: Some(e),
                }
            }
        }
    }

    /// Replace the cached value, e.g. with the record an update returned.
    pub fn mutate(&self, key: &str, value: T) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    pub fn invalidate(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_is_cached() {
        let cache: FetchCache<u32> = FetchCache::new();
        let f = cache.fetch("k", async { Ok::<_, String>(7) }).await;
        assert_eq!(f.data, Some(7));
        assert!(f.error.is_none());
        assert_eq!(cache.get("k"), Some(7));
    }

    #[tokio::test]
    async fn failure_serves_stale_value_with_error() {
        let cache: FetchCache<u32> = FetchCache::new();
        cache.mutate("k", 1);
        let f = cache.fetch("k", async { Err::<u32, _>("down".to_string()) }).await;
        assert_eq!(f.data, Some(1));
        assert_eq!(f.error.as_deref(), Some("down"));
        assert!(!f.is_loading());
    }

    #[tokio::test]
    async fn failure_without_cache_has_no_data() {
        let cache: FetchCache<u32> = FetchCache::new();
        let f = cache.fetch("k", async { Err::<u32, _>("down".to_string()) }).await;
        assert_eq!(f.data, None);
        assert!(f.error.is_some());
    }

    #[test]
    fn invalidate_drops_entry() {
        let cache: FetchCache<&str> = FetchCache::new();
        cache.mutate("k", "v");
        cache.invalidate("k");
        assert_eq!(cache.get("k"), None);
        let empty: Fetched<u8, String> = Fetched { data: None, error: None };
        assert!(empty.is_loading());
    }
}
