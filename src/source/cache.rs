//! Output cache for chaining page operations
//!
//! Every document a tool produces is stored under a fresh UUID so later calls
//! can refer to it by `cache_key` instead of re-sending bytes.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

struct CacheInner {
    lru: LruCache<String, Vec<u8>>,
    total_bytes: usize,
}

impl CacheInner {
    fn evict_until_fits(&mut self, incoming: usize, max_bytes: usize) {
        while self.total_bytes + incoming > max_bytes {
            match self.lru.pop_lru() {
                Some((key, evicted)) => {
                    tracing::debug!(%key, bytes = evicted.len(), "evicting cached PDF");
                    self.total_bytes = self.total_bytes.saturating_sub(evicted.len());
                }
                None => break,
            }
        }
    }
}

/// LRU cache bounded by entry count and total bytes
pub struct CacheManager {
    inner: Mutex<CacheInner>,
    max_bytes: usize,
}

impl CacheManager {
    pub fn new(capacity: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(CacheInner {
                lru: LruCache::new(capacity),
                total_bytes: 0,
            }),
            max_bytes,
        }
    }

    /// Store `data` under a new unique key.
    ///
    /// Returns `None` when the document alone exceeds the byte budget.
    pub fn insert(&self, data: Vec<u8>) -> Option<String> {
        if data.len() > self.max_bytes {
            return None;
        }

        let mut inner = self.inner.lock();
        let key = loop {
            let candidate = uuid::Uuid::new_v4().to_string();
            if !inner.lru.contains(&candidate) {
                break candidate;
            }
        };

        inner.evict_until_fits(data.len(), self.max_bytes);
        inner.total_bytes += data.len();
        if let Some((_, displaced)) = inner.lru.push(key.clone(), data) {
            // Entry-count eviction
            inner.total_bytes = inner.total_bytes.saturating_sub(displaced.len());
        }

        Some(key)
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().lru.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().lru.contains(key)
    }

    #[cfg(test)]
    pub(crate) fn remove(&self, key: &str) -> Option<Vec<u8>> {
        let mut inner = self.inner.lock();
        let removed = inner.lru.pop(key)?;
        inner.total_bytes = inner.total_bytes.saturating_sub(removed.len());
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().lru.is_empty()
    }

    /// Bytes currently held across all entries
    pub fn total_bytes(&self) -> usize {
        self.inner.lock().total_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache = CacheManager::new(10, 1024);
        assert!(cache.is_empty());

        let key = cache.insert(vec![1, 2, 3]).unwrap();
        assert_eq!(key.len(), 36); // UUID format
        assert_eq!(cache.get(&key), Some(vec![1, 2, 3]));
        assert_eq!(cache.total_bytes(), 3);
        assert!(!cache.contains("other"));
    }

    #[test]
    fn test_keys_are_unique() {
        let cache = CacheManager::new(10, 1024);
        let a = cache.insert(vec![1]).unwrap();
        let b = cache.insert(vec![1]).unwrap();
        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_entry_count_eviction_tracks_bytes() {
        let cache = CacheManager::new(2, 1024);
        let first = cache.insert(vec![0u8; 10]).unwrap();
        let second = cache.insert(vec![0u8; 20]).unwrap();
        let third = cache.insert(vec![0u8; 30]).unwrap();

        assert!(!cache.contains(&first));
        assert!(cache.contains(&second));
        assert!(cache.contains(&third));
        assert_eq!(cache.total_bytes(), 50);
    }

    #[test]
    fn test_byte_budget_eviction() {
        let cache = CacheManager::new(10, 100);
        let first = cache.insert(vec![0u8; 40]).unwrap();
        let second = cache.insert(vec![0u8; 40]).unwrap();
        let third = cache.insert(vec![0u8; 40]).unwrap();

        assert!(!cache.contains(&first));
        assert!(cache.contains(&second));
        assert!(cache.contains(&third));
        assert_eq!(cache.total_bytes(), 80);
    }

    #[test]
    fn test_oversized_entry_rejected() {
        let cache = CacheManager::new(10, 50);
        assert!(cache.insert(vec![0u8; 51]).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.total_bytes(), 0);
    }

    #[test]
    fn test_remove() {
        let cache = CacheManager::new(10, 1024);
        let key = cache.insert(vec![7; 5]).unwrap();

        assert_eq!(cache.remove(&key), Some(vec![7; 5]));
        assert_eq!(cache.remove(&key), None);
        assert_eq!(cache.total_bytes(), 0);
    }
}
