//! Namespace Cache Module
//!
//! Concurrent key/value container for a single namespace.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::cache::stats::{CacheStats, Counters};
use crate::cache::{expiry_from_now, Value};
use crate::error::{CacheError, Result};

// == Cache ==
/// Key/value storage for one namespace.
///
/// Single-key operations (`add`, `remove`, `get`) are atomic. `replace` and
/// `purge` are built from them and are not atomic as a whole: a concurrent
/// reader can observe a key as absent in the middle of a `replace`.
///
/// Caches are only created through a [`Store`](crate::Store).
pub struct Cache<V = Value> {
    /// Namespace the cache was created under
    namespace: String,
    /// Key-value storage
    entries: DashMap<String, V>,
    /// Creation instant plus the requested lifetime
    expires_at: DateTime<Utc>,
    /// Lookup statistics
    counters: Counters,
}

impl<V: Clone> Cache<V> {
    // == Constructor ==
    pub(crate) fn new(namespace: &str, ttl: Duration) -> Self {
        Self {
            namespace: namespace.to_string(),
            entries: DashMap::new(),
            expires_at: expiry_from_now(ttl),
            counters: Counters::default(),
        }
    }

    // == Add ==
    /// Inserts a new entry.
    ///
    /// Fails with [`CacheError::KeyExists`] if the key is present; the stored
    /// value is left untouched.
    pub fn add(&self, key: &str, value: V) -> Result<()> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Err(CacheError::key_exists(key, &self.namespace)),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    // == Remove ==
    /// Deletes an entry, failing with [`CacheError::KeyNotFound`] if absent.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| CacheError::key_not_found(key, &self.namespace))
    }

    // == Get ==
    /// Returns the stored value for `key`.
    pub fn get(&self, key: &str) -> Result<V> {
        match self.entries.get(key) {
            Some(entry) => {
                self.counters.record_hit();
                Ok(entry.value().clone())
            }
            None => {
                self.counters.record_miss();
                Err(CacheError::key_not_found(key, &self.namespace))
            }
        }
    }

    // == Replace ==
    /// Swaps the value of an existing key by removing it and adding it again.
    ///
    /// The presence check happens before any mutation, so a failed replace
    /// leaves the cache untouched.
    pub fn replace(&self, key: &str, value: V) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Err(CacheError::key_not_found(key, &self.namespace));
        }
        self.remove(key)?;
        self.add(key, value)
    }

    // == Purge ==
    /// Removes every entry, one key at a time.
    ///
    /// Stops at the first key that can no longer be removed (another caller
    /// got there first). That failure is logged and not returned. Returns the
    /// number of entries this call removed.
    pub fn purge(&self) -> usize {
        let keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        let mut removed = 0;

        for key in keys {
            if let Err(err) = self.remove(&key) {
                warn!(namespace = %self.namespace, error = %err, "purge stopped early");
                break;
            }
            removed += 1;
        }

        debug!(namespace = %self.namespace, removed, "cache purged");
        removed
    }

    // == Map ==
    /// Returns a snapshot of all entries.
    pub fn map(&self) -> HashMap<String, V> {
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    // == Stats ==
    /// Returns a snapshot of the cache's lookup statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            namespace: self.namespace.clone(),
            hits: self.counters.hits(),
            misses: self.counters.misses(),
            total_entries: self.size(),
            expires_at: self.expires_at,
        }
    }
}

impl<V> Cache<V> {
    // == Size ==
    /// Returns the current number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the namespace the cache was created under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the creation instant plus the requested lifetime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("namespace", &self.namespace)
            .field("size", &self.entries.len())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> Cache<i32> {
        Cache::new("test cache", Duration::from_secs(60))
    }

    #[test]
    fn test_cache_new() {
        let cache = cache();
        assert_eq!(cache.namespace(), "test cache");
        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
        assert!(cache.expires_at() > Utc::now());
    }

    #[test]
    fn test_cache_add_and_get() {
        let cache = cache();

        cache.add("foo", 1).unwrap();
        assert_eq!(cache.get("foo").unwrap(), 1);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_cache_add_existing_key() {
        let cache = cache();

        cache.add("foo", 1).unwrap();
        let result = cache.add("foo", 2);

        assert!(matches!(result, Err(CacheError::KeyExists { .. })));
        assert_eq!(cache.get("foo").unwrap(), 1);
    }

    #[test]
    fn test_cache_get_nonexistent() {
        let cache = cache();

        let result = cache.get("missing");
        assert_eq!(
            result,
            Err(CacheError::KeyNotFound {
                key: "missing".to_string(),
                namespace: "test cache".to_string(),
            })
        );
    }

    #[test]
    fn test_cache_remove() {
        let cache = cache();

        cache.add("foo", 1).unwrap();
        cache.remove("foo").unwrap();

        assert!(cache.is_empty());
        assert!(matches!(cache.get("foo"), Err(CacheError::KeyNotFound { .. })));
    }

    #[test]
    fn test_cache_remove_nonexistent() {
        let cache = cache();
        assert!(matches!(
            cache.remove("missing"),
            Err(CacheError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_cache_replace() {
        let cache = cache();

        cache.add("foo", 1).unwrap();
        cache.replace("foo", 7).unwrap();
        let current = cache.get("foo").unwrap();
        cache.replace("foo", current + 1).unwrap();

        assert_eq!(cache.get("foo").unwrap(), 8);
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_cache_replace_nonexistent() {
        let cache = cache();
        cache.add("foo", 1).unwrap();

        let result = cache.replace("bar", 2);

        assert!(matches!(result, Err(CacheError::KeyNotFound { .. })));
        assert_eq!(cache.size(), 1);
        assert!(matches!(cache.get("bar"), Err(CacheError::KeyNotFound { .. })));
    }

    #[test]
    fn test_cache_purge() {
        let cache = cache();
        for (i, key) in ["foo", "bar", "baz"].iter().enumerate() {
            cache.add(key, i as i32).unwrap();
        }

        assert_eq!(cache.purge(), 3);
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.purge(), 0);
    }

    #[test]
    fn test_cache_map_is_snapshot() {
        let cache = cache();
        cache.add("foo", 1).unwrap();
        cache.add("bar", 2).unwrap();

        let snapshot = cache.map();
        cache.add("baz", 3).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("foo"), Some(&1));
        assert_eq!(snapshot.get("bar"), Some(&2));
        assert!(!snapshot.contains_key("baz"));
    }

    #[test]
    fn test_cache_stats() {
        let cache = cache();
        cache.add("foo", 1).unwrap();
        cache.get("foo").unwrap();
        let _ = cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.namespace, "test cache");
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.expires_at, cache.expires_at());
    }

    #[test]
    fn test_cache_get_returns_stored_object() {
        let cache: Cache = Cache::new("values", Duration::from_secs(60));
        let value = Value::new(vec![1, 2, 3]);

        cache.add("list", value.clone()).unwrap();

        assert!(cache.get("list").unwrap().ptr_eq(&value));
    }
}
