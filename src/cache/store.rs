//! Cache Store Module
//!
//! Registry of namespaced caches with creation, lookup, removal and the
//! expiration sweep.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{expiry_from_now, Cache, Value, STORE_HORIZON};
use crate::config::Config;
use crate::error::{AlreadyExists, CacheError, Result};
use crate::id::generate_id;

// == Cache Store ==
/// Owns every cache, keyed by namespace.
///
/// All registry operations hold a single mutex for their whole duration.
/// Caches are handed out as `Arc`s: a handle obtained before its namespace is
/// removed keeps working, it is simply no longer reachable through the store.
pub struct Store<V = Value> {
    /// Store identifier
    id: String,
    /// Namespace -> cache registry
    namespaces: Mutex<HashMap<String, Arc<Cache<V>>>>,
    /// Construction instant plus [`STORE_HORIZON`]; informational only
    expires_at: DateTime<Utc>,
    /// Lifetime used by `new_default_cache`
    default_ttl: Duration,
}

impl<V: Clone> Store<V> {
    // == Constructor ==
    /// Creates an empty store with default configuration.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(id, &Config::default())
    }

    /// Creates an empty store using `config` for its defaults.
    pub fn with_config(id: impl Into<String>, config: &Config) -> Self {
        Self {
            id: id.into(),
            namespaces: Mutex::new(HashMap::new()),
            expires_at: expiry_from_now(STORE_HORIZON),
            default_ttl: Duration::from_secs(config.default_ttl),
        }
    }

    /// Creates an empty store named by a freshly generated identifier.
    pub fn with_random_id() -> Result<Self> {
        Ok(Self::new(generate_id()?))
    }

    // == New Cache ==
    /// Registers a new cache expiring `ttl` from now.
    ///
    /// If the namespace is taken nothing is overwritten: the error carries the
    /// cache that is already registered.
    pub fn new_cache(
        &self,
        namespace: &str,
        ttl: Duration,
    ) -> std::result::Result<Arc<Cache<V>>, AlreadyExists<V>> {
        let mut namespaces = self.namespaces.lock();

        if let Some(existing) = namespaces.get(namespace) {
            return Err(AlreadyExists::new(namespace, Arc::clone(existing)));
        }

        let cache = Arc::new(Cache::new(namespace, ttl));
        namespaces.insert(namespace.to_string(), Arc::clone(&cache));
        debug!(store = %self.id, namespace, ?ttl, "cache created");

        Ok(cache)
    }

    /// Registers a new cache with the store's default lifetime.
    pub fn new_default_cache(
        &self,
        namespace: &str,
    ) -> std::result::Result<Arc<Cache<V>>, AlreadyExists<V>> {
        self.new_cache(namespace, self.default_ttl)
    }

    // == Lookup ==
    /// Returns the cache registered under `namespace`.
    pub fn use_namespace(&self, namespace: &str) -> Result<Arc<Cache<V>>> {
        self.namespaces
            .lock()
            .get(namespace)
            .cloned()
            .ok_or_else(|| CacheError::NamespaceNotFound(namespace.to_string()))
    }

    // == Remove ==
    /// Deregisters a namespace. The cache itself is not cleared.
    pub fn remove(&self, namespace: &str) -> Result<()> {
        if self.namespaces.lock().remove(namespace).is_none() {
            return Err(CacheError::NamespaceNotFound(namespace.to_string()));
        }
        debug!(store = %self.id, namespace, "cache removed");
        Ok(())
    }

    // == Namespaces ==
    /// Returns the registered namespaces in lexicographic order.
    pub fn namespaces(&self) -> Vec<String> {
        let mut names: Vec<String> = self.namespaces.lock().keys().cloned().collect();
        names.sort();
        names
    }

    // == Expire ==
    /// Removes every namespace whose cache matches [`is_cache_expired`].
    ///
    /// Works on a snapshot of the namespace list and takes the lock again for
    /// each lookup and removal, so namespaces removed concurrently surface as
    /// [`CacheError::NamespaceNotFound`]. The first such error ends the sweep.
    ///
    /// Returns the number of namespaces removed.
    pub fn expire_cache(&self) -> Result<usize> {
        let mut removed = 0;

        for namespace in self.namespaces() {
            let cache = self.use_namespace(&namespace)?;
            if is_cache_expired(&cache, Utc::now()) {
                self.remove(&namespace)?;
                removed += 1;
            }
        }

        debug!(store = %self.id, removed, "expiration sweep finished");
        Ok(removed)
    }
}

impl<V> Store<V> {
    // == Size ==
    /// Returns the number of registered namespaces.
    pub fn size(&self) -> usize {
        self.namespaces.lock().len()
    }

    /// Returns the store identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the construction instant plus [`STORE_HORIZON`].
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the lifetime used by `new_default_cache`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<V> fmt::Debug for Store<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("id", &self.id)
            .field("size", &self.size())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// == Expiration Predicate ==
/// Sweep predicate: the cache is still before its `expires_at` AND is empty.
///
/// This is not "past its expiry". A cache whose window has elapsed is never
/// swept, whatever it holds. Kept as-is pending a decision on the intended
/// semantics (see DESIGN.md, open question 1).
pub fn is_cache_expired<V>(cache: &Cache<V>, now: DateTime<Utc>) -> bool {
    cache.expires_at() > now && cache.size() == 0
}
