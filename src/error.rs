//! Error types for the namespaced cache
//!
//! Provides unified error handling using thiserror.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::cache::{Cache, Value};

// == Cache Error Enum ==
/// Unified error type for stores and caches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The receiver of the operation no longer exists
    #[error("store cannot be nil: {0}")]
    NilReceiver(String),

    /// Key is already present in the cache
    #[error("key already exists: {key} (namespace: {namespace})")]
    KeyExists { key: String, namespace: String },

    /// Key is not present in the cache
    #[error("key not found: {key} (namespace: {namespace})")]
    KeyNotFound { key: String, namespace: String },

    /// Namespace is already registered in the store
    #[error("cache {0} already exists")]
    AlreadyExists(String),

    /// Namespace is not registered in the store
    #[error("namespace not found: {0}")]
    NamespaceNotFound(String),

    /// The OS entropy source failed
    #[error("entropy source failure: {0}")]
    Entropy(String),
}

impl CacheError {
    pub(crate) fn key_exists(key: &str, namespace: &str) -> Self {
        CacheError::KeyExists {
            key: key.to_string(),
            namespace: namespace.to_string(),
        }
    }

    pub(crate) fn key_not_found(key: &str, namespace: &str) -> Self {
        CacheError::KeyNotFound {
            key: key.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

// == Already Exists ==
/// Returned by [`Store::new_cache`](crate::Store::new_cache) when the namespace
/// is taken. Carries the cache that is already registered under it.
#[derive(Error)]
#[error("cache {namespace} already exists")]
pub struct AlreadyExists<V = Value> {
    namespace: String,
    cache: Arc<Cache<V>>,
}

impl<V> AlreadyExists<V> {
    pub(crate) fn new(namespace: &str, cache: Arc<Cache<V>>) -> Self {
        Self {
            namespace: namespace.to_string(),
            cache,
        }
    }

    /// Namespace that was requested.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The cache already registered under the namespace.
    pub fn cache(&self) -> &Arc<Cache<V>> {
        &self.cache
    }

    /// Consumes the error, returning the registered cache.
    pub fn into_cache(self) -> Arc<Cache<V>> {
        self.cache
    }
}

impl<V> fmt::Debug for AlreadyExists<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlreadyExists")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl<V> From<AlreadyExists<V>> for CacheError {
    fn from(err: AlreadyExists<V>) -> Self {
        CacheError::AlreadyExists(err.namespace)
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
