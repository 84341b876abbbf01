//! nscache - An in-process, namespaced key/value cache
//!
//! A [`Store`] partitions independent [`Cache`]s by namespace. Each cache holds
//! opaque values and carries a cache-wide expiration timestamp; expired
//! namespaces are swept by calling [`Store::expire_cache`], either directly or
//! from the background task started by [`spawn_expire_task`].

pub mod cache;
pub mod config;
pub mod error;
pub mod id;
pub mod tasks;

pub use cache::{Cache, CacheStats, Store, Value};
pub use config::Config;
pub use error::{AlreadyExists, CacheError, Result};
pub use id::generate_id;
pub use tasks::spawn_expire_task;
