//! Cache Module
//!
//! Provides the namespace registry and the per-namespace key/value caches.

mod namespace;
mod stats;
mod store;
mod value;


use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

// Re-export public types
pub use namespace::Cache;
pub use stats::CacheStats;
pub use store::{is_cache_expired, Store};
pub use value::Value;

// == Public Constants ==
/// Lifetime of a store, counted from its construction
pub const STORE_HORIZON: Duration = Duration::from_secs(30);

// == Utility Functions ==
/// Returns now + `ttl`, saturating at the latest representable instant.
pub(crate) fn expiry_from_now(ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_from_now() {
        let before = Utc::now();
        let expiry = expiry_from_now(Duration::from_secs(10));

        assert!(expiry >= before + TimeDelta::seconds(10));
        assert!(expiry <= Utc::now() + TimeDelta::seconds(10));
    }

    #[test]
    fn test_expiry_from_now_saturates() {
        assert_eq!(expiry_from_now(Duration::MAX), DateTime::<Utc>::MAX_UTC);
    }
}
