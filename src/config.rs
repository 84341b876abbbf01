//! Configuration Module
//!
//! Handles loading cache defaults from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lifetime in seconds for caches created without an explicit duration
    pub default_ttl: u64,
    /// Interval in seconds between expiration sweeps
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `NSCACHE_DEFAULT_TTL` - Default cache lifetime in seconds (default: 300)
    /// - `NSCACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("NSCACHE_DEFAULT_TTL", defaults.default_ttl),
            sweep_interval: env_or("NSCACHE_SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }

    /// Returns the sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 300,
            sweep_interval: 1,
        }
    }
}

fn env_or(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval, 1);
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("NSCACHE_DEFAULT_TTL", "60");
        env::set_var("NSCACHE_SWEEP_INTERVAL", "not a number");

        let config = Config::from_env();
        assert_eq!(config.default_ttl, 60);
        assert_eq!(config.sweep_interval, 1);

        env::remove_var("NSCACHE_DEFAULT_TTL");
        env::remove_var("NSCACHE_SWEEP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config, Config::default());
    }
}
