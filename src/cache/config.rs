//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default maximum number of cached results.
pub const DEFAULT_MAX_CAPACITY: usize = 10_000;

/// Default time-to-live for cached results.
pub const DEFAULT_TTL: Duration = Duration::from_mins(5);

/// Configuration for the result cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache. Zero disables caching.
    pub max_capacity: usize,

    /// Time-to-live for cache entries.
    /// An entry whose age reaches this duration is treated as absent.
    #[serde(
        rename = "ttl_seconds",
        serialize_with = "serialize_seconds",
        deserialize_with = "deserialize_seconds"
    )]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given max capacity.
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set max capacity for cache (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = duration;
        self
    }
}

fn serialize_seconds<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(ttl.as_secs())
}

fn deserialize_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = CacheConfig::with_capacity(16).ttl(Duration::from_secs(5));

        assert_eq!(config.max_capacity, 16);
        assert_eq!(config.ttl, Duration::from_secs(5));
    }

    #[test]
    fn ttl_reads_as_seconds() -> TestResult {
        let config: CacheConfig = serde_norway::from_str("ttl_seconds: 42\n")?;

        assert_eq!(config.ttl, Duration::from_secs(42));
        assert_eq!(config.max_capacity, DEFAULT_MAX_CAPACITY);

        Ok(())
    }

    #[test]
    fn misspelled_ttl_key_is_rejected() {
        let result = serde_norway::from_str::<CacheConfig>("ttl: 5
");

        assert!(result.is_err(), "`ttl` must be written as `ttl_seconds`");
    }
}
