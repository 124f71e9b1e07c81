//! Cache counters.

use serde::Serialize;

/// Running counters kept alongside the cache contents.
#[derive(Debug, Default)]
pub(crate) struct CacheMetrics {
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) expirations: u64,
    pub(crate) insertions: u64,
    pub(crate) updates: u64,
    pub(crate) evictions: u64,
    pub(crate) invalidations: u64,
}

impl CacheMetrics {
    pub(crate) fn snapshot(&self, len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            hits: self.hits,
            misses: self.misses,
            expirations: self.expirations,
            insertions: self.insertions,
            updates: self.updates,
            evictions: self.evictions,
            invalidations: self.invalidations,
            len,
            capacity,
        }
    }
}

/// Point-in-time view of the cache counters, for export by a metrics
/// collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetricsSnapshot {
    /// Lookups answered from the cache.
    pub hits: u64,

    /// Lookups that found nothing usable, expired entries included.
    pub misses: u64,

    /// Entries dropped because their TTL had passed.
    pub expirations: u64,

    /// New keys stored.
    pub insertions: u64,

    /// Existing keys replaced.
    pub updates: u64,

    /// Entries evicted to make room for a new key.
    pub evictions: u64,

    /// Times the whole cache was cleared.
    pub invalidations: u64,

    /// Entries currently held.
    pub len: usize,

    /// Maximum number of entries.
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Total lookups.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups answered from the cache, `0.0` before any lookup.
    #[expect(
        clippy::cast_precision_loss,
        reason = "ratio of counters, precision loss is irrelevant"
    )]
    pub fn hit_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_without_lookups_is_zero() {
        let snapshot = CacheMetricsSnapshot::default();

        assert!(snapshot.hit_ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn hit_ratio_counts_hits_over_lookups() {
        let snapshot = CacheMetricsSnapshot {
            hits: 3,
            misses: 1,
            ..Default::default()
        };

        assert_eq!(snapshot.lookups(), 4);
        assert!((snapshot.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
