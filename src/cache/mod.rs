//! Result Cache
//!
//! Bounded, time-expiring store of solve results for the default pack size
//! set, keyed by requested quantity.
//!
//! Entries live in a [`SlotMap`] and are threaded onto a doubly-linked
//! recency list (most recently used at the head). A hash index maps each
//! quantity to its slot. All three are kept behind one [`Mutex`], so a
//! lookup never sees a half-written entry and eviction happens atomically
//! with respect to concurrent lookups.
//!
//! Expiry is passive: an entry is checked against the TTL when it is read,
//! and dropped then if it is too old. [`ResultCache::purge_expired`] sweeps
//! the whole cache for callers that want to reclaim memory between reads.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, trace};

use crate::solvers::SolveResult;

mod config;
mod metrics;

pub use config::{CacheConfig, DEFAULT_MAX_CAPACITY, DEFAULT_TTL};
pub use metrics::CacheMetricsSnapshot;

use metrics::CacheMetrics;

new_key_type! {
    struct EntryKey;
}

#[derive(Debug)]
struct Entry {
    quantity: i64,
    result: SolveResult,
    created: Instant,
    prev: Option<EntryKey>,
    next: Option<EntryKey>,
}

#[derive(Debug)]
struct LruCore {
    entries: SlotMap<EntryKey, Entry>,
    index: FxHashMap<i64, EntryKey>,
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
    capacity: usize,
    ttl: Duration,
    metrics: CacheMetrics,
}

impl LruCore {
    fn new(config: CacheConfig) -> Self {
        Self {
            entries: SlotMap::with_capacity_and_key(config.max_capacity.min(1024)),
            index: FxHashMap::default(),
            head: None,
            tail: None,
            capacity: config.max_capacity,
            ttl: config.ttl,
            metrics: CacheMetrics::default(),
        }
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.created) >= self.ttl
    }

    fn get(&mut self, quantity: i64, now: Instant) -> Option<SolveResult> {
        let Some(&key) = self.index.get(&quantity) else {
            self.metrics.misses += 1;
            return None;
        };

        let expired = self
            .entries
            .get(key)
            .is_none_or(|entry| self.is_expired(entry, now));

        if expired {
            self.remove(key);
            self.metrics.expirations += 1;
            self.metrics.misses += 1;

            return None;
        }

        self.move_to_front(key);
        self.metrics.hits += 1;

        self.entries.get(key).map(|entry| entry.result.clone())
    }

    fn set(&mut self, quantity: i64, result: SolveResult, now: Instant) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&key) = self.index.get(&quantity) {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.result = result;
                entry.created = now;
            }

            self.move_to_front(key);
            self.metrics.updates += 1;

            return;
        }

        while self.index.len() >= self.capacity {
            let Some(lru) = self.tail else {
                break;
            };

            if let Some(evicted) = self.remove(lru) {
                trace!(quantity = evicted.quantity, "evicted cached result");
            }

            self.metrics.evictions += 1;
        }

        let key = self.entries.insert(Entry {
            quantity,
            result,
            created: now,
            prev: None,
            next: None,
        });

        self.index.insert(quantity, key);
        self.push_front(key);
        self.metrics.insertions += 1;
    }

    fn clear(&mut self) -> usize {
        let cleared = self.entries.len();

        self.entries.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
        self.metrics.invalidations += 1;

        cleared
    }

    fn purge_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<EntryKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(key, _)| key)
            .collect();

        for &key in &expired {
            self.remove(key);
        }

        self.metrics.expirations += expired.len() as u64;

        expired.len()
    }

    fn remove(&mut self, key: EntryKey) -> Option<Entry> {
        self.unlink(key);

        let entry = self.entries.remove(key)?;
        self.index.remove(&entry.quantity);

        Some(entry)
    }

    fn move_to_front(&mut self, key: EntryKey) {
        if self.head == Some(key) {
            return;
        }

        self.unlink(key);
        self.push_front(key);
    }

    fn push_front(&mut self, key: EntryKey) {
        let old_head = self.head;

        if let Some(entry) = self.entries.get_mut(key) {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head.and_then(|head| self.entries.get_mut(head)) {
            Some(head) => head.prev = Some(key),
            None => self.tail = Some(key),
        }

        self.head = Some(key);
    }

    fn unlink(&mut self, key: EntryKey) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };

        let (prev, next) = (entry.prev.take(), entry.next.take());

        match prev.and_then(|prev| self.entries.get_mut(prev)) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.head = next,
        }

        match next.and_then(|next| self.entries.get_mut(next)) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Quantities from most to least recently used.
    #[cfg(test)]
    fn recency_order(&self) -> Vec<i64> {
        let mut order = Vec::with_capacity(self.entries.len());
        let mut cursor = self.head;

        while let Some(entry) = cursor.and_then(|key| self.entries.get(key)) {
            order.push(entry.quantity);
            cursor = entry.next;
        }

        order
    }
}

/// Thread-safe LRU cache of solve results with a per-entry TTL.
#[derive(Debug)]
pub struct ResultCache {
    inner: Mutex<LruCore>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ResultCache {
    /// Create a cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(LruCore::new(config)),
        }
    }

    /// Get the cached result for `quantity`, if present and not expired.
    ///
    /// A hit moves the entry to the most recently used position.
    pub fn get(&self, quantity: i64) -> Option<SolveResult> {
        self.get_at(quantity, Instant::now())
    }

    /// Store `result` for `quantity`, replacing any previous entry and
    /// evicting the least recently used entry if the cache is full.
    pub fn set(&self, quantity: i64, result: SolveResult) {
        self.set_at(quantity, result, Instant::now());
    }

    /// Remove every entry.
    pub fn invalidate(&self) {
        let cleared = self.inner.lock().clear();

        debug!(cleared, "invalidated result cache");
    }

    /// Remove every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    /// Time-to-live for entries.
    pub fn ttl(&self) -> Duration {
        self.inner.lock().ttl
    }

    /// Snapshot of the hit, miss and eviction counters.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let core = self.inner.lock();

        core.metrics.snapshot(core.entries.len(), core.capacity)
    }

    fn get_at(&self, quantity: i64, now: Instant) -> Option<SolveResult> {
        self.inner.lock().get(quantity, now)
    }

    fn set_at(&self, quantity: i64, result: SolveResult, now: Instant) {
        self.inner.lock().set(quantity, result, now);
    }

    fn purge_expired_at(&self, now: Instant) -> usize {
        let purged = self.inner.lock().purge_expired(now);

        if purged > 0 {
            debug!(purged, "purged expired cached results");
        }

        purged
    }
}
