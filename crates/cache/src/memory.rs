//! In-memory multi-index cache connector.
//!
//! [`MemoryCache`] stores each object once and makes it reachable through
//! every key it reports for every configured index category.
//!
//! # Architecture
//!
//! ```text
//! set(object) → object.keys(index) for each configured index
//!             → one shared slot, linked under every returned key
//!
//! get(index, key) → slot lookup → fresh? → clone of the object
//!                                  stale/invalidated → miss
//! ```
//!
//! # Invalidation vs. Deletion
//!
//! The slot behind an object is shared by every index entry pointing at it,
//! and so is its invalidation flag:
//!
//! - [`invalidate`](MemoryCache::invalidate) flips the shared flag — the
//!   object disappears from *every* index at once, even though it was named
//!   through only one.
//! - [`delete`](MemoryCache::delete) unlinks only the named index entries —
//!   other indexes still reach the object.
//!
//! Invalidated and expired slots are physically removed by
//! [`prune`](MemoryCache::prune), typically driven by a periodic janitor
//! task in the owning service.
//!
//! # Concurrency
//!
//! The index maps sit behind a single [`parking_lot::RwLock`]; lookups take
//! the read lock only, with last-use stamps and invalidation flags as
//! atomics inside the shared slot.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::{
    config::CacheConfig,
    entry::CacheEntry,
    error::ConfigError,
    index::CacheIndex,
    metrics::{CacheMetrics, IndexMetricsSnapshot},
};

/// A cached object plus freshness bookkeeping, shared by every index entry
/// pointing at it.
struct Slot<V> {
    value: V,
    created: Instant,
    /// Microseconds since `created` of the most recent hit.
    last_use_us: AtomicU64,
    /// Set by `invalidate`; observed through every index simultaneously.
    invalid: AtomicBool,
}

impl<V> Slot<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            created: Instant::now(),
            last_use_us: AtomicU64::new(0),
            invalid: AtomicBool::new(false),
        }
    }

    fn touch(&self, now: Instant) {
        let since_created = now.duration_since(self.created);
        let micros = u64::try_from(since_created.as_micros()).unwrap_or(u64::MAX);
        self.last_use_us.store(micros, Ordering::Relaxed);
    }

    /// Whether the slot may still be served under the given freshness bounds.
    fn is_fresh(&self, config: &CacheConfig, now: Instant) -> bool {
        if self.invalid.load(Ordering::Acquire) {
            return false;
        }
        let age = now.duration_since(self.created);
        if let Some(max_age) = config.max_age {
            if age > max_age {
                return false;
            }
        }
        if let Some(last_use_age) = config.last_use_age {
            let last_use = Duration::from_micros(self.last_use_us.load(Ordering::Relaxed));
            if age.saturating_sub(last_use) > last_use_age {
                return false;
            }
        }
        true
    }
}

/// In-memory cache with typed secondary indexes.
///
/// `I` is the closed index enumeration; `V` is any [`CacheEntry`] over it.
/// Objects are returned by clone, so `V` is expected to be cheap to clone
/// (records, not buffers — wrap large payloads in `Arc`).
///
/// # Example
///
/// ```
/// use authway_common_cache::{AuthnKey, CacheConfig, KeyIndex, MemoryCache, SubjectKind};
///
/// let cache = MemoryCache::new("authn_keys", KeyIndex::ALL, CacheConfig::unbounded())?;
///
/// let key = AuthnKey::builder()
///     .instance_id("inst-1".to_owned())
///     .kid("key-2026-001".to_owned())
///     .subject_kind(SubjectKind::User)
///     .public_key("MCowBQYDK2VwAyEAtest".to_owned())
///     .build();
/// cache.set(key);
///
/// assert!(cache.get(KeyIndex::KeyId, "key-2026-001").is_some());
/// assert!(cache.get(KeyIndex::InstanceId, "inst-1").is_some());
/// # Ok::<(), authway_common_cache::ConfigError>(())
/// ```
pub struct MemoryCache<I: CacheIndex, V: CacheEntry<I> + Clone> {
    name: &'static str,
    config: CacheConfig,
    indices: Vec<I>,
    maps: RwLock<HashMap<I, HashMap<String, Arc<Slot<V>>>>>,
    metrics: CacheMetrics<I>,
}

impl<I: CacheIndex, V: CacheEntry<I> + Clone> MemoryCache<I, V> {
    /// Creates a cache maintaining one secondary map per index in `indices`.
    ///
    /// `name` labels log lines and metrics for this cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails
    /// [`CacheConfig::validate`].
    pub fn new(
        name: &'static str,
        indices: impl Into<Vec<I>>,
        config: CacheConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let indices = indices.into();
        let maps = indices.iter().map(|index| (*index, HashMap::new())).collect();
        Ok(Self {
            name,
            metrics: CacheMetrics::new(&indices),
            indices,
            config,
            maps: RwLock::new(maps),
        })
    }

    /// Looks up an object by one of its index keys.
    ///
    /// Expired and invalidated slots count as misses. A hit refreshes the
    /// slot's last-use stamp.
    pub fn get(&self, index: I, key: &str) -> Option<V> {
        let now = Instant::now();
        let maps = self.maps.read();
        let slot = maps.get(&index).and_then(|map| map.get(key));

        match slot {
            Some(slot) if slot.is_fresh(&self.config, now) => {
                slot.touch(now);
                self.metrics.record_hit(index);
                trace!(cache = self.name, index = index.label(), key, "cache hit");
                Some(slot.value.clone())
            },
            _ => {
                self.metrics.record_miss(index);
                trace!(cache = self.name, index = index.label(), key, "cache miss");
                None
            },
        }
    }

    /// Stores an object under every key it reports for every configured
    /// index.
    ///
    /// An object reporting no keys for some index is simply not reachable
    /// via that index. Existing entries under the same keys are replaced.
    pub fn set(&self, value: V) {
        let slot = Arc::new(Slot::new(value));
        let mut maps = self.maps.write();
        for index in &self.indices {
            let keys = slot.value.keys(*index);
            if keys.is_empty() {
                continue;
            }
            let map = maps.entry(*index).or_default();
            for key in keys {
                map.insert(key, Arc::clone(&slot));
            }
        }
    }

    /// Invalidates the objects reachable under `keys` in `index`.
    ///
    /// The invalidation flag lives in the shared slot, so each matched
    /// object becomes a miss under *every* index, not just the one named
    /// here. Unknown keys are ignored.
    pub fn invalidate(&self, index: I, keys: &[&str]) {
        let maps = self.maps.read();
        let Some(map) = maps.get(&index) else {
            return;
        };
        let mut invalidated = 0_usize;
        for key in keys {
            if let Some(slot) = map.get(*key) {
                slot.invalid.store(true, Ordering::Release);
                invalidated += 1;
            }
        }
        if invalidated > 0 {
            debug!(cache = self.name, index = index.label(), invalidated, "invalidated entries");
        }
    }

    /// Removes the named index entries only.
    ///
    /// The objects behind them stay reachable through their other index
    /// keys. Unknown keys are ignored.
    pub fn delete(&self, index: I, keys: &[&str]) {
        let mut maps = self.maps.write();
        if let Some(map) = maps.get_mut(&index) {
            for key in keys {
                map.remove(*key);
            }
        }
    }

    /// Physically removes expired and invalidated slots from all indexes.
    ///
    /// Returns the number of index entries removed.
    pub fn prune(&self) -> usize {
        let now = Instant::now();
        let mut maps = self.maps.write();
        let mut removed = 0_usize;
        for map in maps.values_mut() {
            let before = map.len();
            map.retain(|_, slot| slot.is_fresh(&self.config, now));
            removed += before - map.len();
        }
        drop(maps);
        if removed > 0 {
            debug!(cache = self.name, removed, "pruned stale cache entries");
        }
        removed
    }

    /// Drops every entry from every index.
    pub fn truncate(&self) {
        let mut maps = self.maps.write();
        for map in maps.values_mut() {
            map.clear();
        }
        drop(maps);
        debug!(cache = self.name, "cache truncated");
    }

    /// Number of entries currently linked under `index`.
    ///
    /// Counts index entries, not distinct objects; stale entries are
    /// included until [`prune`](Self::prune) removes them.
    #[must_use]
    pub fn entry_count(&self, index: I) -> usize {
        self.maps.read().get(&index).map_or(0, HashMap::len)
    }

    /// Per-index hit/miss counters, sorted by label.
    #[must_use]
    pub fn metrics(&self) -> Vec<IndexMetricsSnapshot> {
        self.metrics.snapshot()
    }

    /// The cache's diagnostic name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}
