//! Cache hit/miss telemetry.
//!
//! Each cache tracks hit and miss counts per index category. All atomics
//! use `Ordering::Relaxed`: the counters are independent and monotonically
//! increasing, and telemetry tolerates sub-microsecond skew between them —
//! point-in-time multi-counter consistency would require a mutex on the
//! lookup hot path for no observable benefit.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::index::CacheIndex;

/// Per-index hit/miss counters.
#[derive(Debug, Default)]
struct IndexCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Lock-free hit/miss accounting over a fixed set of index categories.
///
/// The category set is fixed at construction, so recording never allocates
/// or locks; lookups on categories the cache was not built with are counted
/// nowhere rather than failing.
#[derive(Debug)]
pub(crate) struct CacheMetrics<I: CacheIndex> {
    counters: HashMap<I, IndexCounters>,
}

impl<I: CacheIndex> CacheMetrics<I> {
    pub(crate) fn new(indices: &[I]) -> Self {
        let counters = indices.iter().map(|index| (*index, IndexCounters::default())).collect();
        Self { counters }
    }

    pub(crate) fn record_hit(&self, index: I) {
        if let Some(counters) = self.counters.get(&index) {
            counters.hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_miss(&self, index: I) {
        if let Some(counters) = self.counters.get(&index) {
            counters.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Snapshot of every category's counters, sorted by label for
    /// deterministic output.
    pub(crate) fn snapshot(&self) -> Vec<IndexMetricsSnapshot> {
        let mut snapshots: Vec<_> = self
            .counters
            .iter()
            .map(|(index, counters)| IndexMetricsSnapshot {
                label: index.label(),
                hits: counters.hits.load(Ordering::Relaxed),
                misses: counters.misses.load(Ordering::Relaxed),
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.label);
        snapshots
    }
}

/// Hit/miss counts for a single index category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMetricsSnapshot {
    /// The category's stable lowercase label.
    pub label: &'static str,
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that found nothing servable.
    pub misses: u64,
}

impl IndexMetricsSnapshot {
    /// Total lookups for this category.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate (hits / total lookups); zero when there were no lookups.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}
