//! Store adapters and the bounded series cache
//!
//! `SeriesStore` is the seam to the external document store: it hands back
//! one series per known system and the static metadata table. `CachingStore`
//! wraps any store with an explicit LRU cache of fetched series and a
//! memoized metadata table, so repeated requests for the same systems do
//! not refetch.

use crate::{Result, SystemId, SystemMetadata, SystemSeries};
use log::debug;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Access to per-system series and metadata.
///
/// Implementations must tolerate unknown identifiers by omitting them from
/// the result, not by erroring; fetch failures themselves propagate.
pub trait SeriesStore {
    /// Fetch the performance series for the given systems.
    fn fetch_series(&self, ids: &[SystemId]) -> Result<BTreeMap<SystemId, SystemSeries>>;

    /// Fetch the static metadata table for every known system.
    fn fetch_metadata(&self) -> Result<Vec<SystemMetadata>>;
}

/// A bounded least-recently-used cache of fetched series.
///
/// Owned by a [`CachingStore`]; capacity is fixed at construction and the
/// least recently touched entry is evicted when a new one would exceed it.
#[derive(Debug)]
pub struct SeriesCache {
    capacity: usize,
    entries: HashMap<SystemId, SystemSeries>,
    // front = least recently used
    order: VecDeque<SystemId>,
}

impl SeriesCache {
    /// Create a cache holding at most `capacity` series (at least 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &SystemId) -> bool {
        self.entries.contains_key(id)
    }

    /// Look up a series, marking it most recently used on a hit.
    pub fn get(&mut self, id: &SystemId) -> Option<&SystemSeries> {
        if self.entries.contains_key(id) {
            self.touch(*id);
        }
        self.entries.get(id)
    }

    /// Insert a series, evicting the least recently used entry if full.
    pub fn insert(&mut self, id: SystemId, series: SystemSeries) {
        if self.entries.insert(id, series).is_some() {
            self.touch(id);
            return;
        }
        self.order.push_back(id);
        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
                debug!("evicting system {} from the series cache", evicted);
            }
        }
    }

    fn touch(&mut self, id: SystemId) {
        if let Some(pos) = self.order.iter().position(|x| *x == id) {
            self.order.remove(pos);
            self.order.push_back(id);
        }
    }
}

/// A store wrapper that serves repeated fetches from a [`SeriesCache`]
/// and loads the metadata table once.
#[derive(Debug)]
pub struct CachingStore<S> {
    inner: S,
    cache: SeriesCache,
    metadata: Option<Vec<SystemMetadata>>,
}

impl<S: SeriesStore> CachingStore<S> {
    pub fn new(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            cache: SeriesCache::new(capacity),
            metadata: None,
        }
    }

    /// Fetch series for `ids`, serving cached systems without touching the
    /// inner store and fetching the rest in one call.
    ///
    /// Identifiers the inner store does not know stay absent from the
    /// result. Fetch failures propagate.
    pub fn get_series(&mut self, ids: &[SystemId]) -> Result<BTreeMap<SystemId, SystemSeries>> {
        let mut out = BTreeMap::new();
        let mut missing = Vec::new();
        for id in ids {
            if let Some(series) = self.cache.get(id) {
                debug!("cache hit for system {}", id);
                out.insert(*id, series.clone());
            } else if !missing.contains(id) {
                debug!("cache miss for system {}", id);
                missing.push(*id);
            }
        }

        if !missing.is_empty() {
            let fetched = self.inner.fetch_series(&missing)?;
            for (id, series) in fetched {
                self.cache.insert(id, series.clone());
                out.insert(id, series);
            }
        }

        Ok(out)
    }

    /// The metadata table, fetched from the inner store on first use and
    /// reused for the adapter's lifetime.
    pub fn get_metadata(&mut self) -> Result<&[SystemMetadata]> {
        if self.metadata.is_none() {
            self.metadata = Some(self.inner.fetch_metadata()?);
        }
        Ok(self.metadata.as_deref().unwrap_or(&[]))
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }
}

/// An in-memory store over explicitly added series and metadata.
///
/// Stands in for the external document store in tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    series: BTreeMap<SystemId, SystemSeries>,
    metadata: Vec<SystemMetadata>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_series(&mut self, id: SystemId, series: SystemSeries) {
        self.series.insert(id, series);
    }

    pub fn add_metadata(&mut self, metadata: SystemMetadata) {
        self.metadata.push(metadata);
    }
}

impl SeriesStore for MemoryStore {
    fn fetch_series(&self, ids: &[SystemId]) -> Result<BTreeMap<SystemId, SystemSeries>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.series.get(id).map(|s| (*id, s.clone())))
            .collect())
    }

    fn fetch_metadata(&self) -> Result<Vec<SystemMetadata>> {
        Ok(self.metadata.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn one_day_series(value: f64) -> SystemSeries {
        SystemSeries::new(vec![crate::PerformanceSample {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            power_norm: Some(value),
            insolation: Some(900.0),
        }])
        .unwrap()
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut cache = SeriesCache::new(2);
        cache.insert(SystemId(1), one_day_series(0.1));
        cache.insert(SystemId(2), one_day_series(0.2));

        // touch 1 so that 2 becomes the eviction candidate
        assert!(cache.get(&SystemId(1)).is_some());
        cache.insert(SystemId(3), one_day_series(0.3));

        assert!(cache.contains(&SystemId(1)));
        assert!(!cache.contains(&SystemId(2)));
        assert!(cache.contains(&SystemId(3)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_reinsert_replaces_value() {
        let mut cache = SeriesCache::new(2);
        cache.insert(SystemId(1), one_day_series(0.1));
        cache.insert(SystemId(1), one_day_series(0.5));

        assert_eq!(cache.len(), 1);
        let series = cache.get(&SystemId(1)).unwrap();
        assert!((series.samples()[0].power_norm.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = SeriesCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_memory_store_omits_unknown_ids() {
        let mut store = MemoryStore::new();
        store.add_series(SystemId(1), one_day_series(0.9));

        let fetched = store
            .fetch_series(&[SystemId(1), SystemId(99)])
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert!(fetched.contains_key(&SystemId(1)));
    }
}
