use chrono::NaiveDate;
use pv_data::store::{CachingStore, SeriesStore};
use pv_data::utils::generate_metadata;
use pv_data::{PerformanceSample, SystemId, SystemMetadata, SystemSeries};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A store that counts how often it is asked, for cache assertions.
struct CountingStore {
    series: BTreeMap<SystemId, SystemSeries>,
    series_fetches: Rc<Cell<usize>>,
    metadata_fetches: Rc<Cell<usize>>,
}

impl CountingStore {
    fn new(
        series: BTreeMap<SystemId, SystemSeries>,
    ) -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let series_fetches = Rc::new(Cell::new(0));
        let metadata_fetches = Rc::new(Cell::new(0));
        let store = Self {
            series,
            series_fetches: Rc::clone(&series_fetches),
            metadata_fetches: Rc::clone(&metadata_fetches),
        };
        (store, series_fetches, metadata_fetches)
    }
}

impl SeriesStore for CountingStore {
    fn fetch_series(&self, ids: &[SystemId]) -> pv_data::Result<BTreeMap<SystemId, SystemSeries>> {
        self.series_fetches.set(self.series_fetches.get() + 1);
        Ok(ids
            .iter()
            .filter_map(|id| self.series.get(id).map(|s| (*id, s.clone())))
            .collect())
    }

    fn fetch_metadata(&self) -> pv_data::Result<Vec<SystemMetadata>> {
        self.metadata_fetches.set(self.metadata_fetches.get() + 1);
        Ok(vec![generate_metadata(SystemId(1), 100)])
    }
}

fn flat_series(value: f64) -> SystemSeries {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let samples = (0..10)
        .map(|i| PerformanceSample {
            date: base + chrono::Duration::days(i),
            power_norm: Some(value),
            insolation: Some(900.0),
        })
        .collect();
    SystemSeries::new(samples).unwrap()
}

fn cohort(ids: &[u32]) -> BTreeMap<SystemId, SystemSeries> {
    ids.iter()
        .map(|&id| (SystemId(id), flat_series(id as f64 / 10.0)))
        .collect()
}

#[test]
fn test_second_request_is_served_from_cache() {
    let (inner, fetches, _) = CountingStore::new(cohort(&[1, 2]));
    let mut store = CachingStore::new(inner, 8);

    let first = store.get_series(&[SystemId(1), SystemId(2)]).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(fetches.get(), 1);

    let second = store.get_series(&[SystemId(1), SystemId(2)]).unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(fetches.get(), 1);
}

#[test]
fn test_only_missing_systems_are_fetched() {
    let (inner, fetches, _) = CountingStore::new(cohort(&[1, 2, 3]));
    let mut store = CachingStore::new(inner, 8);

    store.get_series(&[SystemId(1)]).unwrap();
    let out = store.get_series(&[SystemId(1), SystemId(2)]).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(fetches.get(), 2);
    assert!(store.cache().contains(&SystemId(1)));
    assert!(store.cache().contains(&SystemId(2)));
    assert!(!store.cache().contains(&SystemId(3)));
}

#[test]
fn test_unknown_ids_are_omitted_not_errors() {
    let (inner, _, _) = CountingStore::new(cohort(&[1]));
    let mut store = CachingStore::new(inner, 8);

    let out = store.get_series(&[SystemId(1), SystemId(42)]).unwrap();
    assert_eq!(out.len(), 1);
    assert!(out.contains_key(&SystemId(1)));
}

#[test]
fn test_cache_capacity_bounds_retention() {
    let (inner, _, _) = CountingStore::new(cohort(&[1, 2, 3]));
    let mut store = CachingStore::new(inner, 2);

    store
        .get_series(&[SystemId(1), SystemId(2), SystemId(3)])
        .unwrap();
    assert_eq!(store.cache().len(), 2);
}

#[test]
fn test_metadata_is_fetched_once() {
    let (inner, _, metadata_fetches) = CountingStore::new(cohort(&[1]));
    let mut store = CachingStore::new(inner, 8);

    assert_eq!(store.get_metadata().unwrap().len(), 1);
    assert_eq!(store.get_metadata().unwrap().len(), 1);
    assert_eq!(metadata_fetches.get(), 1);
}

#[test]
fn test_duplicate_request_ids_collapse() {
    let (inner, fetches, _) = CountingStore::new(cohort(&[5]));
    let mut store = CachingStore::new(inner, 8);

    let out = store
        .get_series(&[SystemId(5), SystemId(5), SystemId(5)])
        .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(fetches.get(), 1);
}
