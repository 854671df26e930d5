use pretty_assertions::assert_eq;
use pv_data::store::SeriesStore;
use pv_data::utils::{generate_cohort, generate_degrading_series, generate_metadata};
use pv_data::{CsvStore, SystemId};
use tempfile::TempDir;

#[test]
fn test_series_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::new(dir.path());

    let series = generate_degrading_series(120, 0.95, -0.02, 0.01, 7);
    store.write_series(SystemId(7), &series).unwrap();

    let fetched = store.fetch_series(&[SystemId(7)]).unwrap();
    let loaded = &fetched[&SystemId(7)];

    assert_eq!(loaded.len(), series.len());
    assert_eq!(loaded.dates(), series.dates());
    for (a, b) in loaded.samples().iter().zip(series.samples()) {
        match (a.power_norm, b.power_norm) {
            (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9),
            (None, None) => {}
            _ => panic!("missing samples did not survive the round trip"),
        }
    }
}

#[test]
fn test_unknown_system_is_omitted() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::new(dir.path());

    store
        .write_series(SystemId(1), &generate_degrading_series(30, 0.9, -0.01, 0.01, 0))
        .unwrap();

    let fetched = store.fetch_series(&[SystemId(1), SystemId(2)]).unwrap();
    assert_eq!(fetched.len(), 1);
    assert!(fetched.contains_key(&SystemId(1)));
}

#[test]
fn test_metadata_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::new(dir.path());

    let metadata = vec![
        generate_metadata(SystemId(1), 365),
        generate_metadata(SystemId(2), 730),
    ];
    store.write_metadata(&metadata).unwrap();

    let loaded = store.fetch_metadata().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, SystemId(1));
    assert_eq!(loaded[0].state, metadata[0].state);
    assert_eq!(loaded[1].active_days, 730);
}

#[test]
fn test_missing_metadata_table_is_an_error() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::new(dir.path());
    assert!(store.fetch_metadata().is_err());
}

#[test]
fn test_whole_cohort_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = CsvStore::new(dir.path());

    let (metadata, series) = generate_cohort(4, 60);
    store.write_metadata(&metadata).unwrap();
    for (id, s) in &series {
        store.write_series(*id, s).unwrap();
    }

    let ids: Vec<SystemId> = series.keys().copied().collect();
    let fetched = store.fetch_series(&ids).unwrap();
    assert_eq!(fetched.len(), 4);
    assert_eq!(store.fetch_metadata().unwrap().len(), 4);
}
