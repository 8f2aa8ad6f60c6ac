use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use sunmap::config::DashboardConfig;
use sunmap::data::export::{export_csv, write_csv};
use sunmap::data::filter::{Criteria, filtered_indices};
use sunmap::data::loader::load_file;
use sunmap::data::model::{RecordField, SolarClass, SolarDataset, SolarRecord};
use sunmap::data::stats::Statistics;
use sunmap::event::{DashboardEvent, DispatchOutcome, FilterChange};
use sunmap::state::AppState;
use tempfile::TempDir;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/solar_radiance_sample.json")
}

fn site(city: &str, solar_class: SolarClass, pvout: f64) -> SolarRecord {
    SolarRecord {
        city: city.to_string(),
        region: "Test Region".to_string(),
        latitude: 50.0,
        longitude: -1.0,
        pvout_daily: pvout,
        ghi_daily: 3.0,
        dni_daily: 2.8,
        dhi_daily: 1.5,
        elevation: 10.0,
        air_temperature: 11.0,
        sunshine_hours: 4.5,
        solar_class,
        data_quality: "High".to_string(),
    }
}

#[test]
fn test_sample_file_loads() {
    let ds = load_file(&sample_path()).expect("sample data should load");
    assert_eq!(ds.len(), 16);
    assert!(ds.regions.contains("Greater London"));
    assert!(ds
        .records()
        .iter()
        .any(|r| r.solar_class == SolarClass::High));
}

#[test]
fn test_export_round_trip_row_count() {
    let ds = load_file(&sample_path()).unwrap();
    let mut criteria = Criteria::default();
    criteria.solar_classes = BTreeSet::from([SolarClass::Low, SolarClass::Medium]);
    let kept = filtered_indices(&ds, &criteria);
    let subset: Vec<&SolarRecord> = kept.iter().map(|&i| &ds.records()[i]).collect();

    let csv = export_csv(subset.iter().copied()).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    assert_eq!(reader.records().count(), subset.len());

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("solar_radiance_data.csv");
    write_csv(&path, subset.iter().copied()).unwrap();
    let reloaded = load_file(&path).unwrap();
    assert_eq!(reloaded.len(), subset.len());
    assert_eq!(reloaded.records()[0], *subset[0]);
}

#[test]
fn test_class_scenario() {
    let ds = SolarDataset::from_records(vec![
        site("A", SolarClass::High, 3.0),
        site("B", SolarClass::High, 3.0),
        site("C", SolarClass::Medium, 3.0),
        site("D", SolarClass::Low, 3.0),
        site("E", SolarClass::Low, 3.0),
    ]);
    let mut criteria = Criteria::default();
    criteria.solar_classes = BTreeSet::from([SolarClass::High]);
    assert_eq!(filtered_indices(&ds, &criteria).len(), 2);
}

#[test]
fn test_statistics_mean_matches_subset() {
    let ds = load_file(&sample_path()).unwrap();
    let criteria = Criteria::with_pvout_max(3.0);
    let kept = filtered_indices(&ds, &criteria);
    let values: Vec<f64> = kept.iter().map(|&i| ds.records()[i].pvout_daily).collect();

    let stats = Statistics::from_records(kept.iter().map(|&i| &ds.records()[i]));
    assert_eq!(stats.count, values.len());
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    assert!((stats.mean_pvout - mean).abs() < 1e-12);
    assert!(stats.max_pvout <= 3.0);
}

#[test]
fn test_dashboard_session() {
    let config = DashboardConfig {
        data_path: sample_path(),
        ..DashboardConfig::default()
    };
    let mut state = AppState::new(config.clone());
    state.load(&config.data_path);
    assert!(state.failure_notice.is_none());
    assert_eq!(state.visible_indices.len(), 16);

    let now = Instant::now();
    state
        .dispatch(
            DashboardEvent::FilterChanged(FilterChange::Region(Some(
                "South West".to_string(),
            ))),
            now,
        )
        .unwrap();
    assert!(state.visible_records().all(|r| r.region == "South West"));

    state
        .dispatch(DashboardEvent::SortRequested(RecordField::Pvout), now)
        .unwrap();
    let ascending: Vec<f64> = state.visible_records().map(|r| r.pvout_daily).collect();
    assert!(ascending.windows(2).all(|w| w[0] <= w[1]));

    state
        .dispatch(DashboardEvent::SortRequested(RecordField::Pvout), now)
        .unwrap();
    let mut descending: Vec<f64> = state.visible_records().map(|r| r.pvout_daily).collect();
    descending.reverse();
    assert_eq!(descending, ascending);

    let DispatchOutcome::Exported(csv) = state
        .dispatch(DashboardEvent::ExportRequested, now)
        .unwrap()
    else {
        panic!("export should produce CSV");
    };
    assert_eq!(csv.lines().count(), ascending.len() + 1);
}
