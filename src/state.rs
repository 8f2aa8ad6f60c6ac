use std::path::Path;
use std::time::{Duration, Instant};

use crate::color::{ColorBy, ColorMap};
use crate::config::{DEFAULT_CENTER, DEFAULT_SPAN_DEG, DashboardConfig, FOCUS_SPAN_DEG};
use crate::data::export::export_csv;
use crate::data::filter::{Criteria, filtered_indices};
use crate::data::loader::load_file;
use crate::data::model::{SolarDataset, SolarRecord};
use crate::data::sort::{SortState, sort_indices};
use crate::data::stats::Statistics;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::event::{DashboardEvent, DispatchOutcome, FilterChange};

// ---------------------------------------------------------------------------
// View-only state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Map,
    Table,
}

/// A pending change of the map viewport, consumed by the map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    /// Show the default centre.
    Reset,
    /// Centre on a location.
    Focus { latitude: f64, longitude: f64 },
}

impl ViewRequest {
    /// Plot bounds as `([lon_min, lat_min], [lon_max, lat_max])`.
    pub fn bounds(self) -> ([f64; 2], [f64; 2]) {
        let ((lat, lon), span) = match self {
            ViewRequest::Reset => (DEFAULT_CENTER, DEFAULT_SPAN_DEG),
            ViewRequest::Focus {
                latitude,
                longitude,
            } => ((latitude, longitude), FOCUS_SPAN_DEG),
        };
        ([lon - span, lat - span], [lon + span, lat + span])
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file has been read).
    pub dataset: Option<SolarDataset>,

    /// Filter selections applied to produce `visible_indices`.
    pub criteria: Criteria,

    /// Indices of records passing the current filters, in table order.
    pub visible_indices: Vec<usize>,

    /// Active table ordering.
    pub sort: Option<SortState>,

    /// Aggregates over the visible records.
    pub statistics: Statistics,

    /// Text in the search box; copied into `criteria` when the debounce fires.
    pub search_input: String,
    search_debounce: Debouncer,

    /// Active colour map.
    pub color_map: ColorMap,

    /// Record shown in the detail window.
    pub selected: Option<usize>,

    pub active_tab: Tab,
    pub view_request: Option<ViewRequest>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// One-off notice shown when the startup load fails.
    pub failure_notice: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            criteria: Criteria::with_pvout_max(config.pvout_max),
            search_debounce: Debouncer::new(config.debounce),
            config,
            dataset: None,
            visible_indices: Vec::new(),
            sort: None,
            statistics: Statistics::default(),
            search_input: String::new(),
            color_map: ColorMap::default(),
            selected: None,
            active_tab: Tab::default(),
            view_request: Some(ViewRequest::Reset),
            status_message: None,
            failure_notice: None,
        }
    }

    /// Load the dataset at `path`. On failure the dashboard runs with an
    /// empty dataset and a failure notice; there is no retry.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) if dataset.is_empty() => {
                log::warn!("No records in {}", path.display());
                self.failure_notice = Some(format!(
                    "No solar data found in {}.",
                    path.display()
                ));
                self.set_dataset(dataset);
            }
            Ok(dataset) => {
                self.set_dataset(dataset);
                self.failure_notice = None;
            }
            Err(e) => {
                log::error!("Could not load solar data from {}: {e}", path.display());
                self.set_dataset(SolarDataset::default());
                self.failure_notice = Some(
                    "Failed to load solar data. Check the log for details and try again later."
                        .to_string(),
                );
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset filters and colour. Every record
    /// is visible until the first filter change.
    pub fn set_dataset(&mut self, dataset: SolarDataset) {
        self.criteria = Criteria::with_pvout_max(self.config.pvout_max);
        self.search_input.clear();
        self.search_debounce.cancel();
        self.sort = None;
        self.selected = None;
        self.color_map = ColorMap::new(self.color_map.color_by, &dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.statistics = Statistics::from_records(dataset.records());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.view_request = Some(ViewRequest::Reset);
    }

    /// Recompute `visible_indices` and statistics after a criteria change.
    /// The active sort is re-applied to the new subset.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.criteria);
        if let Some(sort) = self.sort {
            sort_indices(ds, &mut self.visible_indices, sort);
        }
        self.statistics = Statistics::from_records(self.visible_records());
        if self.selected.is_some_and(|i| !self.visible_indices.contains(&i)) {
            self.selected = None;
        }
    }

    /// Visible records in table order.
    pub fn visible_records(&self) -> impl Iterator<Item = &SolarRecord> + '_ {
        let records = self.dataset.as_ref().map(|ds| ds.records()).unwrap_or(&[]);
        self.visible_indices
            .iter()
            .filter_map(move |&i| records.get(i))
    }

    pub fn selected_record(&self) -> Option<&SolarRecord> {
        self.dataset.as_ref()?.get(self.selected?)
    }

    /// Set colour attribute and rebuild the map.
    pub fn set_color_by(&mut self, color_by: ColorBy) {
        let empty = SolarDataset::default();
        let ds = self.dataset.as_ref().unwrap_or(&empty);
        self.color_map = ColorMap::new(color_by, ds);
    }

    /// Handle one interaction event.
    pub fn dispatch(&mut self, event: DashboardEvent, now: Instant) -> Result<DispatchOutcome> {
        log::debug!("Dispatching {event:?}");
        match event {
            DashboardEvent::FilterChanged(change) => {
                self.apply_filter_change(change);
                Ok(DispatchOutcome::Refiltered)
            }
            DashboardEvent::SortRequested(field) => {
                let Some(ds) = self.dataset.as_ref().filter(|ds| !ds.is_empty()) else {
                    return Ok(DispatchOutcome::Ignored);
                };
                let sort = SortState::toggle(self.sort, field);
                sort_indices(ds, &mut self.visible_indices, sort);
                self.sort = Some(sort);
                Ok(DispatchOutcome::Resorted)
            }
            DashboardEvent::SearchChanged(text) => {
                self.search_input = text;
                self.search_debounce.schedule(now);
                Ok(DispatchOutcome::SearchScheduled)
            }
            DashboardEvent::ExportRequested => {
                if self.dataset.is_none() {
                    return Ok(DispatchOutcome::Ignored);
                }
                Ok(DispatchOutcome::Exported(export_csv(self.visible_records())?))
            }
        }
    }

    /// Apply a due search. Returns true if the subset was recomputed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.search_debounce.fire(now) {
            return false;
        }
        self.criteria.search_term = self.search_input.clone();
        self.refilter();
        true
    }

    /// Time until the pending search fires, for scheduling a repaint.
    pub fn pending_search_delay(&self, now: Instant) -> Option<Duration> {
        self.search_debounce.time_remaining(now)
    }

    fn apply_filter_change(&mut self, change: FilterChange) {
        match change {
            FilterChange::SolarClass { class, enabled } => {
                if enabled {
                    self.criteria.solar_classes.insert(class);
                } else {
                    self.criteria.solar_classes.remove(&class);
                }
            }
            FilterChange::Region(region) => self.criteria.set_region(region),
            FilterChange::DataQuality(quality) => self.criteria.set_data_quality(quality),
            FilterChange::PvoutMax(max) => self.criteria.pvout_max = max,
            FilterChange::Clear => {
                self.criteria = Criteria::with_pvout_max(self.config.pvout_max);
                self.search_input.clear();
            }
        }
        // A filter change applies whatever is in the search box right away.
        self.search_debounce.cancel();
        self.criteria.search_term = self.search_input.clone();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::fixtures::{dataset, record};
    use crate::data::model::{RecordField, SolarClass};
    use crate::data::sort::SortDirection;

    fn state_with(records: Vec<SolarRecord>) -> AppState {
        let mut state = AppState::default();
        state.set_dataset(dataset(records));
        state
    }

    fn sample_state() -> AppState {
        state_with(vec![
            record("London", SolarClass::High, 3.1),
            record("Paris", SolarClass::High, 5.0),
            record("Londonderry", SolarClass::Medium, 7.2),
            record("Leeds", SolarClass::Low, 2.4),
            record("Lyon", SolarClass::Low, 6.0),
        ])
    }

    fn visible_cities(state: &AppState) -> Vec<&str> {
        state.visible_records().map(|r| r.city.as_str()).collect()
    }

    #[test]
    fn test_initial_subset_shows_every_record() {
        let mut state = state_with(vec![
            record("Bath", SolarClass::Medium, 3.0),
            record("Seville", SolarClass::High, 7.5),
        ]);
        assert_eq!(state.visible_indices.len(), 2);
        assert_eq!(state.statistics.count, 2);
        assert_eq!(state.statistics.max_pvout, 7.5);

        // The default ceiling only applies once a filter changes.
        state
            .dispatch(
                DashboardEvent::FilterChanged(FilterChange::Region(None)),
                Instant::now(),
            )
            .unwrap();
        assert_eq!(visible_cities(&state), vec!["Bath"]);
        assert_eq!(state.statistics.count, 1);
    }

    #[test]
    fn test_class_toggle_refilters() {
        let mut state = sample_state();
        let now = Instant::now();
        for class in [SolarClass::Medium, SolarClass::Low, SolarClass::Unknown] {
            let outcome = state
                .dispatch(
                    DashboardEvent::FilterChanged(FilterChange::SolarClass {
                        class,
                        enabled: false,
                    }),
                    now,
                )
                .unwrap();
            assert_eq!(outcome, DispatchOutcome::Refiltered);
        }
        assert_eq!(visible_cities(&state), vec!["London", "Paris"]);

        // Unticking the last class leaves no class restriction at all.
        state
            .dispatch(
                DashboardEvent::FilterChanged(FilterChange::SolarClass {
                    class: SolarClass::High,
                    enabled: false,
                }),
                now,
            )
            .unwrap();
        assert_eq!(state.visible_indices.len(), 4);
    }

    #[test]
    fn test_search_is_debounced() {
        let mut state = sample_state();
        let start = Instant::now();

        state
            .dispatch(DashboardEvent::SearchChanged("l".to_string()), start)
            .unwrap();
        let outcome = state
            .dispatch(
                DashboardEvent::SearchChanged("lon".to_string()),
                start + Duration::from_millis(100),
            )
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::SearchScheduled);
        assert_eq!(state.visible_indices.len(), 5);

        assert!(!state.poll(start + Duration::from_millis(300)));
        assert!(state.pending_search_delay(start + Duration::from_millis(300)).is_some());
        assert!(state.poll(start + Duration::from_millis(400)));
        assert_eq!(visible_cities(&state), vec!["London"]);
        assert!(!state.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_filter_change_applies_pending_search() {
        let mut state = sample_state();
        let now = Instant::now();
        state
            .dispatch(DashboardEvent::SearchChanged("lon".to_string()), now)
            .unwrap();
        state
            .dispatch(
                DashboardEvent::FilterChanged(FilterChange::PvoutMax(10.0)),
                now,
            )
            .unwrap();
        assert_eq!(visible_cities(&state), vec!["London", "Londonderry"]);
        assert!(state.pending_search_delay(now).is_none());
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut state = sample_state();
        let now = Instant::now();
        state
            .dispatch(
                DashboardEvent::FilterChanged(FilterChange::PvoutMax(3.0)),
                now,
            )
            .unwrap();
        state
            .dispatch(DashboardEvent::SearchChanged("par".to_string()), now)
            .unwrap();
        state
            .dispatch(DashboardEvent::FilterChanged(FilterChange::Clear), now)
            .unwrap();

        assert_eq!(state.criteria, Criteria::default());
        assert!(state.search_input.is_empty());
        assert_eq!(state.visible_indices.len(), 4);
    }

    #[test]
    fn test_sort_toggle_and_resort_after_filter() {
        let mut state = sample_state();
        let now = Instant::now();

        state
            .dispatch(DashboardEvent::SortRequested(RecordField::Pvout), now)
            .unwrap();
        assert_eq!(
            visible_cities(&state),
            vec!["Leeds", "London", "Paris", "Lyon", "Londonderry"]
        );

        let outcome = state
            .dispatch(DashboardEvent::SortRequested(RecordField::Pvout), now)
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Resorted);
        assert_eq!(
            visible_cities(&state),
            vec!["Londonderry", "Lyon", "Paris", "London", "Leeds"]
        );
        assert_eq!(
            state.sort.map(|s| s.direction),
            Some(SortDirection::Descending)
        );

        state
            .dispatch(
                DashboardEvent::FilterChanged(FilterChange::PvoutMax(10.0)),
                now,
            )
            .unwrap();
        assert_eq!(
            visible_cities(&state),
            vec!["Londonderry", "Lyon", "Paris", "London", "Leeds"]
        );
    }

    #[test]
    fn test_export_visible_rows() {
        let mut state = sample_state();
        let now = Instant::now();
        state
            .dispatch(
                DashboardEvent::FilterChanged(FilterChange::SolarClass {
                    class: SolarClass::Low,
                    enabled: false,
                }),
                now,
            )
            .unwrap();

        let DispatchOutcome::Exported(csv) =
            state.dispatch(DashboardEvent::ExportRequested, now).unwrap()
        else {
            panic!("expected export");
        };
        assert_eq!(csv.lines().count(), 1 + state.visible_indices.len());
        assert!(csv.contains("\"Paris\""));
        assert!(!csv.contains("\"Leeds\""));
    }

    #[test]
    fn test_events_without_dataset_are_ignored() {
        let mut state = AppState::default();
        let now = Instant::now();
        assert_eq!(
            state
                .dispatch(DashboardEvent::SortRequested(RecordField::City), now)
                .unwrap(),
            DispatchOutcome::Ignored
        );
        assert_eq!(
            state.dispatch(DashboardEvent::ExportRequested, now).unwrap(),
            DispatchOutcome::Ignored
        );
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn test_failed_load_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.load(&dir.path().join("missing.json"));

        assert!(state.dataset.as_ref().is_some_and(|ds| ds.is_empty()));
        assert!(state.failure_notice.is_some());
        assert_eq!(state.statistics, Statistics::default());

        let outcome = state
            .dispatch(DashboardEvent::SortRequested(RecordField::Pvout), Instant::now())
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(state.sort, None);
    }

    #[test]
    fn test_empty_file_shows_notice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"[]")
            .unwrap();

        let mut state = AppState::default();
        state.load(&path);
        assert!(state.failure_notice.is_some());
    }

    #[test]
    fn test_reset_view_recentres_on_default_centre() {
        // Reset ignores where the markers are.
        let mut state = state_with(vec![record("Seville", SolarClass::High, 5.0)]);
        assert_eq!(state.view_request.take(), Some(ViewRequest::Reset));

        let (min, max) = ViewRequest::Reset.bounds();
        assert!((min[0] - (-0.1419 - 0.25)).abs() < 1e-9);
        assert!((max[1] - (51.5014 + 0.25)).abs() < 1e-9);

        let (min, max) = ViewRequest::Focus {
            latitude: 37.39,
            longitude: -5.98,
        }
        .bounds();
        assert!((max[0] - min[0] - 0.1).abs() < 1e-9);
        assert!((min[1] - 37.34).abs() < 1e-9);
    }

    #[test]
    fn test_selection_cleared_when_filtered_out() {
        let mut state = sample_state();
        state.selected = Some(1);
        assert_eq!(state.selected_record().map(|r| r.city.as_str()), Some("Paris"));

        state
            .dispatch(
                DashboardEvent::FilterChanged(FilterChange::PvoutMax(4.0)),
                Instant::now(),
            )
            .unwrap();
        assert_eq!(state.selected, None);
    }
}
