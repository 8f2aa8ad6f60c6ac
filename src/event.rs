//! User interactions that drive the dashboard core, independent of any UI toolkit.

use crate::data::model::{RecordField, SolarClass};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    FilterChanged(FilterChange),
    /// A table header was clicked.
    SortRequested(RecordField),
    /// The search box text changed; applied after the debounce delay.
    SearchChanged(String),
    ExportRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    SolarClass { class: SolarClass, enabled: bool },
    Region(Option<String>),
    DataQuality(Option<String>),
    PvoutMax(f64),
    /// Restore the default criteria and empty the search box.
    Clear,
}

/// What `AppState::dispatch` did with an event.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Refiltered,
    Resorted,
    SearchScheduled,
    /// CSV text of the visible records, in table order.
    Exported(String),
    /// Nothing to act on (e.g. no dataset loaded).
    Ignored,
}
