use std::cmp::Ordering;

use super::model::{FieldValue, RecordField, SolarDataset, SolarRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the active table header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The column the table is currently ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: RecordField,
    pub direction: SortDirection,
}

impl SortState {
    /// Next sort state after the user picks `field`: the same field flips
    /// direction, a new field starts ascending.
    pub fn toggle(current: Option<SortState>, field: RecordField) -> SortState {
        match current {
            Some(state) if state.field == field => SortState {
                field,
                direction: state.direction.reversed(),
            },
            _ => SortState {
                field,
                direction: SortDirection::Ascending,
            },
        }
    }
}

/// Ascending comparison of two records on `field`. Numbers compare
/// numerically, text compares case-insensitively.
pub fn compare_records(a: &SolarRecord, b: &SolarRecord, field: RecordField) -> Ordering {
    match (field.value(a), field.value(b)) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(&y),
        (x, y) => x.to_string().to_lowercase().cmp(&y.to_string().to_lowercase()),
    }
}

/// Reorder `indices` (into `dataset`) in place. Stable: ties keep their
/// current relative order in either direction.
pub fn sort_indices(dataset: &SolarDataset, indices: &mut [usize], state: SortState) {
    let records = dataset.records();
    indices.sort_by(|&a, &b| {
        let ord = compare_records(&records[a], &records[b], state.field);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
