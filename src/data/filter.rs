use std::collections::BTreeSet;

use super::model::{SolarClass, SolarDataset, SolarRecord};
use crate::config::DEFAULT_PVOUT_MAX;

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Active filter selections. Every clause must hold for a record to pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    /// Allowed solar classes. An empty set means "no class filter".
    pub solar_classes: BTreeSet<SolarClass>,
    /// Exact region match, if set.
    pub region: Option<String>,
    /// Exact data-quality match, if set.
    pub data_quality: Option<String>,
    /// Inclusive PVOUT upper bound. There is no lower bound.
    pub pvout_max: f64,
    /// Case-insensitive substring of the city name. Empty means no filter.
    pub search_term: String,
}

impl Default for Criteria {
    fn default() -> Self {
        Self::with_pvout_max(DEFAULT_PVOUT_MAX)
    }
}

impl Criteria {
    /// Default criteria (everything allowed) with a custom PVOUT ceiling.
    pub fn with_pvout_max(pvout_max: f64) -> Self {
        Self {
            solar_classes: SolarClass::ALL.into_iter().collect(),
            region: None,
            data_quality: None,
            pvout_max,
            search_term: String::new(),
        }
    }

    /// Set the region filter; an empty string clears it.
    pub fn set_region(&mut self, region: Option<String>) {
        self.region = region.filter(|r| !r.is_empty());
    }

    /// Set the data-quality filter; an empty string clears it.
    pub fn set_data_quality(&mut self, quality: Option<String>) {
        self.data_quality = quality.filter(|q| !q.is_empty());
    }

    pub fn matches(&self, record: &SolarRecord) -> bool {
        if !self.solar_classes.is_empty() && !self.solar_classes.contains(&record.solar_class) {
            return false;
        }
        if let Some(region) = &self.region {
            if record.region != *region {
                return false;
            }
        }
        if let Some(quality) = &self.data_quality {
            if record.data_quality != *quality {
                return false;
            }
        }
        if record.pvout_daily > self.pvout_max {
            return false;
        }
        if !self.search_term.is_empty()
            && !record
                .city
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
        {
            return false;
        }
        true
    }
}

/// Return indices of records that pass `criteria`, in dataset order.
pub fn filtered_indices(dataset: &SolarDataset, criteria: &Criteria) -> Vec<usize> {
    let indices: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect();
    log::debug!(
        "Filter kept {} of {} records ({:?})",
        indices.len(),
        dataset.len(),
        criteria
    );
    indices
}
