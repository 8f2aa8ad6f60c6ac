//! Summary aggregates over a record subset.

use super::model::SolarRecord;

/// PVOUT summary for the visible records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub count: usize,
    pub mean_pvout: f64,
    pub max_pvout: f64,
    pub min_pvout: f64,
}

impl Statistics {
    /// Aggregate PVOUT over `records`. An empty input gives all zeros.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SolarRecord>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;

        for rec in records {
            count += 1;
            sum += rec.pvout_daily;
            max = max.max(rec.pvout_daily);
            min = min.min(rec.pvout_daily);
        }

        if count == 0 {
            return Self::default();
        }

        Statistics {
            count,
            mean_pvout: sum / count as f64,
            max_pvout: max,
            min_pvout: min,
        }
    }
}
