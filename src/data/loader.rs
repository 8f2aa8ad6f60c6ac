use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::model::{SolarDataset, SolarRecord};
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a solar dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "city": ..., "pvout_daily": ..., ... }, ...]`
/// * `.csv`  – the layout written by the CSV export
pub fn load_file(path: &Path) -> Result<SolarDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    validate(&records)?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(SolarDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (an array of flat record objects):
///
/// ```json
/// [
///   {
///     "city": "Westminster", "region": "Greater London",
///     "latitude": 51.4975, "longitude": -0.1357,
///     "pvout_daily": 2.65, "ghi_daily": 2.87, "dni_daily": 2.41, "dhi_daily": 1.52,
///     "elevation": 15, "air_temperature": 11.3, "sunshine_hours": 4.2,
///     "solar_class": "Low", "data_quality": "High"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<SolarRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: the header row written by the export, one record per row.
/// Header names are matched through the serde aliases on [`SolarRecord`].
fn load_csv(path: &Path) -> Result<Vec<SolarRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<SolarRecord>, _>>()?;
    Ok(records)
}

fn validate(records: &[SolarRecord]) -> Result<()> {
    for (index, rec) in records.iter().enumerate() {
        rec.validate()
            .map_err(|message| DataError::InvalidRecord { index, message })?;
    }
    Ok(())
}
