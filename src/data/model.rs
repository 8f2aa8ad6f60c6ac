use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SolarClass – categorical irradiance bucket
// ---------------------------------------------------------------------------

/// Irradiance bucket assigned to each location by the data provider.
/// Any label other than High/Medium/Low is read as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SolarClass {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl SolarClass {
    pub const ALL: [SolarClass; 4] = [
        SolarClass::High,
        SolarClass::Medium,
        SolarClass::Low,
        SolarClass::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SolarClass::High => "High",
            SolarClass::Medium => "Medium",
            SolarClass::Low => "Low",
            SolarClass::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SolarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SolarRecord – one location
// ---------------------------------------------------------------------------

/// A single geotagged location with its daily irradiance figures.
///
/// Field names follow the JSON data file. The aliases are the export
/// headers, so a CSV written by [`crate::data::export`] loads back into the
/// same struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarRecord {
    #[serde(alias = "City")]
    pub city: String,
    #[serde(alias = "Region")]
    pub region: String,
    #[serde(alias = "Latitude")]
    pub latitude: f64,
    #[serde(alias = "Longitude")]
    pub longitude: f64,
    /// kWh/m²/day
    #[serde(alias = "PVOUT (kWh/m²/day)")]
    pub pvout_daily: f64,
    #[serde(alias = "GHI (kWh/m²/day)")]
    pub ghi_daily: f64,
    #[serde(alias = "DNI (kWh/m²/day)")]
    pub dni_daily: f64,
    #[serde(alias = "DHI (kWh/m²/day)")]
    pub dhi_daily: f64,
    /// Metres above sea level.
    #[serde(alias = "Elevation (m)")]
    pub elevation: f64,
    /// °C
    #[serde(alias = "Air Temperature (°C)")]
    pub air_temperature: f64,
    /// Hours per day.
    #[serde(alias = "Sunshine Hours")]
    pub sunshine_hours: f64,
    #[serde(alias = "Solar Class")]
    pub solar_class: SolarClass,
    #[serde(alias = "Data Quality")]
    pub data_quality: String,
}

impl SolarRecord {
    /// Check the position and PVOUT are usable for plotting and filtering.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "{}: latitude {} outside [-90, 90]",
                self.city, self.latitude
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "{}: longitude {} outside [-180, 180]",
                self.city, self.longitude
            ));
        }
        if !self.pvout_daily.is_finite() {
            return Err(format!("{}: PVOUT is not a finite number", self.city));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordField – addressable columns for sorting, tables and export
// ---------------------------------------------------------------------------

/// A borrowed cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    City,
    Region,
    Pvout,
    Ghi,
    Dni,
    Dhi,
    SolarClass,
    DataQuality,
    Latitude,
    Longitude,
    Elevation,
    AirTemperature,
    SunshineHours,
}

impl RecordField {
    /// All fields, in CSV export column order.
    pub const ALL: [RecordField; 13] = [
        RecordField::City,
        RecordField::Region,
        RecordField::Pvout,
        RecordField::Ghi,
        RecordField::Dni,
        RecordField::Dhi,
        RecordField::SolarClass,
        RecordField::DataQuality,
        RecordField::Latitude,
        RecordField::Longitude,
        RecordField::Elevation,
        RecordField::AirTemperature,
        RecordField::SunshineHours,
    ];

    /// Key used in the JSON data file.
    pub fn key(&self) -> &'static str {
        match self {
            RecordField::City => "city",
            RecordField::Region => "region",
            RecordField::Pvout => "pvout_daily",
            RecordField::Ghi => "ghi_daily",
            RecordField::Dni => "dni_daily",
            RecordField::Dhi => "dhi_daily",
            RecordField::SolarClass => "solar_class",
            RecordField::DataQuality => "data_quality",
            RecordField::Latitude => "latitude",
            RecordField::Longitude => "longitude",
            RecordField::Elevation => "elevation",
            RecordField::AirTemperature => "air_temperature",
            RecordField::SunshineHours => "sunshine_hours",
        }
    }

    /// Column header used in CSV exports.
    pub fn label(&self) -> &'static str {
        match self {
            RecordField::City => "City",
            RecordField::Region => "Region",
            RecordField::Pvout => "PVOUT (kWh/m²/day)",
            RecordField::Ghi => "GHI (kWh/m²/day)",
            RecordField::Dni => "DNI (kWh/m²/day)",
            RecordField::Dhi => "DHI (kWh/m²/day)",
            RecordField::SolarClass => "Solar Class",
            RecordField::DataQuality => "Data Quality",
            RecordField::Latitude => "Latitude",
            RecordField::Longitude => "Longitude",
            RecordField::Elevation => "Elevation (m)",
            RecordField::AirTemperature => "Air Temperature (°C)",
            RecordField::SunshineHours => "Sunshine Hours",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            RecordField::City
                | RecordField::Region
                | RecordField::SolarClass
                | RecordField::DataQuality
        )
    }

    pub fn value<'a>(&self, record: &'a SolarRecord) -> FieldValue<'a> {
        match self {
            RecordField::City => FieldValue::Text(&record.city),
            RecordField::Region => FieldValue::Text(&record.region),
            RecordField::Pvout => FieldValue::Number(record.pvout_daily),
            RecordField::Ghi => FieldValue::Number(record.ghi_daily),
            RecordField::Dni => FieldValue::Number(record.dni_daily),
            RecordField::Dhi => FieldValue::Number(record.dhi_daily),
            RecordField::SolarClass => FieldValue::Text(record.solar_class.as_str()),
            RecordField::DataQuality => FieldValue::Text(&record.data_quality),
            RecordField::Latitude => FieldValue::Number(record.latitude),
            RecordField::Longitude => FieldValue::Number(record.longitude),
            RecordField::Elevation => FieldValue::Number(record.elevation),
            RecordField::AirTemperature => FieldValue::Number(record.air_temperature),
            RecordField::SunshineHours => FieldValue::Number(record.sunshine_hours),
        }
    }
}

// ---------------------------------------------------------------------------
// SolarDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded dataset with the distinct values used by the dropdowns.
#[derive(Debug, Clone, Default)]
pub struct SolarDataset {
    /// All records, in file order. Never mutated after load.
    records: Vec<SolarRecord>,
    /// Sorted distinct regions.
    pub regions: BTreeSet<String>,
    /// Sorted distinct data-quality labels.
    pub qualities: BTreeSet<String>,
}

impl SolarDataset {
    pub fn from_records(records: Vec<SolarRecord>) -> Self {
        let regions = records.iter().map(|r| r.region.clone()).collect();
        let qualities = records.iter().map(|r| r.data_quality.clone()).collect();
        SolarDataset {
            records,
            regions,
            qualities,
        }
    }

    pub fn records(&self) -> &[SolarRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SolarRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
