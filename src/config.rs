use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Data file read at startup.
pub const DEFAULT_DATA_FILE: &str = "data/solar_radiance_sample.json";
/// Suggested name for CSV exports.
pub const EXPORT_FILE_NAME: &str = "solar_radiance_data.csv";

/// PVOUT ceiling applied at startup and after "Clear filters" (kWh/m²/day).
pub const DEFAULT_PVOUT_MAX: f64 = 7.0;
/// Upper end of the PVOUT slider.
pub const PVOUT_SLIDER_MAX: f64 = 10.0;

/// Search box debounce.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Initial map centre (Westminster) and the span shown around it, in degrees.
pub const DEFAULT_CENTER: (f64, f64) = (51.5014, -0.1419);
pub const DEFAULT_SPAN_DEG: f64 = 0.25;
/// Span shown by "Zoom here", in degrees.
pub const FOCUS_SPAN_DEG: f64 = 0.05;

#[derive(Parser, Debug)]
#[command(name = "sunmap")]
#[command(about = "Explore geotagged solar irradiance data on a map")]
#[command(version)]
pub struct Cli {
    /// JSON (or exported CSV) file with solar records
    #[arg(default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    #[arg(long, default_value_t = DEFAULT_PVOUT_MAX, help = "Initial PVOUT ceiling (kWh/m²/day)")]
    pub pvout_max: f64,

    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS, help = "Search debounce in milliseconds")]
    pub debounce_ms: u64,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub pvout_max: f64,
    pub debounce: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            pvout_max: DEFAULT_PVOUT_MAX,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl From<&Cli> for DashboardConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            data_path: cli.data.clone(),
            pvout_max: cli.pvout_max.clamp(0.0, PVOUT_SLIDER_MAX),
            debounce: Duration::from_millis(cli.debounce_ms),
        }
    }
}
