/// Data layer: core types, loading, filtering, sorting and export.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SolarDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SolarDataset  │  Vec<SolarRecord>, distinct regions/qualities
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply Criteria → filtered indices
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌────────┐     ┌────────┐     ┌────────┐
///   │  sort  │     │ stats  │     │ export │
///   └────────┘     └────────┘     └────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod stats;
