use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use super::model::{FieldValue, RecordField, SolarRecord};
use crate::error::{DataError, Result};

/// Render `records` as CSV: an unquoted header row with the 13 export
/// columns, then one row per record. Text cells are quoted, numbers are not.
pub fn export_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a SolarRecord>,
{
    let mut header = WriterBuilder::new().from_writer(Vec::new());
    header.write_record(RecordField::ALL.iter().map(|f| f.label()))?;
    let buf = header.into_inner().map_err(|e| DataError::Io(e.into_error()))?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(buf);

    let mut rows = 0usize;
    for rec in records {
        writer.write_record(RecordField::ALL.iter().map(|f| cell(f.value(rec))))?;
        rows += 1;
    }

    let bytes = writer.into_inner().map_err(|e| DataError::Io(e.into_error()))?;
    log::debug!("Exported {rows} records as CSV");
    Ok(String::from_utf8(bytes)?)
}

/// Write the CSV export of `records` to `path`.
pub fn write_csv<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a SolarRecord>,
{
    let text = export_csv(records)?;
    std::fs::write(path, text)?;
    log::info!("CSV export written to {}", path.display());
    Ok(())
}

fn cell(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Number(v) => v.to_string(),
        FieldValue::Text(s) => s.to_string(),
    }
}
