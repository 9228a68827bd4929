use std::path::Path;

use super::table::record_fields;
use crate::config::REQUIRED_COLUMNS;
use crate::data::filter::FilteredView;
use crate::error::ExportError;

/// Encode the view as UTF-8 CSV with a header row.
pub fn csv_bytes(view: &FilteredView<'_>) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REQUIRED_COLUMNS)?;
    for rec in view.records() {
        writer.write_record(record_fields(rec))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))
}

/// Write the CSV export to `path`.
pub fn write_csv(path: &Path, view: &FilteredView<'_>) -> Result<(), ExportError> {
    let bytes = csv_bytes(view)?;
    std::fs::write(path, &bytes)?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}
