// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::PresentedRow;

/// JSON pretty-printed array of rows, keys are the display labels.
pub(crate) fn render_json(rows: &[PresentedRow]) -> AppResult<Vec<u8>> {
    serde_json::to_vec_pretty(rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}

/// CSV with a header row (from serde field names).
pub(crate) fn render_csv(rows: &[PresentedRow]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}
