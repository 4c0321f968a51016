// src/export/pdf_export.rs

use crate::export::model::{PresentedRow, get_headers};
use crate::export::pdf::{REPORT_COL_WIDTHS, ReportRow, ReportWriter};

/// Render the rows into a landscape PDF report held in memory.
pub(crate) fn render_pdf(rows: &[PresentedRow], title: &str) -> Vec<u8> {
    let headers = get_headers();
    let header_row = ReportRow::header(&headers, &REPORT_COL_WIDTHS);
    let body: Vec<ReportRow> = rows
        .iter()
        .map(|r| ReportRow::data(r, &REPORT_COL_WIDTHS))
        .collect();

    let mut writer = ReportWriter::new(&REPORT_COL_WIDTHS);
    writer.write_report(title, &header_row, &body);
    writer.finish()
}
