// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{Column, PresentedRow, get_headers, row_to_values};
use crate::export::style::{HEADER_RGB, HEADER_TEXT_RGB, RowBand};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};

/// Width used for any column missing from [`SHEET_COLUMN_WIDTHS`].
pub(crate) const DEFAULT_COLUMN_WIDTH: f64 = 20.0;

/// Fixed sheet column widths, keyed by header label.
const SHEET_COLUMN_WIDTHS: [(&str, f64); 8] = [
    ("No", 5.0),
    ("Title", 30.0),
    ("Area", 25.0),
    ("Assigned To", 20.0),
    ("Date", 15.0),
    ("Finding", 50.0),
    ("Check", 10.0),
    ("Recommendation", 50.0),
];

pub(crate) fn column_width(label: &str) -> f64 {
    SHEET_COLUMN_WIDTHS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_COLUMN_WIDTH)
}

/// How a data row lands in the sheet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SheetRow {
    pub no: usize,
    pub values: Vec<String>,
    pub band: RowBand,
    pub height: f64,
}

/// 1 + the largest number of embedded line breaks in the long-text cells.
pub(crate) fn line_factor(row: &PresentedRow) -> usize {
    let breaks = row
        .finding
        .matches('\n')
        .count()
        .max(row.recommendation.matches('\n').count());
    1 + breaks
}

pub(crate) fn layout_rows(rows: &[PresentedRow], base_row_height: f64) -> Vec<SheetRow> {
    rows.iter()
        .map(|r| SheetRow {
            no: r.no,
            values: row_to_values(r),
            band: RowBand::for_check(r.check),
            height: base_row_height * line_factor(r) as f64,
        })
        .collect()
}

/// Data cell format: band fill and thin border everywhere, alignment by column.
fn cell_format(column: Column, band: RowBand) -> Format {
    let base = Format::new()
        .set_background_color(Color::RGB(band.rgb()))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::Black);

    if column.is_long_text() {
        base.set_text_wrap().set_align(FormatAlign::Top)
    } else if column == Column::Check {
        base.set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
    } else {
        base.set_align(FormatAlign::Top)
    }
}

/// Render the rows into an XLSX workbook held in memory.
pub(crate) fn render_xlsx(
    rows: &[PresentedRow],
    sheet_name: &str,
    base_row_height: f64,
) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(HEADER_TEXT_RGB))
        .set_background_color(Color::RGB(HEADER_RGB))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
        worksheet
            .set_column_width(col as u16, column_width(header))
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    // ---------------------------
    // Data rows
    // ---------------------------
    for (row_index, sheet_row) in layout_rows(rows, base_row_height).iter().enumerate() {
        let row = (row_index + 1) as u32;
        write_sheet_row(worksheet, row, sheet_row)?;
    }

    workbook.save_to_buffer().map_err(to_export_error)
}

fn write_sheet_row(worksheet: &mut Worksheet, row: u32, sheet_row: &SheetRow) -> AppResult<()> {
    for (col, column) in Column::ALL.iter().enumerate() {
        let fmt = cell_format(*column, sheet_row.band);
        let value = sheet_row.values[col].as_str();

        match column {
            Column::No => {
                worksheet
                    .write_number_with_format(row, col as u16, sheet_row.no as f64, &fmt)
                    .map_err(to_export_error)?;
            }
            _ => {
                worksheet
                    .write_string_with_format(row, col as u16, value, &fmt)
                    .map_err(to_export_error)?;
            }
        }
    }

    worksheet
        .set_row_height(row, sheet_row.height)
        .map_err(to_export_error)?;

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX generation failed: {e}"))
}
