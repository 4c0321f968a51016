// src/export/logic.rs

use crate::config::Config;
use crate::core::filter::RecordFilter;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{list_records, search_records};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{ensure_writable, write_atomic};
use crate::export::json_csv::{render_csv, render_json};
use crate::export::model::{PresentedRow, present};
use crate::export::pdf_export::render_pdf;
use crate::export::xlsx::render_xlsx;
use crate::export::{ExportFormat, notify_export_success};
use crate::ui::messages::{info, warning};
use crate::utils::path::{expand_tilde, is_absolute};
use std::env;
use std::io;
use std::path::PathBuf;

/// Document settings taken from the configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub sheet_name: String,
    pub report_title: String,
    pub base_row_height: f64,
}

impl From<&Config> for RenderOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            sheet_name: cfg.sheet_name.clone(),
            report_title: cfg.report_title.clone(),
            base_row_height: cfg.base_row_height,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// What to export and where.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    pub format: Option<ExportFormat>,
    pub file: Option<String>,
    pub filter: RecordFilter,
    pub search: Option<String>,
    pub force: bool,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Build the document for `rows` entirely in memory.
    pub fn render(
        format: &ExportFormat,
        rows: &[PresentedRow],
        opts: &RenderOptions,
    ) -> AppResult<Vec<u8>> {
        match format {
            ExportFormat::Xlsx => render_xlsx(rows, &opts.sheet_name, opts.base_row_height),
            ExportFormat::Pdf => Ok(render_pdf(rows, &opts.report_title)),
            ExportFormat::Csv => render_csv(rows),
            ExportFormat::Json => render_json(rows),
        }
    }

    /// Load, present, render and write the checklist.
    ///
    /// Returns the written path, or `None` when nothing matched.
    pub fn export(pool: &DbPool, cfg: &Config, req: &ExportRequest) -> AppResult<Option<PathBuf>> {
        let (format, path) = resolve_target(req)?;

        let records = match &req.search {
            Some(keyword) => search_records(&pool.conn, keyword)?,
            None => list_records(&pool.conn)?,
        };
        let records = req.filter.apply(records);

        if records.is_empty() {
            warning("No records found for the selected filters. Nothing exported.");
            return Ok(None);
        }

        ensure_writable(&path, req.force)?;

        info(format!(
            "Exporting {} records to {}: {}",
            records.len(),
            format.as_str().to_uppercase(),
            path.display()
        ));

        let rows = present(&records);
        let bytes = Self::render(&format, &rows, &RenderOptions::from(cfg))?;
        write_atomic(&path, &bytes)?;

        notify_export_success(&format, rows.len(), &path);

        ttlog_soft(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} rows as {}", rows.len(), format.as_str()),
        );

        Ok(Some(path))
    }
}

/// Decide the output format and absolute path.
///
/// - explicit `--file` must be absolute (after `~` expansion); the format
///   falls back to its extension
/// - otherwise `audit_checklist.<ext>` in the current directory
fn resolve_target(req: &ExportRequest) -> AppResult<(ExportFormat, PathBuf)> {
    match &req.file {
        Some(file) => {
            if !is_absolute(file) {
                return Err(AppError::from(io::Error::other(format!(
                    "Output file path must be absolute: {file}"
                ))));
            }
            let path = expand_tilde(file);
            let format = match &req.format {
                Some(f) => f.clone(),
                None => ExportFormat::from_path(&path)?,
            };
            Ok((format, path))
        }
        None => {
            let format = req.format.clone().unwrap_or(ExportFormat::Xlsx);
            let path = env::current_dir()?.join(format.default_file_name());
            Ok((format, path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_file_is_rejected() {
        let req = ExportRequest {
            file: Some("out.xlsx".into()),
            ..Default::default()
        };
        let err = resolve_target(&req).unwrap_err();
        assert!(err.to_string().contains("Output file path must be absolute"));
    }

    #[test]
    fn format_is_inferred_from_extension() {
        let req = ExportRequest {
            file: Some("/tmp/checklist.pdf".into()),
            ..Default::default()
        };
        let (format, path) = resolve_target(&req).unwrap();
        assert_eq!(format, ExportFormat::Pdf);
        assert_eq!(path, PathBuf::from("/tmp/checklist.pdf"));
    }

    #[test]
    fn default_target_is_xlsx_in_current_dir() {
        let (format, path) = resolve_target(&ExportRequest::default()).unwrap();
        assert_eq!(format, ExportFormat::Xlsx);
        assert_eq!(path, env::current_dir().unwrap().join("audit_checklist.xlsx"));
    }
}
