use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Validate an optional `--date` argument and return it in storage form.
/// Missing dates default to today.
pub fn date_or_today(s: Option<&str>) -> AppResult<String> {
    match s {
        None => Ok(today().format("%Y-%m-%d").to_string()),
        Some(raw) => parse_date(raw.trim())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .ok_or_else(|| AppError::InvalidDate(raw.to_string())),
    }
}
