use crate::errors::{AppError, AppResult};

/// Parse the `--check` value given on the command line.
///
/// `Y` (ya) marks the item as passed, `T` (tidak) as not passed.
/// A few English spellings are accepted as well.
pub fn parse_check(code: &str) -> AppResult<bool> {
    match code.trim().to_lowercase().as_str() {
        "y" | "yes" | "ok" | "pass" => Ok(true),
        "t" | "n" | "no" | "fail" => Ok(false),
        _ => Err(AppError::InvalidCheck(code.to_string())),
    }
}

/// Inverse of [`parse_check`], used when echoing records back to the user.
pub fn check_code(passed: bool) -> &'static str {
    if passed { "Y" } else { "T" }
}
