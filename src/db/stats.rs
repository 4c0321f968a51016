use crate::db::pool::DbPool;
use crate::db::queries::count_records;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) RECORD COUNTS
    //
    let (total, passed) = count_records(&pool.conn)?;
    println!("{}• Total items:{} {}", CYAN, RESET, total);
    println!("{}• Passed (✓):{} {}{}{}", CYAN, RESET, GREEN, passed, RESET);
    println!(
        "{}• Not passed (✗):{} {}{}{}",
        CYAN,
        RESET,
        RED,
        total - passed,
        RESET
    );

    //
    // 3) DATE RANGE (raw text ordering, dates are stored as YYYY-MM-DD)
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM items WHERE date <> '' ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM items WHERE date <> '' ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
