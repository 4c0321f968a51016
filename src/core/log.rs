use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use ansi_term::Colour;
use regex::Regex;

/// Maximum visible width of the "operation (target)" column.
const OP_COLUMN_MAX: usize = 60;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "export" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

#[derive(Debug)]
struct LogEntry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

/// Colored "operation (target)", cut to `max` visible characters.
fn op_target_cell(entry: &LogEntry, max: usize) -> String {
    let color = color_for_operation(&entry.operation);

    let visible = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if visible.chars().count() > max {
        let mut s: String = visible.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    // only the operation word is colored
    match visible.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            warning("The internal log is empty.");
            return Ok(());
        }

        let cells: Vec<String> = entries
            .iter()
            .map(|e| op_target_cell(e, OP_COLUMN_MAX))
            .collect();

        let op_w = cells
            .iter()
            .map(|c| strip_ansi(c).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        header("Internal log");

        for (entry, cell) in entries.iter().zip(cells) {
            // padding is computed on the visible text, not the escape codes
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&cell).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                cell,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: "2024-01-01T10:00:00+07:00".into(),
            operation: op.into(),
            target: target.into(),
            message: String::new(),
        }
    }

    #[test]
    fn strips_color_codes() {
        let painted = Colour::Green.paint("add").to_string();
        assert_ne!(painted, "add");
        assert_eq!(strip_ansi(&painted), "add");
    }

    #[test]
    fn long_targets_are_truncated_on_visible_width() {
        let long = "x".repeat(100);
        let cell = op_target_cell(&entry("export", &long), 20);
        let visible = strip_ansi(&cell);
        assert_eq!(visible.chars().count(), 20);
        assert!(visible.starts_with("export ("));
        assert!(visible.ends_with("..."));
    }

    #[test]
    fn empty_target_shows_operation_only() {
        let cell = op_target_cell(&entry("init", ""), 60);
        assert_eq!(strip_ansi(&cell), "init");
    }
}
