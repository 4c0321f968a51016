use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Marker written to `log` once the legacy column rename has run.
const LEGACY_COLUMNS_VERSION: &str = "20250901_0001_rename_legacy_item_columns";

/// Column renames applied to databases created by the first release
/// (Indonesian column names, camelCase assignee).
const LEGACY_COLUMN_RENAMES: [(&str, &str); 6] = [
    ("judul", "title"),
    ("assignedTo", "assigned_to"),
    ("tanggal", "date"),
    ("keterangan", "finding"),
    ("ok", "passed"),
    ("rekomendasi", "recommendation"),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_columns(conn: &Connection, name: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{name}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// Create the `items` table with the current schema.
fn create_items_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            title           TEXT NOT NULL DEFAULT '',
            area            TEXT NOT NULL DEFAULT '',
            assigned_to     TEXT NOT NULL DEFAULT '',
            date            TEXT NOT NULL DEFAULT '',
            finding         TEXT,
            passed          INTEGER NOT NULL DEFAULT 0 CHECK(passed IN (0, 1)),
            recommendation  TEXT
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Rename the legacy columns of `items` in place.
fn migrate_legacy_columns(conn: &Connection, columns: &[String]) -> AppResult<()> {
    if migration_applied(conn, LEGACY_COLUMNS_VERSION)? {
        return Ok(());
    }

    warning("Legacy checklist table detected, creating safety backup before migration...");

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if db_path.is_empty() {
        warning("Could not determine DB path, backup skipped.");
    } else {
        backup_before_migration(&db_path)?;
    }

    let mut sql = String::from("BEGIN;\n");
    for (old, new) in LEGACY_COLUMN_RENAMES {
        if columns.iter().any(|c| c == old) {
            sql.push_str(&format!(
                "ALTER TABLE items RENAME COLUMN \"{old}\" TO \"{new}\";\n"
            ));
        }
    }
    sql.push_str("COMMIT;");

    conn.execute_batch(&sql)
        .map_err(|e| AppError::Migration(format!("Failed to rename legacy columns: {e}")))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Renamed legacy item columns')",
        [LEGACY_COLUMNS_VERSION],
    )?;

    success(format!(
        "Migration applied: {} → legacy columns renamed",
        LEGACY_COLUMNS_VERSION
    ));

    Ok(())
}

/// Zip the database file next to itself before touching a legacy schema.
fn backup_before_migration(db_path: &str) -> AppResult<()> {
    let backup_name = format!(
        "{}-backup_db_pre_rename.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = Path::new(db_path)
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&backup_name);

    let file = File::create(&backup_path).map_err(|e| backup_err("create", e))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| backup_err("start_file", e))?;

    let db_content = fs::read(db_path).map_err(|e| backup_err("read", e))?;
    zip.write_all(&db_content)
        .map_err(|e| backup_err("write_all", e))?;
    zip.finish().map_err(|e| backup_err("finish", e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

fn backup_err(stage: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Migration(format!("Backup failed ({stage}): {e}"))
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "items")? {
        create_items_table(conn)?;
        return Ok(());
    }

    let columns = table_columns(conn, "items")?;
    if columns
        .iter()
        .any(|c| LEGACY_COLUMN_RENAMES.iter().any(|(old, _)| c == old))
    {
        migrate_legacy_columns(conn, &columns)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_schema_on_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        let cols = table_columns(&conn, "items").unwrap();
        assert_eq!(
            cols,
            vec![
                "id",
                "title",
                "area",
                "assigned_to",
                "date",
                "finding",
                "passed",
                "recommendation"
            ]
        );
        assert!(table_exists(&conn, "log").unwrap());
    }

    #[test]
    fn renames_legacy_columns_and_keeps_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                judul TEXT, area TEXT, assignedTo TEXT, tanggal TEXT,
                keterangan TEXT, ok INTEGER, rekomendasi TEXT
            );
            INSERT INTO items (judul, area, assignedTo, tanggal, keterangan, ok, rekomendasi)
            VALUES ('APAR', 'Gudang', 'Budi', '2024-01-05', 'Wajib pakai helm', 1, NULL);
            "#,
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();
        // second run is a no-op
        run_pending_migrations(&conn).unwrap();

        let (title, finding, passed): (String, String, i64) = conn
            .query_row("SELECT title, finding, passed FROM items", [], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?))
            })
            .unwrap();
        assert_eq!(title, "APAR");
        assert_eq!(finding, "Wajib pakai helm");
        assert_eq!(passed, 1);
        assert!(migration_applied(&conn, LEGACY_COLUMNS_VERSION).unwrap());
    }
}
