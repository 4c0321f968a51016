//! Record store: every read and write on the `items` table goes through here.

use crate::errors::{AppError, AppResult};
use crate::models::record::{ChecklistRecord, NewRecord, RecordPatch};
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_ITEMS: &str = "SELECT id, title, area, assigned_to, date, finding, passed, recommendation
     FROM items";

/// Text columns offered as exact-match filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Title,
    Area,
    AssignedTo,
}

impl FilterColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            FilterColumn::Title => "title",
            FilterColumn::Area => "area",
            FilterColumn::AssignedTo => "assigned_to",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterColumn::Title => "Title",
            FilterColumn::Area => "Area",
            FilterColumn::AssignedTo => "Assigned To",
        }
    }
}

/// Mapping DB → ChecklistRecord (reused by every query).
///
/// Text columns are read as nullable so rows written by older releases,
/// which had no NOT NULL constraints, still load.
pub fn map_row(row: &Row) -> Result<ChecklistRecord> {
    Ok(ChecklistRecord {
        id: row.get("id")?,
        title: row.get::<_, Option<String>>("title")?.unwrap_or_default(),
        area: row.get::<_, Option<String>>("area")?.unwrap_or_default(),
        assigned_to: row
            .get::<_, Option<String>>("assigned_to")?
            .unwrap_or_default(),
        date: row.get::<_, Option<String>>("date")?.unwrap_or_default(),
        finding: row.get("finding")?,
        passed: row.get::<_, Option<i64>>("passed")?.unwrap_or(0) == 1,
        recommendation: row.get("recommendation")?,
    })
}

/// All records in insertion (id) order.
pub fn list_records(conn: &Connection) -> AppResult<Vec<ChecklistRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ITEMS} ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_record(conn: &Connection, id: i64) -> AppResult<Option<ChecklistRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ITEMS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Insert a record and return the id assigned by SQLite.
pub fn insert_record(conn: &Connection, rec: &NewRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO items (title, area, assigned_to, date, finding, passed, recommendation)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.title,
            rec.area,
            rec.assigned_to,
            rec.date,
            rec.finding,
            if rec.passed { 1 } else { 0 },
            rec.recommendation,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Write the `Some` fields of `patch` into record `id` with a single statement.
pub fn update_record(conn: &Connection, id: i64, patch: &RecordPatch) -> AppResult<()> {
    let passed = patch.passed.map(|p| if p { 1 } else { 0 });

    let fields: [(&str, Option<&dyn ToSql>); 7] = [
        ("title", patch.title.as_ref().map(|v| v as &dyn ToSql)),
        ("area", patch.area.as_ref().map(|v| v as &dyn ToSql)),
        (
            "assigned_to",
            patch.assigned_to.as_ref().map(|v| v as &dyn ToSql),
        ),
        ("date", patch.date.as_ref().map(|v| v as &dyn ToSql)),
        ("finding", patch.finding.as_ref().map(|v| v as &dyn ToSql)),
        ("passed", passed.as_ref().map(|v| v as &dyn ToSql)),
        (
            "recommendation",
            patch.recommendation.as_ref().map(|v| v as &dyn ToSql),
        ),
    ];

    let mut assignments = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();
    for (column, value) in fields {
        if let Some(v) = value {
            values.push(v);
            assignments.push(format!("{column} = ?{}", values.len()));
        }
    }

    if assignments.is_empty() {
        return match get_record(conn, id)? {
            Some(_) => Ok(()),
            None => Err(AppError::RecordNotFound(id)),
        };
    }

    values.push(&id);
    let sql = format!(
        "UPDATE items SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len()
    );

    let changed = conn.execute(&sql, values.as_slice())?;
    if changed == 0 {
        return Err(AppError::RecordNotFound(id));
    }
    Ok(())
}

pub fn delete_record(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM items WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::RecordNotFound(id));
    }
    Ok(())
}

/// Case-insensitive substring search over every text column.
///
/// The keyword is matched literally: `%`, `_` and `\` are escaped.
/// SQLite `LIKE` folds case for ASCII letters only, so a non-ASCII keyword
/// such as `Ö` is matched case-sensitively.
pub fn search_records(conn: &Connection, keyword: &str) -> AppResult<Vec<ChecklistRecord>> {
    let pattern = format!("%{}%", escape_like(keyword));

    let mut stmt = conn.prepare(&format!(
        "{SELECT_ITEMS}
         WHERE title LIKE ?1 ESCAPE '\\'
            OR area LIKE ?1 ESCAPE '\\'
            OR assigned_to LIKE ?1 ESCAPE '\\'
            OR date LIKE ?1 ESCAPE '\\'
            OR finding LIKE ?1 ESCAPE '\\'
            OR recommendation LIKE ?1 ESCAPE '\\'
         ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map([pattern], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Sorted distinct values of a filter column (empty strings excluded).
pub fn distinct_values(conn: &Connection, column: FilterColumn) -> AppResult<Vec<String>> {
    let col = column.column_name();
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT {col} FROM items
         WHERE {col} IS NOT NULL AND {col} <> ''
         ORDER BY {col} ASC"
    ))?;

    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// (total records, passed records)
pub fn count_records(conn: &Connection) -> AppResult<(i64, i64)> {
    Ok(conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(passed = 1), 0) FROM items",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?)
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    fn rec(title: &str, finding: Option<&str>) -> NewRecord {
        NewRecord {
            title: title.into(),
            area: "Gudang".into(),
            assigned_to: "Budi".into(),
            date: "2024-01-15".into(),
            finding: finding.map(str::to_string),
            passed: false,
            recommendation: None,
        }
    }

    #[test]
    fn escape_like_makes_wildcards_literal() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }

    #[test]
    fn search_treats_percent_literally() {
        let conn = store();
        insert_record(&conn, &rec("Diskon 50%", None)).unwrap();
        insert_record(&conn, &rec("Diskon 500", None)).unwrap();

        let hits = search_records(&conn, "50%").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Diskon 50%");
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        let conn = store();
        let id = insert_record(&conn, &rec("APAR", Some("Tekanan rendah"))).unwrap();

        let patch = RecordPatch {
            passed: Some(true),
            recommendation: Some("Isi ulang".into()),
            ..Default::default()
        };
        update_record(&conn, id, &patch).unwrap();

        let stored = get_record(&conn, id).unwrap().unwrap();
        assert!(stored.passed);
        assert_eq!(stored.recommendation.as_deref(), Some("Isi ulang"));
        assert_eq!(stored.finding.as_deref(), Some("Tekanan rendah"));
        assert_eq!(stored.title, "APAR");
    }

    #[test]
    fn update_and_delete_unknown_id_fail() {
        let conn = store();
        let patch = RecordPatch {
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(matches!(
            update_record(&conn, 42, &patch),
            Err(AppError::RecordNotFound(42))
        ));
        assert!(matches!(
            update_record(&conn, 42, &RecordPatch::default()),
            Err(AppError::RecordNotFound(42))
        ));
        assert!(matches!(
            delete_record(&conn, 42),
            Err(AppError::RecordNotFound(42))
        ));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let conn = store();
        let first = insert_record(&conn, &rec("a", None)).unwrap();
        let second = insert_record(&conn, &rec("b", None)).unwrap();
        delete_record(&conn, second).unwrap();
        let third = insert_record(&conn, &rec("c", None)).unwrap();
        assert!(third > second && second > first);
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let conn = store();
        for t in ["Tangga", "APAR", "Tangga", ""] {
            insert_record(&conn, &rec(t, None)).unwrap();
        }
        assert_eq!(
            distinct_values(&conn, FilterColumn::Title).unwrap(),
            vec!["APAR", "Tangga"]
        );
    }

    #[test]
    fn counts_passed_records() {
        let conn = store();
        let mut ok = rec("a", None);
        ok.passed = true;
        insert_record(&conn, &ok).unwrap();
        insert_record(&conn, &rec("b", None)).unwrap();
        assert_eq!(count_records(&conn).unwrap(), (2, 1));
    }
}
