use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::insert_record;
use crate::errors::AppResult;
use crate::models::check::check_code;
use crate::models::record::NewRecord;
use crate::ui::messages::success;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Store a new checklist item and return its id.
    pub fn apply(pool: &mut DbPool, rec: &NewRecord) -> AppResult<i64> {
        let id = insert_record(&pool.conn, rec)?;

        ttlog_soft(
            &pool.conn,
            "add",
            &format!("id={id}"),
            &format!(
                "Added '{}' ({}, check={})",
                rec.title,
                rec.date,
                check_code(rec.passed)
            ),
        );

        success(format!("Item #{id} added: {}", rec.title));
        Ok(id)
    }
}
