use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_record, get_record};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let rec = get_record(&pool.conn, id)?.ok_or(AppError::RecordNotFound(id))?;

        delete_record(&pool.conn, id)?;

        ttlog_soft(
            &pool.conn,
            "del",
            &format!("id={id}"),
            &format!("Deleted '{}' ({})", rec.title, rec.date),
        );

        info(format!("Deleted item #{id} ({})", rec.title));
        Ok(())
    }
}
