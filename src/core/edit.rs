use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{get_record, update_record};
use crate::errors::{AppError, AppResult};
use crate::models::record::{ChecklistRecord, RecordPatch};
use crate::ui::messages::{success, warning};

pub struct EditLogic;

impl EditLogic {
    /// Apply a partial update and return the stored record afterwards.
    pub fn apply(pool: &mut DbPool, id: i64, patch: &RecordPatch) -> AppResult<ChecklistRecord> {
        if patch.is_empty() {
            warning(format!("Nothing to change for item #{id}."));
        } else {
            update_record(&pool.conn, id, patch)?;
        }

        let stored = get_record(&pool.conn, id)?.ok_or(AppError::RecordNotFound(id))?;

        if !patch.is_empty() {
            ttlog_soft(
                &pool.conn,
                "edit",
                &format!("id={id}"),
                &format!("Updated fields: {}", changed_fields(patch).join(", ")),
            );
            success(format!("Item #{id} updated."));
        }

        Ok(stored)
    }
}

fn changed_fields(patch: &RecordPatch) -> Vec<&'static str> {
    let mut out = Vec::new();
    if patch.title.is_some() {
        out.push("title");
    }
    if patch.area.is_some() {
        out.push("area");
    }
    if patch.assigned_to.is_some() {
        out.push("assigned_to");
    }
    if patch.date.is_some() {
        out.push("date");
    }
    if patch.finding.is_some() {
        out.push("finding");
    }
    if patch.passed.is_some() {
        out.push("passed");
    }
    if patch.recommendation.is_some() {
        out.push("recommendation");
    }
    out
}
