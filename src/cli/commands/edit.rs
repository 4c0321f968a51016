use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::check::parse_check;
use crate::models::record::RecordPatch;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        title,
        area,
        assigned_to,
        date: date_arg,
        finding,
        check,
        recommendation,
    } = cmd
    {
        let date = match date_arg {
            Some(d) => Some(date::date_or_today(Some(d))?),
            None => None,
        };
        let passed = match check {
            Some(c) => Some(parse_check(c)?),
            None => None,
        };

        let patch = RecordPatch {
            title: title.clone(),
            area: area.clone(),
            assigned_to: assigned_to.clone(),
            date,
            finding: finding.clone(),
            passed,
            recommendation: recommendation.clone(),
        };

        let mut pool = DbPool::open(&cfg.database)?;
        let stored = EditLogic::apply(&mut pool, *id, &patch)?;
        ListLogic::print(&[stored], true);
    }

    Ok(())
}
