use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::check::parse_check;
use crate::models::record::NewRecord;
use crate::utils::date;

/// Add a checklist item.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        title,
        area,
        assigned_to,
        date: date_arg,
        finding,
        check,
        recommendation,
    } = cmd
    {
        //
        // 1. Validate arguments before touching the database
        //
        let rec = NewRecord {
            title: title.clone(),
            area: area.clone(),
            assigned_to: assigned_to.clone(),
            date: date::date_or_today(date_arg.as_deref())?,
            finding: finding.clone(),
            passed: parse_check(check)?,
            recommendation: recommendation.clone(),
        };

        //
        // 2. Open DB and insert
        //
        let mut pool = DbPool::open(&cfg.database)?;
        AddLogic::apply(&mut pool, &rec)?;
    }

    Ok(())
}
