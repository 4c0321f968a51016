use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::db::queries::search_records;
use crate::errors::AppResult;
use crate::ui::messages::header;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search { keyword, details } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let records = search_records(&pool.conn, keyword)?;

        header(format!("Search results for '{keyword}'"));
        ListLogic::print(&records, *details);
    }
    Ok(())
}
