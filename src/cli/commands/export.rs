use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::RecordFilter;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filters,
        search,
        force,
    } = cmd
    {
        let req = ExportRequest {
            format: format.clone(),
            file: file.clone(),
            filter: RecordFilter::from(filters),
            search: search.clone(),
            force: *force,
        };

        let pool = DbPool::open(&cfg.database)?;
        ExportLogic::export(&pool, cfg, &req)?;
    }
    Ok(())
}
