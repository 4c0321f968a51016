use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::RecordFilter;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::db::queries::list_records;
use crate::errors::AppResult;
use crate::ui::messages::header;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        filters,
        details,
        filter_values,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;

        if *filter_values {
            return ListLogic::print_filter_values(&pool);
        }

        let filter = RecordFilter::from(filters);
        let records = filter.apply(list_records(&pool.conn)?);

        header("Audit checklist");
        ListLogic::print(&records, *details);
    }
    Ok(())
}
