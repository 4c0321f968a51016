use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::pool::DbPool;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    info("Initializing auditcheck…");

    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    let pool = DbPool::open(&db_path)?;

    ttlog_soft(
        &pool.conn,
        "init",
        &db_path,
        &format!("Database initialized at {}", &db_path),
    );

    success(format!("Database initialized at {}", &db_path));
    Ok(())
}
