use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Database administration: migrations, integrity check, summary info.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Migrations up to date.");
        }

        if *check {
            let status: String =
                pool.conn
                    .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
            if status == "ok" {
                success("Database integrity: ok");
            } else {
                warning(format!("Database integrity: {status}"));
                return Err(AppError::Migration(status));
            }
        }

        if *info {
            let count = |sql: &str| -> AppResult<i64> {
                Ok(pool.conn.query_row(sql, [], |row| row.get(0))?)
            };

            println!("🗄️  Database: {}", cfg.database);
            println!("   organizations: {}", count("SELECT COUNT(*) FROM organizations")?);
            println!("   people:        {}", count("SELECT COUNT(*) FROM people")?);
            println!("   memberships:   {}", count("SELECT COUNT(*) FROM memberships")?);
            println!("   attendance:    {}", count("SELECT COUNT(*) FROM attendance")?);
        }
    }

    Ok(())
}
