use crate::cli::commands::{resolve_org, time_window};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::guard::Guard;
use crate::db::pool::DbPool;
use crate::db::queries::{ensure_membership, find_or_create_organization, find_or_create_person};
use crate::errors::AppResult;
use crate::ui::messages::success;
use chrono::Utc;

/// Log the caller's daily work start time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        org,
        person,
        name,
        org_name,
    } = cmd
    {
        let org_ext = resolve_org(org, cfg)?;
        let tw = time_window(cfg)?;
        let mut pool = DbPool::new(&cfg.database)?;

        // First reference registers the identity rows.
        let org = find_or_create_organization(&pool.conn, &org_ext, org_name.as_deref())?;
        let person = find_or_create_person(&pool.conn, person, name.as_deref(), false)?;
        ensure_membership(&pool.conn, org.id, person.id, &[])?;

        let ev = Guard::check_in(&mut pool, &tw, &org, &person, Utc::now())?;

        success(format!(
            "{} has checked in at {} ({}).",
            person.name,
            tw.local(ev.occurred_at).format("%H:%M"),
            ev.day_str(),
        ));
    }

    Ok(())
}
