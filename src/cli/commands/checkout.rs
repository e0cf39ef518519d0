use crate::cli::commands::{resolve_org, time_window};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::guard::Guard;
use crate::db::pool::DbPool;
use crate::db::queries::{ensure_membership, find_or_create_organization, find_or_create_person};
use crate::errors::AppResult;
use crate::ui::messages::success;
use chrono::Utc;

/// Log the caller's daily work end time, with an optional backdated day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkout {
        org,
        person,
        date,
        note,
    } = cmd
    {
        let org_ext = resolve_org(org, cfg)?;
        let tw = time_window(cfg)?;

        // The day the checkout applies to: today unless a token inside the
        // backdate window says otherwise.
        let day = match date {
            Some(token) => tw.validate_backdate_arg(token, tw.today())?,
            None => tw.today(),
        };

        let note = note.join(" ");

        let mut pool = DbPool::new(&cfg.database)?;

        let org = find_or_create_organization(&pool.conn, &org_ext, None)?;
        let person = find_or_create_person(&pool.conn, person, None, false)?;
        ensure_membership(&pool.conn, org.id, person.id, &[])?;

        Guard::check_out(&mut pool, &tw, &org, &person, day, &note, Utc::now())?;

        success(format!(
            "{} has successfully checked out for {}.",
            person.name,
            day.format("%m/%d/%y"),
        ));
    }

    Ok(())
}
