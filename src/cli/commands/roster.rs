use crate::cli::commands::resolve_org;
use crate::cli::parser::{Commands, RosterAction};
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    ensure_membership, find_or_create_organization, find_or_create_person, get_organization,
    list_members,
};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

/// Maintain and inspect an organization's roster.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Roster { action } = cmd else {
        return Ok(());
    };

    match action {
        RosterAction::Add {
            org,
            person,
            name,
            roles,
            bot,
        } => {
            let org_ext = resolve_org(org, cfg)?;
            let mut pool = DbPool::new(&cfg.database)?;

            let org = find_or_create_organization(&pool.conn, &org_ext, None)?;
            let member = find_or_create_person(&pool.conn, person, name.as_deref(), *bot)?;
            ensure_membership(&pool.conn, org.id, member.id, roles)?;

            audit(
                &pool.conn,
                "roster",
                &format!("{}/{}", org.external_id, member.external_id),
                "Registered in roster",
            )?;

            success(format!("{} registered in {}.", member.name, org.name));
        }
        RosterAction::List { org, role } => {
            let org_ext = resolve_org(org, cfg)?;
            let mut pool = DbPool::new(&cfg.database)?;

            let org = get_organization(&pool.conn, &org_ext)?
                .ok_or_else(|| AppError::UnknownOrganization(org_ext.clone()))?;

            let members = list_members(&pool.conn, org.id, role.as_deref())?;

            if members.is_empty() {
                info(format!("Roster of {} is empty.", org.name));
                return Ok(());
            }

            println!("👥 Roster of {}:\n", org.name);

            let mut table = Table::new(vec![
                "Name".to_string(),
                "External ID".to_string(),
                "Roles".to_string(),
            ]);
            for m in &members {
                table.add_row(vec![
                    m.name.clone(),
                    m.external_id.clone(),
                    m.roles.join(", "),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
