use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEvent, EventKind, Member, Organization, Person};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn utc_str(t: &DateTime<Utc>) -> String {
    // Fixed-width RFC3339; lexicographic BETWEEN == chronological BETWEEN.
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn map_attendance_row(row: &Row) -> Result<AttendanceEvent> {
    let occurred_str: String = row.get("occurred_at")?;
    let occurred_at = DateTime::parse_from_rfc3339(&occurred_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(occurred_str.clone())),
            )
        })?;

    let day_str: String = row.get("day")?;
    let day = NaiveDate::parse_from_str(&day_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(day_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid kind: {}", kind_str))),
        )
    })?;

    Ok(AttendanceEvent {
        id: row.get("id")?,
        org_id: row.get("org_id")?,
        person_id: row.get("person_id")?,
        kind,
        occurred_at,
        day,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

/// Append one ledger row. Returns `None` when the per-day uniqueness index
/// rejects the row, i.e. another event of this kind already exists for
/// (org, person, day), possibly raced in by a concurrent caller.
pub fn insert_attendance(
    conn: &Connection,
    ev: &AttendanceEvent,
) -> AppResult<Option<AttendanceEvent>> {
    let res = conn.execute(
        "INSERT INTO attendance (org_id, person_id, kind, occurred_at, day, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            ev.org_id,
            ev.person_id,
            ev.kind.to_db_str(),
            ev.occurred_at_str(),
            ev.day_str(),
            ev.note,
            ev.created_at,
        ],
    );

    match res {
        Ok(_) => {
            let mut stored = ev.clone();
            stored.id = conn.last_insert_rowid();
            Ok(Some(stored))
        }
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Find one event of the given kind for (org, person) inside the instant
/// range, earliest first.
pub fn find_attendance(
    conn: &Connection,
    org_id: i64,
    person_id: i64,
    kind: EventKind,
    bounds: (DateTime<Utc>, DateTime<Utc>),
) -> AppResult<Option<AttendanceEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE org_id = ?1 AND person_id = ?2 AND kind = ?3
           AND occurred_at BETWEEN ?4 AND ?5
         ORDER BY occurred_at ASC
         LIMIT 1",
    )?;

    let ev = stmt
        .query_row(
            params![
                org_id,
                person_id,
                kind.to_db_str(),
                utc_str(&bounds.0),
                utc_str(&bounds.1)
            ],
            map_attendance_row,
        )
        .optional()?;

    Ok(ev)
}

/// All events for (org, person) inside the instant range, ascending by
/// `occurred_at`, the order the aggregator's scan relies on.
pub fn load_person_events_between(
    conn: &Connection,
    org_id: i64,
    person_id: i64,
    bounds: (DateTime<Utc>, DateTime<Utc>),
) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE org_id = ?1 AND person_id = ?2
           AND occurred_at BETWEEN ?3 AND ?4
         ORDER BY occurred_at ASC",
    )?;

    let rows = stmt.query_map(
        params![org_id, person_id, utc_str(&bounds.0), utc_str(&bounds.1)],
        map_attendance_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_organization_row(row: &Row) -> Result<Organization> {
    Ok(Organization {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        name: row.get("name")?,
    })
}

fn map_person_row(row: &Row) -> Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        name: row.get("name")?,
        is_bot: row.get::<_, i64>("is_bot")? == 1,
    })
}

pub fn get_organization(conn: &Connection, external_id: &str) -> AppResult<Option<Organization>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM organizations WHERE external_id = ?1")?;
    Ok(stmt
        .query_row([external_id], map_organization_row)
        .optional()?)
}

/// Fetch by external id, creating on first reference. The display name
/// defaults to the external id when none is supplied; an existing row is
/// never renamed.
pub fn find_or_create_organization(
    conn: &Connection,
    external_id: &str,
    name: Option<&str>,
) -> AppResult<Organization> {
    if let Some(org) = get_organization(conn, external_id)? {
        return Ok(org);
    }

    conn.execute(
        "INSERT INTO organizations (external_id, name, created_at)
         VALUES (?1, ?2, datetime('now'))",
        params![external_id, name.unwrap_or(external_id)],
    )?;

    Ok(Organization {
        id: conn.last_insert_rowid(),
        external_id: external_id.to_string(),
        name: name.unwrap_or(external_id).to_string(),
    })
}

pub fn get_person(conn: &Connection, external_id: &str) -> AppResult<Option<Person>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM people WHERE external_id = ?1")?;
    Ok(stmt.query_row([external_id], map_person_row).optional()?)
}

pub fn find_or_create_person(
    conn: &Connection,
    external_id: &str,
    name: Option<&str>,
    is_bot: bool,
) -> AppResult<Person> {
    if let Some(person) = get_person(conn, external_id)? {
        return Ok(person);
    }

    conn.execute(
        "INSERT INTO people (external_id, name, is_bot, created_at)
         VALUES (?1, ?2, ?3, datetime('now'))",
        params![external_id, name.unwrap_or(external_id), is_bot as i64],
    )?;

    Ok(Person {
        id: conn.last_insert_rowid(),
        external_id: external_id.to_string(),
        name: name.unwrap_or(external_id).to_string(),
        is_bot,
    })
}

/// Register a person in an organization's roster. Re-registering is
/// harmless; supplying roles replaces the stored role list.
pub fn ensure_membership(
    conn: &Connection,
    org_id: i64,
    person_id: i64,
    roles: &[String],
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO memberships (org_id, person_id, roles, created_at)
         VALUES (?1, ?2, ?3, datetime('now'))
         ON CONFLICT(org_id, person_id) DO NOTHING",
        params![org_id, person_id, roles.join(",")],
    )?;

    if !roles.is_empty() {
        conn.execute(
            "UPDATE memberships SET roles = ?3 WHERE org_id = ?1 AND person_id = ?2",
            params![org_id, person_id, roles.join(",")],
        )?;
    }

    Ok(())
}

/// The roster contract: non-bot members of the organization, ordered by
/// display name, optionally narrowed to those carrying `role_filter`.
pub fn list_members(
    conn: &Connection,
    org_id: i64,
    role_filter: Option<&str>,
) -> AppResult<Vec<Member>> {
    let mut stmt = conn.prepare_cached(
        "SELECT p.id AS person_id, p.external_id, p.name, m.roles
         FROM memberships m
         JOIN people p ON p.id = m.person_id
         WHERE m.org_id = ?1 AND p.is_bot = 0
         ORDER BY p.name COLLATE NOCASE ASC",
    )?;

    let rows = stmt.query_map([org_id], |row| {
        let roles_str: String = row.get("roles")?;
        let roles = roles_str
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Member {
            person_id: row.get("person_id")?,
            external_id: row.get("external_id")?,
            name: row.get("name")?,
            roles,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        let member = r?;
        if let Some(role) = role_filter
            && !member.has_role(role)
        {
            continue;
        }
        out.push(member);
    }
    Ok(out)
}

pub fn load_log(conn: &Connection) -> Result<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn
        .prepare("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}
