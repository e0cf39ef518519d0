use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. The migration engine itself records
/// applied migrations here, so it must exist before anything else runs.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a migration version has already been recorded.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(stmt.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Record a migration as applied.
fn record_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Run one guarded migration: skip if recorded, otherwise execute the batch,
/// record it, and print what happened.
fn apply(conn: &Connection, version: &str, message: &str, sql: &str) -> Result<()> {
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(sql)?;
    record_migration(conn, version, message)?;
    success(format!("Migration applied: {}", version));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(). Safe to re-run: every step is guarded by the
/// migration log or by IF NOT EXISTS.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    apply(
        conn,
        "20240102_0001_create_organizations",
        "Created organizations table",
        r#"
        CREATE TABLE IF NOT EXISTS organizations (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id  TEXT NOT NULL UNIQUE,
            name         TEXT NOT NULL,
            created_at   TEXT NOT NULL
        );
        "#,
    )?;

    apply(
        conn,
        "20240102_0002_create_people",
        "Created people table",
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id  TEXT NOT NULL UNIQUE,
            name         TEXT NOT NULL,
            is_bot       INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL
        );
        "#,
    )?;

    apply(
        conn,
        "20240102_0003_create_memberships",
        "Created memberships table",
        r#"
        CREATE TABLE IF NOT EXISTS memberships (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            org_id       INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
            person_id    INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
            roles        TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL,
            UNIQUE (org_id, person_id)
        );
        "#,
    )?;

    apply(
        conn,
        "20240102_0004_create_attendance",
        "Created attendance table",
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            org_id       INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
            person_id    INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
            kind         TEXT NOT NULL CHECK(kind IN ('in','out')),
            occurred_at  TEXT NOT NULL,
            day          TEXT NOT NULL,
            note         TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_occurred
            ON attendance(org_id, person_id, occurred_at);
        "#,
    )?;

    // One IN and one OUT per (org, person, calendar day). The Guard appends
    // optimistically and treats a violation as already-checked-in/out, which
    // also closes the check-then-append race between concurrent processes.
    apply(
        conn,
        "20240115_0005_unique_attendance_day",
        "Added per-day uniqueness to attendance",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_one_per_day
            ON attendance(org_id, person_id, day, kind);
        "#,
    )?;

    Ok(())
}
