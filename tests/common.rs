#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use punchclock::db::initialize::init_db;
use punchclock::db::queries::{
    ensure_membership, find_or_create_organization, find_or_create_person, insert_attendance,
};
use punchclock::models::{AttendanceEvent, EventKind};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pc() -> Command {
    cargo_bin_cmd!("punchclock")
}

/// The default configured zone; tests that reason about "today" must use
/// this offset, not the host's local zone.
pub fn offset() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

pub fn app_today() -> NaiveDate {
    Utc::now().with_timezone(&offset()).date_naive()
}

pub fn token(date: NaiveDate) -> String {
    date.format("%m/%d/%y").to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema via the CLI (creates tables, no config writes).
pub fn init_test_db(db_path: &str) {
    pc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Register a member through the CLI.
pub fn roster_add(db_path: &str, org: &str, person: &str, name: &str) {
    pc().args([
        "--db", db_path, "roster", "add", "--org", org, "--person", person, "--name", name,
    ])
    .assert()
    .success();
}

/// A wall-clock instant in the configured zone.
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    offset()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Seed one attendance event directly through the library DB API, the way
/// the Guard would store it, so report tests get deterministic instants.
pub fn seed_event(
    db_path: &str,
    org_ext: &str,
    person_ext: &str,
    person_name: &str,
    kind: EventKind,
    occurred_at: DateTime<Utc>,
    note: &str,
) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    init_db(&conn).expect("init db");

    let org = find_or_create_organization(&conn, org_ext, None).expect("org");
    let person =
        find_or_create_person(&conn, person_ext, Some(person_name), false).expect("person");
    ensure_membership(&conn, org.id, person.id, &[]).expect("membership");

    let day = occurred_at.with_timezone(&offset()).date_naive();
    let ev = AttendanceEvent::new(org.id, person.id, kind, occurred_at, day, note.to_string());
    insert_attendance(&conn, &ev).expect("insert");
}

/// Seed a full worked day (IN + OUT) for one person.
pub fn seed_day(
    db_path: &str,
    org_ext: &str,
    person_ext: &str,
    person_name: &str,
    y: i32,
    m: u32,
    d: u32,
    in_hour: u32,
    out_hour: u32,
) {
    seed_event(
        db_path,
        org_ext,
        person_ext,
        person_name,
        EventKind::In,
        at(y, m, d, in_hour, 0),
        "",
    );
    seed_event(
        db_path,
        org_ext,
        person_ext,
        person_name,
        EventKind::Out,
        at(y, m, d, out_hour, 0),
        "done",
    );
}

pub fn attendance_count(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
        .expect("count")
}
