use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use punchclock::models::EventKind;
use std::fs;

mod common;
use common::*;

#[test]
fn report_over_empty_range_is_no_data_not_an_error() {
    let db = setup_test_db("report_empty");
    init_test_db(&db);
    roster_add(&db, "acme", "alice", "Alice");

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/01/24", "--to", "01/31/24",
    ])
    .assert()
    .success()
    .stdout(contains("No attendance records"));
}

#[test]
fn report_for_unknown_org_is_rejected() {
    let db = setup_test_db("report_unknown_org");
    init_test_db(&db);

    pc().args([
        "--db", &db, "report", "--org", "ghost", "--from", "01/01/24", "--to", "01/31/24",
    ])
    .assert()
    .failure()
    .stdout(contains("Unknown organization"));
}

#[test]
fn report_validates_range_arguments() {
    let db = setup_test_db("report_range_args");
    init_test_db(&db);

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "1/1/24", "--to", "01/31/24",
    ])
    .assert()
    .failure()
    .stdout(contains("MM/DD/YY"));

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/31/24", "--to", "01/01/24",
    ])
    .assert()
    .failure()
    .stdout(contains("Start date cannot be after end date"));
}

#[test]
fn single_worked_day_yields_one_row_with_eight_hours() {
    let db = setup_test_db("report_single_day");
    init_test_db(&db);

    // 09:00 → 17:00 on 2024-01-10, note "shipped X".
    seed_event(
        &db,
        "acme",
        "alice",
        "Alice",
        EventKind::In,
        at(2024, 1, 10, 9, 0),
        "",
    );
    seed_event(
        &db,
        "acme",
        "alice",
        "Alice",
        EventKind::Out,
        at(2024, 1, 10, 17, 0),
        "shipped X",
    );

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/10/24", "--to", "01/10/24",
    ])
    .assert()
    .success()
    .stdout(contains("Alice"))
    .stdout(contains("01/10/24"))
    .stdout(contains("09:00-17:00 (8h)"));
}

#[test]
fn lone_checkin_day_appears_but_counts_zero() {
    let db = setup_test_db("report_lone_checkin");
    init_test_db(&db);

    seed_event(
        &db,
        "acme",
        "alice",
        "Alice",
        EventKind::In,
        at(2024, 1, 10, 9, 0),
        "",
    );

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/10/24", "--to", "01/10/24",
    ])
    .assert()
    .success()
    .stdout(contains("09:00---:-- (0h)"));
}

#[test]
fn report_spans_days_and_members() {
    let db = setup_test_db("report_matrix");
    init_test_db(&db);

    seed_day(&db, "acme", "bob", "Bob", 2024, 1, 10, 10, 18);
    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 10, 9, 17);
    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 11, 9, 15);

    let out = pc()
        .args([
            "--db", &db, "report", "--org", "acme", "--from", "01/01/24", "--to", "01/31/24",
        ])
        .assert()
        .success()
        .stdout(contains("01/10/24"))
        .stdout(contains("01/11/24"));

    // Rows sort by display name: Alice before Bob.
    let stdout = String::from_utf8_lossy(&out.get_output().stdout).into_owned();
    let alice_pos = stdout.find("Alice").expect("Alice row");
    let bob_pos = stdout.find("Bob").expect("Bob row");
    assert!(alice_pos < bob_pos);

    // Alice worked two days for 14 hours; Bob one day for 8.
    assert!(stdout.contains("09:00-17:00 (8h)"));
    assert!(stdout.contains("09:00-15:00 (6h)"));
    assert!(stdout.contains("10:00-18:00 (8h)"));
}

#[test]
fn days_outside_the_range_are_excluded() {
    let db = setup_test_db("report_range_bounds");
    init_test_db(&db);

    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 10, 9, 17);
    seed_day(&db, "acme", "alice", "Alice", 2024, 2, 5, 9, 17);

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/01/24", "--to", "01/31/24",
    ])
    .assert()
    .success()
    .stdout(contains("01/10/24"))
    .stdout(contains("02/05/24").not());
}

#[test]
fn role_filter_narrows_the_roster() {
    let db = setup_test_db("report_role_filter");
    init_test_db(&db);

    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 10, 9, 17);
    seed_day(&db, "acme", "bob", "Bob", 2024, 1, 10, 10, 18);

    // Re-register with roles; membership roles are replaced.
    pc().args([
        "--db", &db, "roster", "add", "--org", "acme", "--person", "alice", "--role", "dev",
    ])
    .assert()
    .success();
    pc().args([
        "--db", &db, "roster", "add", "--org", "acme", "--person", "bob", "--role", "ops",
    ])
    .assert()
    .success();

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/01/24", "--to", "01/31/24",
        "--role", "dev",
    ])
    .assert()
    .success()
    .stdout(contains("Alice"))
    .stdout(contains("Bob").not());
}

#[test]
fn bots_never_appear_in_reports() {
    let db = setup_test_db("report_bots");
    init_test_db(&db);

    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 10, 9, 17);

    pc().args([
        "--db", &db, "roster", "add", "--org", "acme", "--person", "reminder-bot", "--name",
        "Reminder", "--bot",
    ])
    .assert()
    .success();

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/01/24", "--to", "01/31/24",
    ])
    .assert()
    .success()
    .stdout(contains("Reminder").not());
}

#[test]
fn report_exports_to_csv() {
    let db = setup_test_db("report_csv");
    let file = temp_out("report_csv", "csv");
    init_test_db(&db);

    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 10, 9, 17);

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/10/24", "--to", "01/10/24",
        "--format", "csv", "--file", &file,
    ])
    .assert()
    .success()
    .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&file).expect("csv written");
    assert!(content.contains("name,date,check_in,check_out,hours"));
    assert!(content.contains("Alice,01/10/24,09:00,17:00,8"));
}

#[test]
fn report_exports_to_json() {
    let db = setup_test_db("report_json");
    let file = temp_out("report_json", "json");
    init_test_db(&db);

    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 10, 9, 17);

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/10/24", "--to", "01/10/24",
        "--format", "json", "--file", &file,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&file).expect("json written");
    assert!(content.contains("\"total_hours\": 8"));
    assert!(content.contains("\"worked_days\": 1"));
}

#[test]
fn csv_export_without_file_is_rejected() {
    let db = setup_test_db("report_csv_no_file");
    init_test_db(&db);
    seed_day(&db, "acme", "alice", "Alice", 2024, 1, 10, 9, 17);

    pc().args([
        "--db", &db, "report", "--org", "acme", "--from", "01/10/24", "--to", "01/10/24",
        "--format", "csv",
    ])
    .assert()
    .failure()
    .stderr(contains("--file is required"));
}
