use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{cli_init, rti, setup_test_db, temp_out};

/// init + one staff member with a booked June entry
fn prepared(name: &str) -> String {
    let db_path = setup_test_db(name);
    cli_init(&db_path);

    rti()
        .args([
            "--db", &db_path, "user", "add", "anna", "--name", "Anna Albrecht", "--weekly", "30",
        ])
        .assert()
        .success()
        .stdout(contains("User 'anna' (staff) created"));

    rti()
        .args([
            "--db",
            &db_path,
            "--as",
            "anna",
            "entry",
            "add",
            "2024-06-10",
            "--subtype",
            "time_with_children",
            "--hours",
            "8",
        ])
        .assert()
        .success()
        .stdout(contains("Entry #1 saved"));

    db_path
}

#[test]
fn init_seeds_an_admin() {
    let db_path = setup_test_db("cli_init");
    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Created user 'admin'"));

    // second run keeps the directory as is
    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Users already present"));
}

#[test]
fn entry_list_shows_prep_and_total() {
    let db_path = prepared("cli_entry_list");

    rti()
        .args(["--db", &db_path, "--as", "anna", "entry", "list", "--period", "2024-06"])
        .assert()
        .success()
        .stdout(contains("8.00h").and(contains("4.00h")).and(contains("12.00h")));
}

#[test]
fn locked_month_rejects_staff_edits() {
    let db_path = prepared("cli_lock_flow");

    rti()
        .args(["--db", &db_path, "lock", "set", "anna", "2024-06"])
        .assert()
        .success()
        .stdout(contains("June 2024 locked for 'anna'"));

    rti()
        .args(["--db", &db_path, "--as", "anna", "entry", "edit", "1", "--hours", "7"])
        .assert()
        .failure()
        .stderr(contains("is locked for user anna"));

    rti()
        .args(["--db", &db_path, "lock", "set", "anna", "2024-06"])
        .assert()
        .failure()
        .stderr(contains("already locked"));

    rti()
        .args(["--db", &db_path, "lock", "status", "2024-06"])
        .assert()
        .success()
        .stdout(contains("Anna Albrecht").and(contains("1 of 2 users locked")));

    rti()
        .args(["--db", &db_path, "lock", "release", "1"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "--as", "anna", "entry", "edit", "1", "--hours", "7"])
        .assert()
        .success()
        .stdout(contains("7.00h"));
}

#[test]
fn staff_cannot_lock_months() {
    let db_path = prepared("cli_lock_denied");

    rti()
        .args(["--db", &db_path, "--as", "anna", "lock", "set", "anna", "2024-06"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn monthly_stats_as_json() {
    let db_path = prepared("cli_stats_json");

    rti()
        .args(["--db", &db_path, "--as", "anna", "stats", "month", "2024-06", "--json"])
        .assert()
        .success()
        .stdout(contains("\"worked_hours\": 8.0").and(contains("\"month\": 6")));
}

#[test]
fn unknown_acting_user_fails() {
    let db_path = prepared("cli_unknown_actor");

    rti()
        .args(["--db", &db_path, "--as", "nobody", "entry", "list"])
        .assert()
        .failure()
        .stderr(contains("Acting user 'nobody'"));
}

#[test]
fn export_requires_absolute_path() {
    let db_path = prepared("cli_export_relative");

    rti()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", "out.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));

    let out = temp_out("cli_export_abs", "csv");
    rti()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2024"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));
}

#[test]
fn child_counts_and_events() {
    let db_path = prepared("cli_child_event");

    rti()
        .args(["--db", &db_path, "child", "slots"])
        .assert()
        .success()
        .stdout(contains("08:00").and(contains("16:00")).and(contains("16:30").not()));

    rti()
        .args([
            "--db", &db_path, "--as", "anna", "child", "add", "2024-06-10", "08:00",
            "--under3", "9", "--over3", "25",
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "child", "stats", "--period", "2024-06", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_required_staff\": 4"));

    rti()
        .args(["--db", &db_path, "event", "add", "2024-12-24", "closure", "--desc", "Christmas"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "event", "add", "2024-12-24", "closure"])
        .assert()
        .failure()
        .stderr(contains("Conflict"));

    rti()
        .args(["--db", &db_path, "event", "calendar", "2024", "--month", "12"])
        .assert()
        .success()
        .stdout(contains("Christmas"));
}

#[test]
fn log_records_mutations() {
    let db_path = prepared("cli_log");

    rti()
        .args(["--db", &db_path, "lock", "set", "anna", "2024-06"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("user_add").and(contains("lock")).and(contains("init")));
}

#[test]
fn import_template_roundtrip() {
    let db_path = prepared("cli_import");
    let file = temp_out("cli_import_template", "csv");

    rti()
        .args(["--db", &db_path, "import", "--template", &file])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .success()
        .stdout(contains("1 entries imported"));
}
