//! CLI integration tests for cadence
//!
//! Every test runs against a config file inside a temporary directory so
//! a user config never leaks in.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the cadence binary
fn cadence_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("cadence"));
    cmd.current_dir(dir.path())
        .env("CADENCE_CONFIG", dir.path().join("cadence.toml"))
        .env_remove("RUST_LOG");
    cmd
}

/// Two-site calendar with three seeded records
const SEED_CONFIG: &str = r#"
[[sites]]
id = 1
name = "Site 1"
update_days = [1, 3, 5]
base_sequence = 101

[[sites]]
id = 2
name = "Site 2"
update_days = [2, 4, 6]
base_sequence = 201

[records.C101]
title = "First Update"
description = "Initial content update"
status = "in-progress"

[records.C102]
title = "Second Update"
status = "pending"

[records.C201]
title = "Site 2 Update"
status = "complete"
"#;

fn setup_default() -> TempDir {
    setup_with(SEED_CONFIG)
}

fn setup_with(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cadence.toml"), config).unwrap();
    dir
}

fn json_stdout(cmd: &mut assert_cmd::Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Derivation
// =============================================================================

#[test]
fn test_derive_stepped_by_default() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["derive", "--site", "1", "--date", "2025-01-08"])
        .assert()
        .success()
        .stdout("C104\n");
}

#[test]
fn test_derive_constant_policy_flag() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["--policy", "constant", "derive", "--site", "1", "--date", "2025-01-08"])
        .assert()
        .success()
        .stdout("C101\n");
}

#[test]
fn test_derive_non_update_day() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["derive", "--site", "1", "--date", "2025-01-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No update scheduled for Site 1 on 2025-01-07 (Tuesday)",
        ));
}

#[test]
fn test_derive_json() {
    let dir = setup_default();

    let json = json_stdout(
        cadence_cmd(&dir).args(["--format", "json", "derive", "--site", "2", "--date", "2025-01-09"]),
    );
    assert_eq!(json["content_id"], "C204");
    assert_eq!(json["policy"], "stepped");

    let json = json_stdout(
        cadence_cmd(&dir).args(["-f", "json", "derive", "--site", "2", "--date", "2025-01-08"]),
    );
    assert!(json["content_id"].is_null());
}

#[test]
fn test_derive_unknown_site() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["derive", "--site", "9", "--date", "2025-01-08"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Site not found: 9"));
}

// =============================================================================
// Calendar
// =============================================================================

#[test]
fn test_sites_lists_defaults() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .arg("sites")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon/Wed/Fri"))
        .stdout(predicate::str::contains("Tue/Thu/Sat"));
}

#[test]
fn test_calendar_month_json() {
    let dir = setup_default();

    let json = json_stdout(cadence_cmd(&dir).args(["-f", "json", "calendar", "--month", "2025-01"]));
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 27);

    let first = &entries[0];
    assert_eq!(first["date"], "2025-01-01");
    assert_eq!(first["content_id"], "C101");
    assert_eq!(first["status"], "in-progress");
    assert_eq!(first["title"], "First Update");
}

#[test]
fn test_calendar_site_filter() {
    let dir = setup_default();

    let json = json_stdout(
        cadence_cmd(&dir).args(["-f", "json", "calendar", "--month", "2025-01", "--site", "2"]),
    );
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 13);
    assert!(entries.iter().all(|e| e["site"] == 2));
}

#[test]
fn test_calendar_text() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["calendar", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2025 (policy: stepped)"))
        .stdout(predicate::str::contains("Wed 2025-01-08"));
}

#[test]
fn test_calendar_unknown_site() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["calendar", "--month", "2025-01", "--site", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Site not found: 5"));
}

#[test]
fn test_calendar_rejects_bad_month() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["calendar", "--month", "2025-13"])
        .assert()
        .failure();
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_show_stored_record() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["show", "C101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First Update"))
        .stdout(predicate::str::contains("In Progress"));
}

#[test]
fn test_show_missing_record_defaults() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["show", "C999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending"))
        .stdout(predicate::str::contains("(no record yet, showing defaults)"));

    let json = json_stdout(cadence_cmd(&dir).args(["-f", "json", "show", "C999"]));
    assert_eq!(json["stored"], false);
    assert_eq!(json["record"]["status"], "pending");
}

#[test]
fn test_show_malformed_id() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["show", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid content ID"));
}

#[test]
fn test_rename_with_cascade() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["rename", "C101", "C105", "--cascade"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed C101 -> C105 (cascade)"))
        .stdout(predicate::str::contains("C106"))
        .stdout(predicate::str::contains("C205"));

    let json = json_stdout(cadence_cmd(&dir).args(["-f", "json", "rename", "C101", "C105", "--cascade"]));
    let ids: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(ids, vec!["C105", "C106", "C205"]);
    assert_eq!(json["C106"]["title"], "Second Update");
}

#[test]
fn test_rename_without_cascade_keeps_others() {
    let dir = setup_default();

    let json = json_stdout(cadence_cmd(&dir).args(["-f", "json", "rename", "C102", "C150"]));
    let ids: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(ids, vec!["C101", "C150", "C201"]);
}

#[test]
fn test_rename_collision_fails() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["rename", "C101", "C102"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot rename C101 to C102"))
        .stderr(predicate::str::contains("already in use"));
}

#[test]
fn test_set_status() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["set-status", "C102", "review"])
        .assert()
        .success()
        .stdout("C102: Pending -> Review\n");
}

#[test]
fn test_set_status_rejects_unknown() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["set-status", "C101", "archived"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Status of C101 unchanged"))
        .stderr(predicate::str::contains("Unknown status 'archived'"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_file_sites_and_policy() {
    let dir = setup_with(
        r#"
policy = "constant"

[[sites]]
id = 7
name = "Blog"
update_days = [1, 4]
base_sequence = 700
"#,
    );

    cadence_cmd(&dir)
        .args(["derive", "--site", "7", "--date", "2025-03-20"])
        .assert()
        .success()
        .stdout("C700\n");

    // Command-line policy beats the file
    cadence_cmd(&dir)
        .args(["--policy", "stepped", "derive", "--site", "7", "--date", "2025-03-20"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("C7").and(predicate::str::contains("C700").not()));
}

#[test]
fn test_config_flag_overrides_env() {
    let dir = setup_default();
    let other = dir.path().join("other.toml");
    fs::write(
        &other,
        r#"
[[sites]]
id = 3
name = "Shop"
update_days = [0]
base_sequence = 300
"#,
    )
    .unwrap();

    cadence_cmd(&dir)
        .arg("--config")
        .arg(&other)
        .arg("sites")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop"))
        .stdout(predicate::str::contains("Site 1").not());
}

#[test]
fn test_invalid_config_reports_path() {
    let dir = setup_with("policy = \"sometimes\"\n");

    cadence_cmd(&dir)
        .arg("sites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    cadence_cmd(&dir)
        .arg("sites")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = setup_default();

    cadence_cmd(&dir)
        .args(["--verbose", "rename", "C101", "C105", "--cascade"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:rename]"));
}
