//! CLI smoke tests against the compiled binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ticketry(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ticketry").expect("binary built");
    cmd.current_dir(dir.path())
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--no-color");
    cmd
}

#[test]
fn license_grant_and_status_round_trip() {
    let dir = TempDir::new().unwrap();

    // Default owner is 0 and grant defaults to acting as the owner
    ticketry(&dir)
        .args(["license", "grant", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Guild 42 licensed until"));

    ticketry(&dir)
        .args(["license", "status", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is licensed until"));
}

#[test]
fn non_owner_grant_is_a_reported_noop() {
    let dir = TempDir::new().unwrap();

    ticketry(&dir)
        .args(["license", "grant", "42", "--actor", "99"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not the configured owner"));

    ticketry(&dir)
        .args(["license", "status", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no license record"));
}

#[test]
fn config_show_prints_full_schema_for_unknown_guild() {
    let dir = TempDir::new().unwrap();

    ticketry(&dir)
        .args(["config", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Support Tickets"))
        .stdout(predicate::str::contains("panel_description"))
        .stdout(predicate::str::contains("claimed_category"));
}

#[test]
fn credits_default_to_zero() {
    let dir = TempDir::new().unwrap();

    ticketry(&dir)
        .args(["credits", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claimed 0 tickets"));
}
