mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use std::path::Path;

const BIN_NAME: &str = "budget_forecast";

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGET_FORECAST_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn pinned_home() -> std::path::PathBuf {
    let home = common::temp_home();
    for args in [
        ["settings", "set", "starting-balance", "1000"],
        ["settings", "set", "current-date", "2025-01-10"],
        ["settings", "set", "end-date", "2025-03-31"],
    ] {
        cli(&home).args(args).assert().success();
    }
    home
}

#[test]
fn version_prints_package_version() {
    let home = common::temp_home();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rent_forecast_end_to_end() {
    let home = pinned_home();
    cli(&home)
        .args(["recurring", "add", "Rent", "1200", "debit", "1"])
        .assert()
        .success()
        .stdout(contains("Added recurring rule"));

    cli(&home)
        .arg("forecast")
        .assert()
        .success()
        .stdout(
            contains("Feb 01, 2025")
                .and(contains("Rent (recurring)"))
                .and(contains("-$1,400.00 on Mar 01, 2025")),
        );
    assert!(home.join("data").join("recurring.json").exists());
}

#[test]
fn transactions_can_be_added_and_cleared() {
    let home = pinned_home();
    cli(&home)
        .args(["add", "Bonus", "500", "credit", "2025-01-15"])
        .assert()
        .success()
        .stdout(contains("Added transaction"));
    cli(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("$1,500.00"));
    cli(&home)
        .arg("clear")
        .assert()
        .success()
        .stdout(contains("Removed 1 transaction(s)"));
    cli(&home)
        .args(["remove", "does-not-exist"])
        .assert()
        .success()
        .stdout(contains("No transaction with id does-not-exist"));
}

#[test]
fn card_without_upcoming_slot_reports_error() {
    let home = common::temp_home();
    cli(&home)
        .args(["settings", "set", "current-date", "2025-01-20"])
        .assert()
        .success();
    cli(&home)
        .args(["settings", "set", "end-date", "2025-01-31"])
        .assert()
        .success();
    let output = cli(&home).args(["card", "add", "Visa", "15"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout.trim().rsplit(' ').next().unwrap().to_string();

    cli(&home)
        .args(["card", "pay", id.as_str(), "100"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error: No upcoming payment date for `Visa`"));
}

#[test]
fn invalid_input_exits_with_status_one() {
    let home = common::temp_home();
    cli(&home)
        .args(["add", "Coffee", "four", "debit", "2025-01-02"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error:").and(contains("not a valid amount")));
    cli(&home)
        .arg("bogus")
        .assert()
        .failure()
        .stderr(contains("unknown command `bogus`"));
}

#[test]
fn dropped_records_are_reported_once() {
    let home = common::temp_home();
    let data = home.join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(
        data.join("transactions.json"),
        r#"[{"id": "no-date", "name": "Broken", "amount": 10, "type": "debit"}]"#,
    )
    .unwrap();

    let output = cli(&home).arg("summary").output().unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("transactions[0] dropped").count(), 1, "{stderr}");
}

#[test]
fn oversized_horizon_fails_cleanly() {
    let home = common::temp_home();
    cli(&home)
        .args(["settings", "set", "horizon", "9223372036854775807"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error: Horizon must be between 1 and 36500 days"));
    cli(&home).arg("summary").assert().success();
}
