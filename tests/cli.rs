use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pocket(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pocket").unwrap();
    cmd.arg("--dir")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("POCKET_LEDGER_DIR");
    cmd
}

fn records(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("records.txt")).unwrap()
}

#[test]
fn shell_session_persists_on_exit() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .write_stdin("100\nadd\nmeal breakfast -50, salary job 1000\nview\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("How much money do you have?"))
        .stdout(predicate::str::contains("Now you have 1050 dollars."));

    assert_eq!(records(&dir), "1050\nmeal breakfast -50\nsalary job 1000\n");

    pocket(&dir)
        .write_stdin("view\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome back!"))
        .stdout(predicate::str::contains("  1 meal"))
        .stdout(predicate::str::contains("Now you have 1050 dollars."));
}

#[test]
fn corrupt_file_is_deleted_and_reset() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("records.txt"), "100\nmeal -20\n").unwrap();

    pocket(&dir)
        .write_stdin("30\nexit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid format in ledger file at line 2"))
        .stdout(predicate::str::contains("How much money do you have?"));

    assert_eq!(records(&dir), "30\n");
}

#[test]
fn invalid_opening_balance_defaults_to_zero() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .write_stdin("plenty\nexit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Set to 0 by default."));

    assert_eq!(records(&dir), "0\n");
}

#[test]
fn one_shot_commands() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("records.txt"), "0\n").unwrap();

    pocket(&dir)
        .args(["add", "meal lunch -20, salary job 1000, snack chips -5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 records."));

    pocket(&dir)
        .args(["find", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The total amount above is -25."))
        .stdout(predicate::str::contains("salary").not());

    pocket(&dir)
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted record 2: salary job 1000"));

    assert_eq!(records(&dir), "-25\nmeal lunch -20\nsnack chips -5\n");
}

#[test]
fn one_shot_rejection_fails_without_changes() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("records.txt"), "10\nbus ticket -3\n").unwrap();

    pocket(&dir)
        .args(["delete", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("There's no record with the record number 5"));

    pocket(&dir)
        .args(["add", "groceries milk -4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("groceries"));

    assert_eq!(records(&dir), "10\nbus ticket -3\n");
}

#[test]
fn categories_tree() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("- expense\n    - food\n        - meal\n"));
}

#[test]
fn settings_file_overrides_categories() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pocket.json"),
        r#"{"categories": [{"name": "expense", "children": ["rent"]}], "audit_enabled": false}"#,
    )
    .unwrap();

    pocket(&dir)
        .write_stdin("0\nadd\nrent may -900\nexit\n")
        .assert()
        .success();

    assert_eq!(records(&dir), "-900\nrent may -900\n");
    assert!(!dir.path().join("pocket-audit.log").exists());
}

#[test]
fn history_lists_changes() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("records.txt"), "0\n").unwrap();

    pocket(&dir).args(["add", "bonus gift 50"]).assert().success();

    pocket(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("ADD"))
        .stdout(predicate::str::contains("bonus gift 50 -> balance 50"));
}

#[test]
fn config_reports_missing_ledger() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("records.txt (not created yet)"));

    fs::write(dir.path().join("records.txt"), "0\n").unwrap();

    pocket(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("(not created yet)").not());
}

#[test]
fn history_survives_torn_audit_line() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("records.txt"), "10\n").unwrap();
    fs::write(dir.path().join("pocket-audit.log"), "{\"timestamp\": \"20").unwrap();

    pocket(&dir)
        .write_stdin("add\nbus ticket -3\nhistory\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("bus ticket -3 -> balance 7"));

    assert_eq!(records(&dir), "7\nbus ticket -3\n");
}
