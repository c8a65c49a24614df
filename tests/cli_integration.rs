//! Integration tests for the Lockup CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. The master
//! password comes from `LOCKUP_PASSWORD` and credential passwords are piped
//! on stdin, so no test needs a terminal.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "Tr0ub4dor&3";

/// Helper: get a Command pointing at the lockup binary.
fn lockup() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lockup").expect("binary should exist");
    cmd.env_remove("LOCKUP_PASSWORD")
        .env_remove("LOCKUP_DATA_DIR")
        .env_remove("LOCKUP_LOG");
    cmd
}

/// Helper: a command bound to the vault in `tmp`, unlocked with `password`.
fn in_vault(tmp: &TempDir, password: &str) -> Command {
    let mut cmd = lockup();
    cmd.current_dir(tmp.path())
        .env("LOCKUP_PASSWORD", password)
        .arg("--data-dir")
        .arg(tmp.path().join("vault"));
    cmd
}

/// Helper: an initialized vault holding github.com / alice / S3cret!.
fn vault_with_one_credential() -> TempDir {
    let tmp = TempDir::new().unwrap();
    in_vault(&tmp, MASTER).arg("init").assert().success();
    in_vault(&tmp, MASTER)
        .args(["add", "github.com", "alice"])
        .write_stdin("S3cret!\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("record 1"));
    tmp
}

#[test]
fn help_flag_shows_usage() {
    lockup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("reset-password"));
}

#[test]
fn version_flag_shows_version() {
    lockup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockup"));
}

#[test]
fn no_args_shows_help() {
    lockup()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_creates_database_and_salt() {
    let tmp = TempDir::new().unwrap();
    in_vault(&tmp, MASTER)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault created"));

    assert!(tmp.path().join("vault").join("lockup.db").exists());
    assert!(tmp.path().join("vault").join("salt.key").exists());
}

#[test]
fn init_twice_fails() {
    let tmp = vault_with_one_credential();
    in_vault(&tmp, MASTER)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn add_list_show() {
    let tmp = vault_with_one_credential();

    in_vault(&tmp, MASTER)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("github.com"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("S3cret!").not());

    in_vault(&tmp, MASTER)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S3cret!"));
}

#[test]
fn wrong_master_password_fails() {
    let tmp = vault_with_one_credential();
    in_vault(&tmp, "not-the-password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong master password"));
}

#[test]
fn update_and_delete() {
    let tmp = vault_with_one_credential();

    in_vault(&tmp, MASTER)
        .args(["update", "1", "--service", "gitlab.com", "-p", "N3w!"])
        .assert()
        .success();
    in_vault(&tmp, MASTER)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlab.com"))
        .stdout(predicate::str::contains("N3w!"));

    in_vault(&tmp, MASTER)
        .args(["delete", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted record 1"));
    in_vault(&tmp, MASTER)
        .args(["delete", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));
}

#[test]
fn show_missing_record_fails() {
    let tmp = vault_with_one_credential();
    in_vault(&tmp, MASTER)
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record 42 not found"));
}

#[test]
fn show_on_missing_vault_fails() {
    let tmp = TempDir::new().unwrap();
    in_vault(&tmp, MASTER)
        .args(["show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vault not found"));
}

#[test]
fn export_then_import_duplicates_records() {
    let tmp = vault_with_one_credential();
    let backup = tmp.path().join("backup.txt");

    in_vault(&tmp, MASTER)
        .arg("export")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 credentials"));

    in_vault(&tmp, MASTER)
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 credentials"));

    in_vault(&tmp, MASTER)
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S3cret!"));
}

#[test]
fn import_of_edited_transcript_fails() {
    let tmp = vault_with_one_credential();
    let backup = tmp.path().join("backup.txt");
    in_vault(&tmp, MASTER).arg("export").arg(&backup).assert().success();

    let mut text = std::fs::read_to_string(&backup).unwrap();
    text.insert(0, 'x');
    std::fs::write(&backup, text).unwrap();

    in_vault(&tmp, MASTER)
        .arg("import")
        .arg(&backup)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Integrity check failed on line 1"));
}

#[test]
fn reset_password_switches_master_password() {
    let tmp = vault_with_one_credential();

    // LOCKUP_PASSWORD answers both the current and the new password prompt.
    in_vault(&tmp, MASTER)
        .arg("reset-password")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 credentials re-encrypted"));

    in_vault(&tmp, MASTER)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S3cret!"));
}

#[test]
fn data_dir_from_config_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".lockup.toml"), "data_dir = \"from-config\"\n").unwrap();

    lockup()
        .current_dir(tmp.path())
        .env("LOCKUP_PASSWORD", MASTER)
        .arg("init")
        .assert()
        .success();

    assert!(tmp.path().join("from-config").join("lockup.db").exists());
}
