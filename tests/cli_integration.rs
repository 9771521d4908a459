//! Integration tests for the Lockbox CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master key is supplied through `LOCKBOX_PASSPHRASE` so no test
//! reaches an interactive prompt.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use lockbox::config::Settings;
use lockbox::session::Session;
use lockbox::vault::Secret;
use predicates::prelude::*;

const PASS: &str = "correcthorse";

/// Helper: get a Command pointing at the lockbox binary.
fn lockbox() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lockbox").expect("binary should exist");
    cmd.env_remove("LOCKBOX_DIR")
        .env_remove("LOCKBOX_PASSPHRASE")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: a command bound to `dir` with the master key in the environment.
fn lockbox_in(dir: &TempDir, passphrase: &str) -> Command {
    let mut cmd = lockbox();
    cmd.arg("--vault-dir")
        .arg(dir.path())
        .env("LOCKBOX_PASSPHRASE", passphrase);
    cmd
}

/// Helper: a freshly initialised vault directory.
fn initialised_vault() -> TempDir {
    let tmp = TempDir::new().unwrap();
    lockbox_in(&tmp, PASS)
        .args(["init", "--salt", "abc123"])
        .assert()
        .success();
    tmp
}

#[test]
fn help_flag_shows_usage() {
    lockbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("category"))
        .stdout(predicate::str::contains("change-key"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn version_flag_shows_version() {
    lockbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn completions_reject_unknown_shell() {
    lockbox()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn clipboard_failure_is_not_reported_as_a_copy() {
    let tmp = initialised_vault();
    let mut settings = Settings::load(tmp.path()).unwrap();
    settings.clipboard_ttl = 1;
    settings.save(tmp.path()).unwrap();
    let mut session = Session::from_settings(&Settings::vault_path(tmp.path()), &settings);
    session.unlock(PASS).unwrap();
    session
        .write(|v| {
            v.secrets
                .add(Secret::new(None, "site", "me", "pw", ""), &v.categories)
        })
        .unwrap();
    session.lock();

    // Without a display server the clipboard cannot be opened.
    let output = lockbox_in(&tmp, PASS)
        .args(["get", "0"])
        .env_remove("DISPLAY")
        .env_remove("WAYLAND_DISPLAY")
        .timeout(std::time::Duration::from_secs(60))
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    if output.status.success() {
        assert!(stdout.contains("copied to the clipboard"));
    } else {
        assert!(!stdout.contains("copied to the clipboard"));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Clipboard error"));
    }
}

#[test]
fn no_args_shows_help() {
    lockbox()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_without_config_fails() {
    let tmp = TempDir::new().unwrap();
    lockbox_in(&tmp, PASS)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lockbox init"));
}

#[test]
fn init_creates_config_and_vault() {
    let tmp = TempDir::new().unwrap();
    lockbox_in(&tmp, PASS)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your unique salt is:"));

    tmp.child("config.toml").assert(predicate::path::is_file());
    tmp.child("secrets.vault").assert(predicate::path::is_file());
}

#[test]
fn init_with_explicit_salt_records_it() {
    let tmp = initialised_vault();
    tmp.child("config.toml")
        .assert(predicate::str::contains("abc123"));
}

#[test]
fn init_twice_is_refused() {
    let tmp = initialised_vault();
    lockbox_in(&tmp, PASS)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_master_key() {
    let tmp = TempDir::new().unwrap();
    lockbox_in(&tmp, "short")
        .arg("init")
        .assert()
        .failure();
    tmp.child("secrets.vault").assert(predicate::path::missing());
    tmp.child("config.toml").assert(predicate::path::missing());
}

#[test]
fn init_can_be_retried_with_a_salt_after_a_rejected_key() {
    let tmp = TempDir::new().unwrap();
    lockbox_in(&tmp, "short")
        .args(["init", "--salt", "abc123"])
        .assert()
        .failure();

    lockbox_in(&tmp, PASS)
        .args(["init", "--salt", "abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your unique salt is: abc123"));
}

#[test]
fn empty_vault_lists_nothing() {
    let tmp = initialised_vault();
    lockbox_in(&tmp, PASS)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("There are no secrets saved yet."));
}

#[test]
fn wrong_master_key_is_rejected() {
    let tmp = initialised_vault();
    let before = std::fs::read(tmp.path().join("secrets.vault")).unwrap();

    lockbox_in(&tmp, "not-the-passphrase")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));

    assert_eq!(std::fs::read(tmp.path().join("secrets.vault")).unwrap(), before);
}

#[test]
fn get_missing_secret_fails() {
    let tmp = initialised_vault();
    lockbox_in(&tmp, PASS)
        .args(["get", "5", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Secret #5 does not exist"));
}

#[test]
fn category_lifecycle() {
    let tmp = initialised_vault();

    lockbox_in(&tmp, PASS)
        .args(["category", "add", "Email"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#0 has been created"));

    lockbox_in(&tmp, PASS)
        .args(["category", "rename", "0", "Mail"])
        .assert()
        .success();

    lockbox_in(&tmp, PASS)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mail"));

    lockbox_in(&tmp, PASS)
        .args(["category", "delete", "0", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has been deleted"));

    lockbox_in(&tmp, PASS)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("There are no categories yet."));
}

#[test]
fn deleting_unknown_category_fails() {
    let tmp = initialised_vault();
    lockbox_in(&tmp, PASS)
        .args(["category", "delete", "3", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category #3 does not exist"));
}

#[test]
fn completions_are_generated() {
    lockbox()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}
