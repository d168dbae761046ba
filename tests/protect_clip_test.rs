use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn seckit(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("seckit");
    cmd.env_remove("SECKIT_HOME")
        .env_remove("RUST_LOG")
        .arg("--home")
        .arg(home);
    cmd
}

fn initialized_home() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    seckit(dir.path()).arg("init").assert().success();
    dir
}

// ─── Data protection ─────────────────────────────────────────────

#[test]
fn protect_complete_round_trip() {
    let dir = initialized_home();
    let file = dir.child("protectedData.txt");

    seckit(dir.path())
        .args(["protect", "write"])
        .arg(file.path())
        .arg("Super secret text")
        .assert()
        .success()
        .stdout(predicate::str::contains("(complete)"));

    let raw = std::fs::read_to_string(file.path()).unwrap();
    assert!(!raw.contains("Super secret text"));

    seckit(dir.path())
        .args(["protect", "read"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("Super secret text\n");
}

#[test]
fn protect_owner_only_is_plain() {
    let dir = initialized_home();
    let file = dir.child("plain.txt");

    seckit(dir.path())
        .args(["protect", "write", "--level", "owner-only"])
        .arg(file.path())
        .arg("visible")
        .assert()
        .success();

    file.assert("visible");
}

#[test]
fn protect_unknown_level_fails() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["protect", "write", "--level", "locked"])
        .arg(dir.child("x.txt").path())
        .arg("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown protection level"));
}

#[test]
fn protect_read_missing_fails() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["protect", "read"])
        .arg(dir.child("missing.txt").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

// ─── Clipboard ───────────────────────────────────────────────────

#[test]
fn clip_copy_then_paste() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["clip", "copy", "shared text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied to 'CustomPasteboard'"));

    seckit(dir.path())
        .args(["clip", "paste"])
        .assert()
        .success()
        .stdout("shared text\n");
}

#[test]
fn clip_cut_then_paste() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["clip", "cut", "moved text"])
        .assert()
        .success();

    seckit(dir.path())
        .args(["clip", "paste"])
        .assert()
        .success()
        .stdout("moved text\n");
}

#[test]
fn clip_clear_empties_buffer() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["clip", "copy", "gone soon"])
        .assert()
        .success();
    seckit(dir.path()).args(["clip", "clear"]).assert().success();

    seckit(dir.path())
        .args(["clip", "paste"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is empty"));
}

// ─── Audit log & demo ────────────────────────────────────────────

#[test]
fn operations_are_audited_without_values() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["set", "password", "s3cr3t-value"])
        .assert()
        .success();
    seckit(dir.path())
        .args(["remove", "nobody"])
        .assert()
        .failure();

    let content = std::fs::read_to_string(dir.path().join("audit.log")).unwrap();
    assert!(content.contains("\"action\":\"init\""));
    assert!(content.contains("\"action\":\"set\""));
    assert!(content.contains("\"outcome\":\"failure\""));
    assert!(!content.contains("s3cr3t-value"));
}

#[test]
fn log_filters_by_action() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["set", "username", "alice"])
        .assert()
        .success();

    seckit(dir.path())
        .args(["log", "--action", "set"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"))
        .stdout(predicate::str::contains("username"));
}

#[test]
fn log_rejects_unknown_action() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["log", "--action", "explode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown audit action"));
}

#[test]
fn audit_can_be_disabled() {
    let dir = initialized_home();
    let config = dir.path().join("config.toml");
    let content = std::fs::read_to_string(&config)
        .unwrap()
        .replace("enabled = true", "enabled = false");
    std::fs::write(&config, content).unwrap();
    std::fs::remove_file(dir.path().join("audit.log")).unwrap();

    seckit(dir.path())
        .args(["set", "username", "alice"])
        .assert()
        .success();

    assert!(!dir.path().join("audit.log").exists());
}

#[test]
fn demo_runs_every_feature() {
    let dir = initialized_home();

    seckit(dir.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Username: Some(\"alice\")"))
        .stdout(predicate::str::contains(
            "Round trip --> The sensitive information",
        ))
        .stdout(predicate::str::contains("Save success"))
        .stdout(predicate::str::contains("Pasted from 'CustomPasteboard'"));

    // Demo credentials are cleaned up, so a second run succeeds the same way.
    seckit(dir.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Username: Some(\"alice\")"));
}
