use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run seckit against an isolated home directory.
fn seckit(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("seckit");
    cmd.env_remove("SECKIT_HOME")
        .env_remove("RUST_LOG")
        .arg("--home")
        .arg(home);
    cmd
}

/// Create a temp dir with an initialized home inside it.
fn initialized_home() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    seckit(dir.path()).arg("init").assert().success();
    dir
}

#[test]
fn init_creates_home_files() {
    let dir = assert_fs::TempDir::new().unwrap();
    let home = dir.child("home");

    seckit(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated config.toml"));

    home.child("config.toml").assert(predicate::path::exists());
    home.child("identity.txt").assert(predicate::path::exists());
    home.child("audit.log").assert(predicate::path::exists());
}

#[test]
fn init_twice_fails() {
    let dir = initialized_home();

    seckit(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn commands_without_init_fail() {
    let dir = assert_fs::TempDir::new().unwrap();

    seckit(dir.path())
        .args(["get", "username"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn set_get_remove_scenario() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["set", "username", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored 'username'"));

    seckit(dir.path())
        .args(["get", "username"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));

    seckit(dir.path())
        .args(["remove", "username"])
        .assert()
        .success();

    seckit(dir.path())
        .args(["get", "username"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item not found"));
}

#[test]
fn store_file_does_not_leak_secrets() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["set", "password", "hunter2-very-secret"])
        .assert()
        .success();

    let raw = std::fs::read_to_string(dir.path().join("store.age")).unwrap();
    assert!(raw.contains("BEGIN AGE ENCRYPTED FILE"));
    assert!(!raw.contains("hunter2-very-secret"));
}

#[test]
fn duplicate_set_fails_and_keeps_first_value() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["set", "username", "alice"])
        .assert()
        .success();

    seckit(dir.path())
        .args(["set", "username", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item already exists"));

    seckit(dir.path())
        .args(["get", "username"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn empty_value_is_invalid_content() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["set", "username", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid content"));
}

#[test]
fn remove_missing_fails() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["remove", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item not found"));
}

#[test]
fn memory_store_does_not_persist_between_runs() {
    let dir = initialized_home();

    seckit(dir.path())
        .args(["--store", "memory", "set", "username", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memory store"));

    seckit(dir.path())
        .args(["--store", "memory", "get", "username"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item not found"));
}

#[test]
fn home_from_environment_variable() {
    let dir = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("seckit");
    cmd.env("SECKIT_HOME", dir.path())
        .arg("init")
        .assert()
        .success();

    dir.child("config.toml").assert(predicate::path::exists());
}
