use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("gymtrack")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_signup_help_shows_flags() {
    cargo_bin_cmd!("gymtrack")
        .args(["signup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--email"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("gymtrack")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_app_requires_terminal() {
    let home = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("gymtrack")
        .env("GYMTRACK_HOME", home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
