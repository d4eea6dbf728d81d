use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hobbyist_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hobbyist"));
    cmd.env_remove("HOBBYIST_CONFIG").env_remove("PORT");
    cmd
}

#[test]
fn test_help() {
    hobbyist_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphQL"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_version() {
    hobbyist_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hobbyist"));
}

#[test]
fn test_invalid_port_is_rejected() {
    hobbyist_cmd()
        .args(["--port", "http"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    hobbyist_cmd()
        .env("HOBBYIST_CONFIG", temp_dir.path().join("absent.toml"))
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_corrupt_store_fails_before_serving() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".hobbyist.toml"),
        "[store]\nbackend = \"file\"\npath = \"data\"\n",
    )
    .unwrap();
    std::fs::create_dir(temp_dir.path().join("data")).unwrap();
    std::fs::write(temp_dir.path().join("data").join("users.json"), "not json").unwrap();

    hobbyist_cmd()
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open store"));
}
