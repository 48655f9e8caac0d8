//! Integration tests for the toolgate binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MISSING_TOOL_CONFIG: &str = "maid.path: /definitely/not/here/maid\n";

/// A project directory plus a global config file inside it.
fn setup(global_config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("global.yml"), global_config).unwrap();
    temp
}

fn toolgate(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("toolgate"));
    cmd.current_dir(temp.path())
        .env_remove("TOOLGATE_CONFIG")
        .env_remove("TOOLGATE_PROMPT_MAID_MISSING")
        .arg("--config")
        .arg(temp.path().join("global.yml"))
        .arg("--project")
        .arg(temp.path());
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("toolgate"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("installed before you use it"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("toolgate"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn check_reports_missing_tool() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup(MISSING_TOOL_CONFIG);
    toolgate(&temp)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not available"));
    Ok(())
}

#[test]
fn check_json_reports_absent() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup(MISSING_TOOL_CONFIG);
    toolgate(&temp)
        .args(["check", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"present\": false"))
        .stdout(predicate::str::contains("/definitely/not/here/maid"));
    Ok(())
}

#[test]
fn ensure_non_interactive_gives_up_on_missing_tool() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup(MISSING_TOOL_CONFIG);
    toolgate(&temp)
        .args(["--non-interactive", "ensure"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn run_does_not_start_missing_tool() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup(MISSING_TOOL_CONFIG);
    toolgate(&temp)
        .args(["--non-interactive", "run", "build.maid"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn config_set_args_then_show() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup("");
    toolgate(&temp)
        .args(["config", "set-args", "--release", "--jobs=4"])
        .assert()
        .success();

    toolgate(&temp)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"--release\""))
        .stdout(predicate::str::contains("\"--jobs=4\""));

    let saved = fs::read_to_string(temp.path().join("global.yml"))?;
    assert!(saved.contains("maid.args"));
    Ok(())
}

#[test]
fn config_set_path_rejects_broken_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup("");
    toolgate(&temp)
        .args(["config", "set-path", "/definitely/not/here/maid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not respond"));

    let saved = fs::read_to_string(temp.path().join("global.yml"))?;
    assert!(!saved.contains("maid.path"));
    Ok(())
}

#[test]
fn config_show_defaults_as_yaml() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup("");
    toolgate(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("tool: maid"))
        .stdout(predicate::str::contains("path: maid"));
    Ok(())
}

#[test]
fn unknown_tool_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup("");
    toolgate(&temp)
        .args(["--tool", "nope", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown tool 'nope'"));
    Ok(())
}

#[test]
fn broken_config_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup("maid.path: [unclosed\n");
    toolgate(&temp).arg("check").assert().failure();
    Ok(())
}
