//! CLI integration tests for argtree
//!
//! These drive the binary end to end: definition loading, parsing, and
//! both output formats.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the argtree binary
fn argtree_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("argtree"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Writes an empty config so the user's global config is never picked up
fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();
    path
}

const DEPLOY: &str = r#"
name = "deploy"

[[option]]
short = "n"
long = "dry-run"
help = "show what would happen"

[[option]]
short = "p"
long = "port"
help = "port"
value = "integer"

[[subcommand]]
name = "service"
help = "Deploy a service"

[[subcommand.option]]
short = "r"
long = "replicas"
help = "replica count"
value = "integer"
"#;

fn write_definition(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("cli.toml");
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Usage
// =============================================================================

#[test]
fn test_no_command_prints_usage() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("usage: argtree"));
}

#[test]
fn test_help_flag_prints_usage() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("--config")
        .arg(empty_config(&dir))
        .args(["-h", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("usage: argtree"));
}

#[test]
fn test_unknown_flag_fails() {
    argtree_cmd()
        .arg("--bogus")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Unknown option: --bogus"));
}

#[test]
fn test_unexpected_argument_fails() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .args(["check", "stray"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected argument: stray"));
}

// =============================================================================
// Sample definition
// =============================================================================

#[test]
fn test_sample_prints_definition() {
    argtree_cmd()
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"checkout\""));
}

#[test]
fn test_parse_against_sample() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .args(["parse", "--", "--server=foo", "checkout", "-f", "extra1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command\tcheckout"))
        .stdout(predicate::str::contains("option\tserver\tfoo"))
        .stdout(predicate::str::contains("option\tforce\tx1"))
        .stdout(predicate::str::contains("extra\textra1"));
}

#[test]
fn test_parse_json_output() {
    let dir = TempDir::new().unwrap();
    let output = argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .args(["parse", "--format", "json", "--", "pos1", "checkout"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["path"], serde_json::json!([]));
    assert_eq!(json["extra"], serde_json::json!(["pos1", "checkout"]));
}

#[test]
fn test_parse_rejection_exit_code() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .args(["parse", "--", "--server"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Option --server requires a value"));
}

#[test]
fn test_parse_rejection_json() {
    let dir = TempDir::new().unwrap();
    let output = argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .args(["-f", "json", "parse", "--", "--unknown"])
        .assert()
        .failure()
        .code(2);

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    let json: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Unknown option: --unknown");
}

#[test]
fn test_commands_lists_tree() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .arg("commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("checkout\tCheckout files"))
        .stdout(predicate::str::contains("  commands\tlist all subcommands"));
}

// =============================================================================
// Definition files
// =============================================================================

#[test]
fn test_check_valid_definition() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, DEPLOY);

    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .arg("-d")
        .arg(&definition)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Definition 'deploy' is valid"));
}

#[test]
fn test_check_reports_definition_error() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(
        &dir,
        r#"
[[option]]
short = "x"

[[option]]
short = "x"
long = "again"
"#,
    );

    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .arg("--definition")
        .arg(&definition)
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Duplicate shortcut: -x"));
}

#[test]
fn test_missing_definition_file() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .arg("-d")
        .arg(dir.path().join("missing.toml"))
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read definition"));
}

#[test]
fn test_typed_values_from_definition() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, DEPLOY);

    let output = argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .arg("-d")
        .arg(&definition)
        .args(["parse", "-f", "json", "--", "-np", "8080", "service", "-r=3", "web"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["path"], serde_json::json!(["service"]));
    assert_eq!(json["matches"]["dry-run"]["occurrences"], 1);
    assert_eq!(json["matches"]["port"]["values"], serde_json::json!(["8080"]));
    assert_eq!(json["matches"]["replicas"]["values"], serde_json::json!(["3"]));
    assert_eq!(json["extra"], serde_json::json!(["web"]));
}

#[test]
fn test_invalid_typed_value_rejected() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, DEPLOY);

    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .arg("-d")
        .arg(&definition)
        .args(["parse", "--", "--port", "http"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid value for --port"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_sets_definition_and_format() {
    let dir = TempDir::new().unwrap();
    write_definition(&dir, DEPLOY);
    let config = dir.path().join("config.toml");
    fs::write(&config, "default_format = \"json\"\ndefinition = \"cli.toml\"\n").unwrap();

    let output = argtree_cmd()
        .arg("-c")
        .arg(&config)
        .args(["parse", "--", "service"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["path"], serde_json::json!(["service"]));
}

#[test]
fn test_format_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "default_format = \"json\"\n").unwrap();

    argtree_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-f", "text", "parse", "--", "checkin", "-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command\tcheckin"));
}

#[test]
fn test_bad_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "default_format = \"yaml\"\n").unwrap();

    argtree_cmd()
        .arg("-c")
        .arg(&config)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    argtree_cmd()
        .arg("-c")
        .arg(empty_config(&dir))
        .args(["-v", "parse", "--", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("command\tcheckout"))
        .stderr(predicate::str::contains("entering subcommand"));
}
