//! CLI smoke tests for the club-server binary.

use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_club_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_club-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute club-server")
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

fn valid_config(dir: &TempDir) -> String {
    let home = dir.path().join("home");
    write_config(
        dir,
        "valid.yaml",
        &format!(
            r#"
server:
  home_dir: "{}"
  host: "127.0.0.1"
  port: 8095

database:
  url: "sqlite://data/club.db"

logging:
  default:
    console_level: "off"
    file: "logs/club-server.log"
"#,
            home.to_string_lossy()
        ),
    )
}

#[test]
fn help_lists_subcommands_and_config_flag() {
    let output = run_club_server(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("club-server"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
}

#[test]
fn version_prints_binary_name() {
    let output = run_club_server(&["--version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("club-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn unknown_subcommand_fails() {
    let output = run_club_server(&["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn missing_config_file_fails() {
    let output = run_club_server(&["--config", "/nonexistent/config.yaml", "check"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn malformed_yaml_fails_check() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "broken.yaml", "server: [unclosed");

    let output = run_club_server(&["--config", &path, "check"]);
    assert!(!output.status.success());
}

#[test]
fn check_passes_with_valid_config() {
    let dir = TempDir::new().unwrap();
    let path = valid_config(&dir);

    let output = run_club_server(&["--config", &path, "check"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
}

#[test]
fn check_rejects_unsupported_database_scheme() {
    let dir = TempDir::new().unwrap();
    let home = dir.path().join("home");
    let path = write_config(
        &dir,
        "bad-db.yaml",
        &format!(
            r#"
server:
  home_dir: "{}"
  host: "127.0.0.1"
  port: 8095

database:
  url: "mysql://localhost/club"
"#,
            home.to_string_lossy()
        ),
    );

    let output = run_club_server(&["--config", &path, "check"]);
    assert!(!output.status.success());
}

#[test]
fn print_config_emits_yaml() {
    let dir = TempDir::new().unwrap();
    let path = valid_config(&dir);

    let output = run_club_server(&["--config", &path, "--print-config"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("server:"));
    assert!(stdout.contains("port: 8095"));
}
