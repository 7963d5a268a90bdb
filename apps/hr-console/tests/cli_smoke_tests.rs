//! CLI smoke tests for the hr-console binary
//!
//! Every run gets its own HOME so the default home directory and log files
//! land in a temporary location.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn run_hr_console(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hr-console"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("APP__BACKEND__URL")
        .env_remove("APP__BACKEND__ANON_KEY")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute hr-console")
}

#[test]
fn test_cli_help_command() {
    let home = TempDir::new().unwrap();
    let output = run_hr_console(&home, &["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    for sub in ["list", "add", "toggle", "shell", "check"] {
        assert!(stdout.contains(sub), "Should contain '{sub}' subcommand");
    }
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let home = TempDir::new().unwrap();
    let output = run_hr_console(&home, &["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hr-console"), "Should contain binary name");
}

#[test]
fn test_cli_invalid_command() {
    let home = TempDir::new().unwrap();
    let output = run_hr_console(&home, &["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn test_mock_list_shows_first_page() {
    let home = TempDir::new().unwrap();
    let output = run_hr_console(&home, &["--mock", "list"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("John Smith"));
    assert!(!stdout.contains("Robert Taylor"), "fifth employee is on page 2");
    assert!(stdout.contains("Page 1 of 2"));
}

#[test]
fn test_mock_list_search_and_page() {
    let home = TempDir::new().unwrap();
    let output = run_hr_console(&home, &["--mock", "list", "--page", "2"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Robert Taylor"));

    let output = run_hr_console(&home, &["--mock", "list", "--search", "nobody"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No employees found"));
    assert!(stdout.contains("Try adjusting your search."));
}

#[test]
fn test_mock_add_and_toggle() {
    let home = TempDir::new().unwrap();
    let output = run_hr_console(
        &home,
        &["--mock", "add", "--name", "Ada Lovelace", "--email", "ada@company.com"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Success"));
    assert!(stdout.contains("login: "));

    let output = run_hr_console(&home, &["--mock", "toggle", "1"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("John Smith is now inactive."));

    let output = run_hr_console(&home, &["--mock", "toggle", "4"]);
    assert!(!output.status.success(), "on-leave has no toggle");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Status Update Failed"));
}

#[test]
fn test_mock_add_requires_name() {
    let home = TempDir::new().unwrap();
    let output = run_hr_console(&home, &["--mock", "add", "--name", "", "--email", "x@y.z"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Name and Email are required."));
}

#[test]
fn test_check_with_config_file() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("hr.yaml");
    let mut f = std::fs::File::create(&config_path).unwrap();
    writeln!(
        f,
        "console:\n  home_dir: {}\nbackend:\n  url: https://abc.supabase.co\n  anon_key: key\n  timeout: 5s\nmodules:\n  employees_info:\n    page_size: 10\n    orphan_policy: compensate",
        home.path().join("data").display()
    )
    .unwrap();

    let output = run_hr_console(&home, &["--config", config_path.to_str().unwrap(), "check"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("page_size=10"));
    assert!(stdout.contains("Compensate"));
}

#[test]
fn test_check_rejects_unknown_module_keys() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("hr.yaml");
    std::fs::write(
        &config_path,
        "modules:\n  employees_info:\n    pagesize: 10\n",
    )
    .unwrap();

    let output = run_hr_console(&home, &["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
}

#[test]
fn test_mock_shell_session() {
    let home = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_hr-console"))
        .args(["--mock", "shell"])
        .env("HOME", home.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn hr-console");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"next\nsearch market\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Robert Taylor"));
    assert!(stdout.contains("Sarah Johnson"));
}
