//! End-to-end tests for the `calico-st` binary.
//!
//! The binary is driven through `std::process::Command`; calicoctl and docker
//! are replaced by small shell scripts written to a temp dir.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn calico_st() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_calico-st"));
    // 호출 환경의 설정이 테스트에 섞이지 않도록 제거
    for key in [
        "MY_IP",
        "RUST_LOG",
        "CALICO_ST_GENERAL_LOG_LEVEL",
        "CALICO_ST_GENERAL_LOG_FORMAT",
        "CALICO_ST_HOST_HOSTNAME",
        "CALICO_ST_HOST_CALICOCTL",
        "CALICO_ST_HOST_DOCKER",
        "CALICO_ST_HOST_PROBE_TARGET",
        "CALICO_ST_RETRY_RETRIES",
        "CALICO_ST_RETRY_INTERVAL_MS",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("CALICO_ST_GENERAL_LOG_LEVEL", "error");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("should write script");
    let mut perms = fs::metadata(&path).expect("should stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("should chmod script");
    path
}

#[test]
fn ip_prints_override() {
    let output = calico_st()
        .args(["ip"])
        .env("MY_IP", "203.0.113.5")
        .output()
        .expect("should run calico-st");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "203.0.113.5\n");
}

#[test]
fn ip_json_reports_source() {
    let output = calico_st()
        .args(["--output", "json", "ip"])
        .env("MY_IP", "203.0.113.5")
        .output()
        .expect("should run calico-st");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["ip"], "203.0.113.5");
    assert_eq!(value["source"], "override");
}

#[test]
fn run_prints_trimmed_output() {
    let output = calico_st()
        .args(["run", "echo hi; echo oops >&2"])
        .output()
        .expect("should run calico-st");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "hi\noops\n");
}

#[test]
fn failing_run_exits_with_command_code() {
    let output = calico_st()
        .args(["run", "--retries", "0", "echo broken; exit 7"])
        .output()
        .expect("should run calico-st");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken"), "stderr: {stderr}");
}

#[test]
fn config_validate_accepts_valid_file() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("calico-st.toml");
    fs::write(&path, "[retry]\nretries = 3\ninterval_ms = 10\n").expect("should write config");

    let output = calico_st()
        .args(["--output", "json", "config", "validate", "-c"])
        .arg(&path)
        .output()
        .expect("should run calico-st");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["valid"], true);
}

#[test]
fn config_validate_reports_invalid_file() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("calico-st.toml");
    fs::write(&path, "[retry]\nretries = 100000\n").expect("should write config");

    let output = calico_st()
        .args(["--output", "json", "config", "validate", "-c"])
        .arg(&path)
        .output()
        .expect("should run calico-st");

    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["valid"], false);
    assert!(value["errors"][0].as_str().unwrap().contains("retry.retries"));
}

#[test]
fn missing_config_file_is_config_error() {
    let output = calico_st()
        .args(["-c", "/nonexistent/calico-st.toml", "run", "true"])
        .output()
        .expect("should run calico-st");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn check_profile_uses_configured_calicoctl() {
    let dir = TempDir::new().expect("should create temp dir");
    let calicoctl = write_script(
        dir.path(),
        "calicoctl",
        "echo '+------+'; echo '| Name |'; echo '+------+'; echo '| TEST_GROUP |'",
    );

    let output = calico_st()
        .args(["--output", "json", "check", "profile", "TEST_GROUP"])
        .env("CALICO_ST_HOST_CALICOCTL", &calicoctl)
        .output()
        .expect("should run calico-st");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["passed"], true);
    assert_eq!(value["attempts"], 1);
}

#[test]
fn failed_check_exits_one() {
    let dir = TempDir::new().expect("should create temp dir");
    let calicoctl = write_script(dir.path(), "calicoctl", "echo '| other |'");

    let output = calico_st()
        .args([
            "check",
            "profile",
            "TEST_GROUP",
            "--retries",
            "1",
            "--interval-ms",
            "0",
        ])
        .env("CALICO_ST_HOST_CALICOCTL", &calicoctl)
        .output()
        .expect("should run calico-st");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Profile TEST_GROUP not found in Calico"), "stderr: {stderr}");
}

#[test]
fn check_endpoints_with_hostname_flag() {
    let dir = TempDir::new().expect("should create temp dir");
    let calicoctl = write_script(
        dir.path(),
        "calicoctl",
        "echo '| node-1 | docker | 2 | 2 |'",
    );

    let output = calico_st()
        .args(["check", "endpoints", "2", "--hostname", "node-1"])
        .env("CALICO_ST_HOST_CALICOCTL", &calicoctl)
        .output()
        .expect("should run calico-st");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn profile_name_reads_network_id() {
    let dir = TempDir::new().expect("should create temp dir");
    let docker = write_script(
        dir.path(),
        "docker",
        r#"echo '[{"Name": "net1", "Id": "f00dfeed", "Driver": "calico"}]'"#,
    );

    let output = calico_st()
        .args(["profile-name", "net1"])
        .env("CALICO_ST_HOST_DOCKER", &docker)
        .output()
        .expect("should run calico-st");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "f00dfeed\n");
}
