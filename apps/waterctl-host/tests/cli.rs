//! Integration tests for the waterctl-host binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens on the discard port, and these tests never reach it.
const OFFLINE_URL: &str = "http://127.0.0.1:9";

/// Command isolated from the user's config files and `WATERCTL_*` env.
fn host_cmd(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("waterctl-host");
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("WATERCTL_BRIDGE_URL")
        .env_remove("WATERCTL_REQUEST_TIMEOUT_SECS")
        .env_remove("WATERCTL_HEALTH_TIMEOUT_SECS")
        .env_remove("WATERCTL_LOG_LEVEL")
        .env_remove("WATERCTL_LOG_JSON")
        .current_dir(home.path());
    cmd
}

/// URL of a local port with nothing listening on it.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn offline(home: &TempDir) -> Command {
    let mut cmd = host_cmd(home);
    cmd.args(["--skip-health-check", "--bridge-url", OFFLINE_URL]);
    cmd
}

#[test]
fn bare_command_prints_help() {
    let home = TempDir::new().unwrap();
    offline(&home)
        .args(["exec", "/waterctl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/waterctl scan"))
        .stdout(predicate::str::contains("/waterctl connect <address>"))
        .stdout(predicate::str::contains("/waterctl status"))
        .stdout(predicate::str::contains(OFFLINE_URL));
}

#[test]
fn exec_prefixes_bare_subcommand() {
    let home = TempDir::new().unwrap();
    offline(&home)
        .args(["exec", "connect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please provide a device address"));
}

#[test]
fn unknown_subcommand_is_named() {
    let home = TempDir::new().unwrap();
    offline(&home)
        .args(["exec", "waterctl", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command: foo"))
        .stdout(predicate::str::contains("/waterctl"));
}

#[test]
fn trailing_slash_is_stripped_from_bridge_url() {
    let home = TempDir::new().unwrap();
    host_cmd(&home)
        .args(["--skip-health-check", "--bridge-url", "http://127.0.0.1:9/"])
        .args(["exec", "waterctl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bridge address: http://127.0.0.1:9\n"));
}

#[test]
fn commands_lists_waterctl() {
    let home = TempDir::new().unwrap();
    offline(&home)
        .arg("commands")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/waterctl - "));
}

#[test]
fn repl_dispatches_lines_until_quit() {
    let home = TempDir::new().unwrap();
    offline(&home)
        .arg("repl")
        .write_stdin("waterctl connect\n\n/weather today\nquit\n/waterctl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please provide a device address"))
        .stdout(predicate::str::contains("Unknown command: weather"))
        .stdout(predicate::str::contains("waterctl"))
        .stdout(predicate::str::contains("Usage").not());
}

#[test]
fn config_init_creates_file() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("waterctl.json");

    host_cmd(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["bridge_url"], "http://localhost:5000");
    assert_eq!(value["request_timeout_secs"], 10);
}

#[test]
fn config_init_global_writes_under_config_home() {
    let home = TempDir::new().unwrap();

    host_cmd(&home)
        .args(["config", "init", "--global"])
        .assert()
        .success();

    assert!(home.path().join("waterctl").join("waterctl.json").exists());
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("waterctl.json");
    std::fs::write(&config_path, r#"{"bridge_url":"http://pi.local:5000"}"#).unwrap();

    host_cmd(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("pi.local"));

    host_cmd(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("localhost:5000"));
}

#[test]
fn config_show_merges_file_and_env() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("waterctl.json"),
        r#"{"bridge_url":"http://pi.local:5000","request_timeout_secs":20}"#,
    )
    .unwrap();

    let output = host_cmd(&home)
        .env("WATERCTL_HEALTH_TIMEOUT_SECS", "7")
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["bridge_url"], "http://pi.local:5000");

    let stderr = String::from_utf8(output.stderr).unwrap();
    let local = home.path().join("waterctl.json");
    assert!(stderr.contains(&format!("local: {}", local.display())), "{stderr}");
    assert!(stderr.contains("global: "), "{stderr}");
    assert!(stderr.contains("(not found)"), "{stderr}");
    assert_eq!(value["request_timeout_secs"], 20);
    assert_eq!(value["health_timeout_secs"], 7);
}

#[test]
fn config_show_reports_advisory_warnings() {
    let home = TempDir::new().unwrap();

    host_cmd(&home)
        .env("WATERCTL_BRIDGE_URL", "pi.local:5000/")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bridge_url\": \"pi.local:5000\""))
        .stderr(predicate::str::contains("bridge_url.invalid"));
}

#[tokio::test(flavor = "multi_thread")]
async fn exec_status_against_bridge() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connected": true,
            "device_address": "AA:BB:CC:DD:EE:FF"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    host_cmd(&home)
        .args(["--bridge-url", &server.uri(), "exec", "waterctl", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("connected"))
        .stdout(predicate::str::contains("AA:BB:CC:DD:EE:FF"))
        .stdout(predicate::str::contains(server.uri()));
}

#[test]
fn unreachable_bridge_does_not_stop_startup() {
    let uri = closed_port_url();

    let home = TempDir::new().unwrap();
    host_cmd(&home)
        .args(["--bridge-url", &uri, "exec", "waterctl", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation failed"))
        .stdout(predicate::str::contains("cannot connect to bridge"));
}
