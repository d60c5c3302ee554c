//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points POMOPLAN_CONFIG_DIR at a scratch directory so the user's real
//! config is never touched.

use std::path::PathBuf;
use std::process::Command;

fn scratch_config_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pomoplan-cli-test-{label}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create scratch config dir");
    dir
}

/// Run a CLI command against an isolated config dir and return output.
fn run_cli(label: &str, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "pomoplan-cli", "--"])
        .args(args)
        .env("POMOPLAN_CONFIG_DIR", scratch_config_dir(label))
        .env_remove("POMOPLAN_API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status() {
    let (stdout, _stderr, code) = run_cli("timer-status", &["timer", "status"]);
    assert_eq!(code, 0, "Timer status failed");

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("status output should be JSON");
    assert_eq!(parsed["type"], "StateSnapshot");
    assert_eq!(parsed["state"], "idle");
    assert_eq!(parsed["mode"], "focus");
    assert_eq!(parsed["remaining_secs"], 25 * 60);
}

#[test]
fn test_config_get_default() {
    let (stdout, _stderr, code) =
        run_cli("config-get", &["config", "get", "timer.pomodoro_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_set_then_get() {
    let label = "config-set";
    let (_stdout, _stderr, code) =
        run_cli(label, &["config", "set", "timer.auto_start_breaks", "true"]);
    assert_eq!(code, 0, "Config set failed");

    let (stdout, _stderr, code) =
        run_cli(label, &["config", "get", "timer.auto_start_breaks"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_stdout, stderr, code) =
        run_cli("config-unknown", &["config", "get", "timer.no_such_key"]);
    assert_ne!(code, 0, "Unknown key should fail");
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _stderr, code) = run_cli("config-list", &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("list output should be JSON");
    assert!(parsed["timer"].is_object());
    assert!(parsed["planner"].is_object());
}

#[test]
fn test_plan_without_credential_prints_no_suggestions() {
    let (stdout, _stderr, code) = run_cli("plan", &["plan", "write the weekly update"]);
    assert_eq!(code, 0, "Plan without credential should still succeed");
    assert_eq!(stdout.trim(), "no suggestions");
}

#[test]
fn test_plan_json_without_credential_prints_empty_array() {
    let (stdout, _stderr, code) =
        run_cli("plan-json", &["plan", "--json", "write the weekly update"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("plan --json output should be JSON");
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn test_completions_bash() {
    let (stdout, _stderr, code) = run_cli("completions", &["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("pomoplan-cli"));
}
