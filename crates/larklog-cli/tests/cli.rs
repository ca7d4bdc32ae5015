use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn larklog() -> Command {
    let mut cmd = Command::cargo_bin("larklog").unwrap();
    cmd.env_remove("LARK_WEBHOOK_URL")
        .env_remove("LARK_TEST_MODE")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is json")
}

#[test]
fn help_lists_subcommands() {
    larklog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("text"));
}

#[test]
fn dry_run_prints_card_payload() {
    let body = stdout_json(larklog().args([
        "send",
        "--level",
        "warn",
        "--message",
        "High memory usage",
        "--title",
        "System Monitor",
        "--field",
        "memory_usage=85%",
        "--field",
        "threshold=80",
        "--dry-run",
    ]));
    assert_eq!(body["msg_type"], "interactive");
    assert_eq!(body["card"]["header"]["title"]["content"], "⚠️ System Monitor");
    assert_eq!(body["card"]["header"]["template"], "orange");
    let text = body.to_string();
    assert!(text.contains("**memory_usage**"));
    assert!(text.contains("85%"));
}

#[test]
fn missing_webhook_url_falls_back_to_printing() {
    let body = stdout_json(larklog().args(["text", "deploy finished"]));
    assert_eq!(body["msg_type"], "text");
    assert_eq!(body["content"]["text"], "deploy finished");
}

#[test]
fn config_grid_and_confirm_button() {
    let body = stdout_json(larklog().args([
        "send",
        "--level",
        "error",
        "-m",
        "Payment failed",
        "--service",
        "payment-service",
        "--env",
        "production",
        "--hostname",
        "pay-01",
        "--show-config",
        "--button",
        "Rollback=https://ops.example.com/rollback,confirm",
        "--dry-run",
    ]));
    let text = body.to_string();
    assert!(text.contains("payment-service"));
    assert!(text.contains("pay-01"));
    let elements = body["card"]["elements"].as_array().expect("elements");
    let action = elements.last().expect("button row");
    assert_eq!(action["actions"][0]["type"], "danger");
    assert!(action["actions"][0]["confirm"].is_object());
}

#[test]
fn rejects_unknown_level() {
    larklog()
        .args(["send", "--level", "fatal", "-m", "x", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fatal"));
}

#[test]
fn rejects_invalid_button_url() {
    larklog()
        .args(["send", "-m", "x", "--button", "Logs=ftp://logs", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid logger configuration"));
}

#[test]
fn unreachable_webhook_fails_after_retries() {
    larklog()
        .env("LARK_WEBHOOK_URL", "http://127.0.0.1:9/hook")
        .args(["text", "hello", "--retries", "0", "--timeout", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to deliver text message"))
        .stderr(predicate::str::contains("0 retries (1 attempts)"));
}
