use std::sync::Arc;
use std::thread;
use std::time::Duration;

use larklog::{
    Button, ButtonStyle, ClientConfig, FieldValue, Fields, LogLevel, Logger, LoggerConfig,
    MockTransport, WebhookClient, fields,
};
use serde_json::{Value, json};

fn logger(mock: &MockTransport, config: LoggerConfig) -> Logger<MockTransport> {
    let client = WebhookClient::with_transport(
        "http://hook.test/v2/bot",
        ClientConfig::default().with_retry(0, Duration::ZERO),
        mock.clone(),
    );
    Logger::with_client(client, config)
}

fn elements(body: &Value) -> &Vec<Value> {
    body["card"]["elements"].as_array().expect("elements")
}

fn table_rows(body: &Value) -> Vec<(String, String)> {
    elements(body)
        .iter()
        .filter(|element| element["tag"] == "column_set")
        .map(|row| {
            let cell = |idx: usize| {
                row["columns"][idx]["elements"][0]["content"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string()
            };
            (cell(0), cell(1))
        })
        .collect()
}

#[test]
fn info_card_end_to_end() {
    let mock = MockTransport::ok();
    let log = logger(
        &mock,
        LoggerConfig::default()
            .with_title("System Monitor")
            .with_show_config(false),
    );

    log.info(
        "API Gateway initialized",
        fields! { "port" => 8080, "version" => "2.1.0" },
    );

    assert_eq!(mock.calls(), 1);
    let body = &mock.bodies()[0];
    assert_eq!(body["msg_type"], "interactive");
    assert_eq!(body["card"]["header"]["title"]["content"], "ℹ️ System Monitor");
    assert_eq!(body["card"]["header"]["template"], "blue");

    let elements = elements(body);
    let subtitle = elements[0]["text"]["content"].as_str().expect("subtitle");
    assert!(subtitle.contains("API Gateway initialized"));
    let timestamp = &elements[1];
    assert_eq!(timestamp["text_align"], "right");
    assert!(timestamp["text"]["content"].as_str().expect("ts").contains("⏰"));

    let rows = table_rows(body);
    assert_eq!(
        rows,
        vec![
            ("**Key**".to_string(), "**Value**".to_string()),
            ("**port**".to_string(), "8080".to_string()),
            ("**version**".to_string(), "2.1.0".to_string()),
        ]
    );
}

#[test]
fn config_grid_and_buttons_follow_the_table() {
    let mock = MockTransport::ok();
    let config = LoggerConfig::default()
        .with_service("payment-service")
        .with_environment("production")
        .with_hostname("pay-01")
        .with_show_config(true)
        .with_buttons(vec![
            Button::new("View Logs", "https://logs.example.com/payment"),
            Button::new("Rollback", "https://ops.example.com/rollback")
                .with_style(ButtonStyle::Primary)
                .with_confirm(true),
        ]);
    let log = logger(&mock, config);
    log.error("Payment failed", fields! { "order_id" => "A-1001" });

    let body = &mock.bodies()[0];
    assert_eq!(body["card"]["header"]["template"], "red");
    let rows = table_rows(body);
    assert_eq!(rows[0], ("**Level**".into(), "**Service**".into()));
    assert_eq!(rows[1], ("ERROR".into(), "payment-service".into()));
    assert_eq!(rows[2], ("**Environment**".into(), "**Hostname**".into()));
    assert_eq!(rows[3], ("production".into(), "pay-01".into()));
    assert_eq!(rows[5], ("**order_id**".into(), "A-1001".into()));

    let action = elements(body).last().expect("button row");
    assert_eq!(action["tag"], "action");
    assert_eq!(action["actions"][0]["type"], "primary");
    assert_eq!(action["actions"][1]["type"], "danger");
    assert_eq!(
        action["actions"][1]["confirm"]["text"]["content"],
        json!("Are you sure you want to \"Rollback\"?")
    );
}

#[test]
fn infof_with_odd_arguments_keeps_trailing_value() {
    let mock = MockTransport::ok();
    let log = logger(&mock, LoggerConfig::default());
    log.infof(
        "Cache warmed",
        vec![
            FieldValue::from("entries"),
            FieldValue::from(1024),
            FieldValue::from("done"),
        ],
    );
    let rows = table_rows(&mock.bodies()[0]);
    assert_eq!(
        &rows[1..],
        &[
            ("**entries**".to_string(), "1024".to_string()),
            ("**extra_1**".to_string(), "done".to_string()),
        ]
    );
}

#[test]
fn failing_webhook_never_panics_the_caller() {
    let mock = MockTransport::responding(200, r#"{"code":19024,"msg":"Key Words Not Found"}"#);
    let log = logger(&mock, LoggerConfig::default());
    log.warn("quiet failure", ());
    log.errorf("still quiet", Vec::<FieldValue>::new());
    assert_eq!(mock.calls(), 2);

    let err = log
        .try_log(LogLevel::Warn, "loud failure", Fields::new())
        .expect_err("rejected");
    assert!(err.to_string().contains("Key Words Not Found"));
}

#[test]
fn shared_logger_across_threads() {
    let mock = MockTransport::ok();
    let log = Arc::new(logger(&mock, LoggerConfig::default()));
    let handles: Vec<_> = (0..4)
        .map(|idx| {
            let log = Arc::clone(&log);
            thread::spawn(move || log.info("worker done", fields! { "worker" => idx }))
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker");
    }
    assert_eq!(mock.calls(), 4);
}
