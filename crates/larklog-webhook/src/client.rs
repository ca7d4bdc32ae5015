use std::thread;

use larklog_card::{Card, MessageBody};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::errors::DeliveryError;
use crate::transport::{Transport, UreqTransport, WebhookRequest, WebhookResponse};

/// Envelope every Lark webhook answers with. Older deployments use the
/// `StatusCode`/`StatusMessage` spelling.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default, alias = "StatusCode")]
    code: Option<i64>,
    #[serde(default, alias = "StatusMessage")]
    msg: Option<String>,
}

/// Posts messages to one webhook URL.
///
/// Each send makes up to `retry_count + 1` attempts, sleeping
/// `retry_delay` between them. Calls block the current thread.
pub struct WebhookClient<T = UreqTransport> {
    webhook_url: String,
    config: ClientConfig,
    transport: T,
}

impl WebhookClient<UreqTransport> {
    pub fn new(webhook_url: impl Into<String>, config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(webhook_url, config, transport)
    }
}

impl<T: Transport> WebhookClient<T> {
    pub fn with_transport(webhook_url: impl Into<String>, config: ClientConfig, transport: T) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            config,
            transport,
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send an interactive card.
    pub fn send_card(&self, card: &Card) -> Result<(), DeliveryError> {
        let body = MessageBody::card(card).to_vec()?;
        self.send_with_retry(body)
    }

    /// Send a plain text message.
    pub fn send_text(&self, text: &str) -> Result<(), DeliveryError> {
        let body = MessageBody::text(text).to_vec()?;
        self.send_with_retry(body)
    }

    fn send_with_retry(&self, body: Vec<u8>) -> Result<(), DeliveryError> {
        let request = WebhookRequest {
            url: self.webhook_url.clone(),
            headers: self.config.request_headers(),
            body,
        };
        let max_attempts = self.config.max_attempts();
        let mut attempt = 1;
        loop {
            debug!(
                target: "larklog",
                attempt,
                max_attempts,
                bytes = request.body.len(),
                "posting webhook message"
            );
            match self.send_once(&request) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(
                        target: "larklog",
                        attempt,
                        max_attempts,
                        error = %err,
                        "webhook delivery attempt failed"
                    );
                    if attempt >= max_attempts {
                        return Err(DeliveryError::RetriesExhausted {
                            retries: self.config.retry_count,
                            attempts: attempt,
                            source: Box::new(err),
                        });
                    }
                }
            }
            thread::sleep(self.config.retry_delay);
            attempt += 1;
        }
    }

    fn send_once(&self, request: &WebhookRequest) -> Result<(), DeliveryError> {
        let response = self.transport.post(request)?;
        check_response(&response)
    }
}

/// Classify a webhook answer: non-2xx is a status error, a body that is not
/// a JSON object is invalid, and a non-zero `code` is a rejection. A missing
/// `code` counts as success.
pub fn check_response(response: &WebhookResponse) -> Result<(), DeliveryError> {
    if !(200..300).contains(&response.status) {
        return Err(DeliveryError::Status {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }
    let parsed: ApiResponse = serde_json::from_slice(&response.body)
        .map_err(|err| DeliveryError::InvalidResponse(err.to_string()))?;
    match parsed.code {
        Some(code) if code != 0 => Err(DeliveryError::Rejected {
            code,
            msg: parsed
                .msg
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| "unknown error".to_string()),
        }),
        _ => Ok(()),
    }
}
