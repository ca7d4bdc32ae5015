use std::io::Read;
use std::time::Duration;

use http::{Request, Response as RawResponse};
use ureq::{Agent, Body};

use crate::errors::DeliveryError;

/// A fully prepared POST: target, headers and serialized body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl WebhookRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations must not interpret the status code; non-2xx answers are
/// returned as responses and classified by the client.
pub trait Transport: Send + Sync {
    fn post(&self, request: &WebhookRequest) -> Result<WebhookResponse, DeliveryError>;
}

/// Blocking HTTP transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Transport for UreqTransport {
    fn post(&self, request: &WebhookRequest) -> Result<WebhookResponse, DeliveryError> {
        let mut builder = Request::builder().method("POST").uri(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let raw = builder
            .body(request.body.clone())
            .map_err(|err| DeliveryError::Request(err.to_string()))?;
        let response = self
            .agent
            .run(raw)
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        read_response(response)
    }
}

fn read_response(resp: RawResponse<Body>) -> Result<WebhookResponse, DeliveryError> {
    let status = resp.status().as_u16();
    let mut reader = resp.into_body().into_reader();
    let mut body = Vec::new();
    reader
        .read_to_end(&mut body)
        .map_err(|err| DeliveryError::Read(err.to_string()))?;
    Ok(WebhookResponse { status, body })
}
