use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::errors::DeliveryError;
use crate::transport::{Transport, WebhookRequest, WebhookResponse};

pub const SUCCESS_BODY: &str = r#"{"code":0,"msg":"success"}"#;

/// What the mock answers for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    Respond { status: u16, body: String },
    Fail(String),
}

impl MockReply {
    pub fn ok() -> Self {
        Self::respond(200, SUCCESS_BODY)
    }

    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
        }
    }

    fn to_result(&self) -> Result<WebhookResponse, DeliveryError> {
        match self {
            MockReply::Respond { status, body } => Ok(WebhookResponse {
                status: *status,
                body: body.clone().into_bytes(),
            }),
            MockReply::Fail(message) => Err(DeliveryError::Transport(message.clone())),
        }
    }
}

#[derive(Debug)]
struct MockState {
    script: VecDeque<MockReply>,
    fallback: MockReply,
    history: Vec<WebhookRequest>,
}

/// In-memory transport that replays scripted replies and records every
/// request. Clones share state, so a test can keep a handle after moving one
/// into a client.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::with_fallback(MockReply::ok())
    }
}

impl MockTransport {
    pub fn with_fallback(fallback: MockReply) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                script: VecDeque::new(),
                fallback,
                history: Vec::new(),
            })),
        }
    }

    /// Always answers `{"code":0,"msg":"success"}`.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Every attempt fails at the transport layer.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_fallback(MockReply::Fail(message.into()))
    }

    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        Self::with_fallback(MockReply::respond(status, body))
    }

    /// Queue a reply used before the fallback.
    pub fn then(self, reply: MockReply) -> Self {
        self.lock().script.push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.lock().history.len()
    }

    pub fn requests(&self) -> Vec<WebhookRequest> {
        self.lock().history.clone()
    }

    /// Recorded bodies parsed as JSON; unparsable bodies become `Null`.
    pub fn bodies(&self) -> Vec<Value> {
        self.lock()
            .history
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap_or(Value::Null))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MockTransport {
    fn post(&self, request: &WebhookRequest) -> Result<WebhookResponse, DeliveryError> {
        let mut state = self.lock();
        state.history.push(request.clone());
        let reply = state
            .script
            .pop_front()
            .unwrap_or_else(|| state.fallback.clone());
        reply.to_result()
    }
}
