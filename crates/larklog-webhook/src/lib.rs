//! Lark webhook delivery.
//!
//! [`WebhookClient`] serializes cards or plain text, posts them through a
//! [`Transport`] and retries failed attempts a bounded number of times with a
//! fixed delay. A 2xx status alone is not success: the response body must
//! carry a zero `code`.

pub mod client;
pub mod config;
pub mod errors;
pub mod mock;
pub mod transport;

pub use client::{WebhookClient, check_response};
pub use config::{ClientConfig, DEFAULT_USER_AGENT};
pub use errors::DeliveryError;
pub use mock::{MockReply, MockTransport};
pub use transport::{Transport, UreqTransport, WebhookRequest, WebhookResponse};
