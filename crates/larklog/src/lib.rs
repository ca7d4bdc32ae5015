//! Structured logging to Lark (Feishu) group chats.
//!
//! ```no_run
//! use larklog::{ClientConfig, Logger, LoggerConfig, fields};
//!
//! let logger = Logger::new(
//!     "https://open.feishu.cn/open-apis/bot/v2/hook/<token>",
//!     ClientConfig::default(),
//!     LoggerConfig::default().with_service("api-gateway").with_title("System Monitor"),
//! );
//! logger.info("API Gateway initialized", fields! { "port" => 8080, "version" => "2.1.0" });
//! ```

pub mod config;
pub mod env;
pub mod logger;

pub use config::{ConfigError, LoggerConfig};
pub use env::EnvConfig;
pub use larklog_card::{
    Button, ButtonStyle, Card, CardBuilder, FieldValue, Fields, KvItem, LogLevel, MessageBody,
    fields,
};
pub use larklog_webhook::{
    ClientConfig, DeliveryError, MockTransport, Transport, UreqTransport, WebhookClient,
};
pub use logger::Logger;
