use std::sync::Arc;

use larklog_card::{Card, CardBuilder, ConfigGrid, FieldValue, Fields, LogLevel, kv_items};
use larklog_webhook::{ClientConfig, DeliveryError, Transport, UreqTransport, WebhookClient};
use tracing::error;

use crate::config::LoggerConfig;

/// Turns log events into cards and delivers them.
///
/// Logging never fails from the caller's point of view: delivery errors are
/// reported as `tracing` events on the `larklog` target. Use
/// [`Logger::try_log`] to observe them directly.
pub struct Logger<T = UreqTransport> {
    client: Arc<WebhookClient<T>>,
    config: LoggerConfig,
}

impl<T> Clone for Logger<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
        }
    }
}

impl Logger<UreqTransport> {
    pub fn new(webhook_url: impl Into<String>, client: ClientConfig, config: LoggerConfig) -> Self {
        Self::with_client(WebhookClient::new(webhook_url, client), config)
    }
}

impl<T: Transport> Logger<T> {
    /// Wrap an existing client. Several loggers may share one client.
    pub fn with_client(client: impl Into<Arc<WebhookClient<T>>>, config: LoggerConfig) -> Self {
        Self {
            client: client.into(),
            config,
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn client(&self) -> &WebhookClient<T> {
        &self.client
    }

    /// Build the card for one event without sending it.
    pub fn card(&self, level: LogLevel, message: &str, fields: &Fields) -> Card {
        let emoji = level.emoji();
        let subtitle = if self.config.emoji_subtitle {
            format!("{emoji} {message}")
        } else {
            message.to_string()
        };

        let mut builder = CardBuilder::new()
            .header(&format!("{emoji} {}", self.config.title), level.template())
            .subtitle(&subtitle)
            .timestamp();

        if self.config.show_config {
            let grid = ConfigGrid {
                level: level.as_str().to_string(),
                service: self.config.service.clone(),
                environment: self.config.environment.clone(),
                hostname: self.config.hostname.clone(),
            };
            builder = builder.divider().config_grid(&grid);
        }
        if !fields.is_empty() {
            builder = builder.divider().kv_table(&kv_items(fields));
        }
        if !self.config.buttons.is_empty() {
            builder = builder.divider().buttons(&self.config.buttons);
        }
        builder.build()
    }

    /// Build and send, returning the delivery outcome.
    pub fn try_log(
        &self,
        level: LogLevel,
        message: &str,
        fields: impl Into<Fields>,
    ) -> Result<(), DeliveryError> {
        let card = self.card(level, message, &fields.into());
        self.client.send_card(&card)
    }

    pub fn log(&self, level: LogLevel, message: &str, fields: impl Into<Fields>) {
        if let Err(err) = self.try_log(level, message, fields) {
            error!(
                target: "larklog",
                level = level.as_str(),
                log_message = message,
                attempts = err.attempts(),
                error = %err,
                "failed to send log to lark"
            );
        }
    }

    pub fn info(&self, message: &str, fields: impl Into<Fields>) {
        self.log(LogLevel::Info, message, fields);
    }

    pub fn warn(&self, message: &str, fields: impl Into<Fields>) {
        self.log(LogLevel::Warn, message, fields);
    }

    pub fn error(&self, message: &str, fields: impl Into<Fields>) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Log with a flat `key, value, key, value, ...` argument list.
    /// See [`Fields::from_pairs`] for how odd lists and non-text keys are
    /// handled.
    pub fn infof<I, V>(&self, message: &str, args: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.log(LogLevel::Info, message, Fields::from_pairs(args));
    }

    pub fn warnf<I, V>(&self, message: &str, args: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.log(LogLevel::Warn, message, Fields::from_pairs(args));
    }

    pub fn errorf<I, V>(&self, message: &str, args: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.log(LogLevel::Error, message, Fields::from_pairs(args));
    }
}
