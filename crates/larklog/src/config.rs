use larklog_card::Button;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVICE: &str = "default-service";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_TITLE: &str = "System Log";

fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_hostname() -> String {
    DEFAULT_HOSTNAME.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// What a [`crate::Logger`] stamps on every card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    #[serde(default = "default_service")]
    pub service: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Header text, shown after the level emoji.
    #[serde(default = "default_title")]
    pub title: String,
    /// Render the level/service/environment/hostname grid.
    #[serde(default)]
    pub show_config: bool,
    /// Prefix the subtitle with the level emoji as well.
    #[serde(default)]
    pub emoji_subtitle: bool,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            environment: default_environment(),
            hostname: default_hostname(),
            title: default_title(),
            show_config: false,
            emoji_subtitle: false,
            buttons: Vec::new(),
        }
    }
}

impl LoggerConfig {
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_show_config(mut self, show_config: bool) -> Self {
        self.show_config = show_config;
        self
    }

    pub fn with_emoji_subtitle(mut self, emoji_subtitle: bool) -> Self {
        self.emoji_subtitle = emoji_subtitle;
        self
    }

    /// Replace the button list.
    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        for button in &self.buttons {
            if !is_http_url(&button.url) {
                return Err(ConfigError::InvalidButtonUrl {
                    label: button.label.clone(),
                    url: button.url.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Absolute `http(s)` URL with a host. The authority must follow the scheme
/// directly, so forms the URL parser repairs (`https:///path`,
/// `https:host`) are rejected.
fn is_http_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let authority = url
        .get(parsed.scheme().len()..)
        .and_then(|rest| rest.strip_prefix("://"));
    matches!(parsed.scheme(), "http" | "https")
        && parsed.host_str().is_some_and(|host| !host.is_empty())
        && authority.is_some_and(|rest| !rest.starts_with('/'))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("logger title must not be empty")]
    EmptyTitle,
    #[error("button {label:?} has invalid url {url:?}: expected an absolute http(s) URL")]
    InvalidButtonUrl { label: String, url: String },
}

#[cfg(test)]
mod tests {
    use larklog_card::ButtonStyle;

    use super::*;

    #[test]
    fn json_defaults_fill_missing_fields() {
        let cfg: LoggerConfig =
            serde_json::from_str(r#"{"service":"api-gateway"}"#).expect("deserialize");
        assert_eq!(cfg.service, "api-gateway");
        assert_eq!(cfg.environment, "development");
        assert_eq!(cfg.hostname, "localhost");
        assert_eq!(cfg.title, "System Log");
        assert!(!cfg.show_config);
        assert!(cfg.buttons.is_empty());
        cfg.validate().expect("valid");
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = serde_json::from_str::<LoggerConfig>(r#"{"service":"a","colour":"red"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn buttons_deserialize_with_default_style() {
        let cfg: LoggerConfig = serde_json::from_str(
            r#"{"buttons":[{"label":"Logs","url":"https://logs.example.com"},
                           {"label":"Restart","url":"https://ops.example.com","style":"danger","requires_confirm":true}]}"#,
        )
        .expect("deserialize");
        assert_eq!(cfg.buttons[0].style, ButtonStyle::Primary);
        assert!(!cfg.buttons[0].requires_confirm);
        assert_eq!(cfg.buttons[1].style, ButtonStyle::Danger);
        assert!(cfg.buttons[1].requires_confirm);
    }

    #[test]
    fn validate_rejects_empty_title_and_bad_urls() {
        assert_eq!(
            LoggerConfig::default().with_title("  ").validate(),
            Err(ConfigError::EmptyTitle)
        );
        for url in [
            "ftp://x",
            "/relative",
            "https://",
            "https:///path",
            "logs.example.com",
            "https://?",
            "http://:80",
            "https://[::1",
            "https://#frag",
            "https://%%%",
            "https:logs.example.com",
        ] {
            let cfg = LoggerConfig::default().with_button(Button::new("Logs", url));
            assert!(
                matches!(cfg.validate(), Err(ConfigError::InvalidButtonUrl { .. })),
                "{url} should be rejected"
            );
        }
        LoggerConfig::default()
            .with_button(Button::new("Logs", "http://localhost:8080/logs"))
            .validate()
            .expect("plain http accepted");
    }

    #[test]
    fn builders_set_every_field() {
        let cfg = LoggerConfig::default()
            .with_service("payment-service")
            .with_environment("production")
            .with_hostname("pay-01")
            .with_title("Payments")
            .with_show_config(true)
            .with_emoji_subtitle(true)
            .with_buttons(vec![Button::new("A", "https://a.example.com")])
            .with_button(Button::new("B", "https://b.example.com"));
        assert_eq!(cfg.service, "payment-service");
        assert_eq!(cfg.environment, "production");
        assert_eq!(cfg.hostname, "pay-01");
        assert_eq!(cfg.title, "Payments");
        assert!(cfg.show_config && cfg.emoji_subtitle);
        assert_eq!(cfg.buttons.len(), 2);
    }
}
