use std::env;

pub const WEBHOOK_URL_VAR: &str = "LARK_WEBHOOK_URL";
pub const TEST_MODE_VAR: &str = "LARK_TEST_MODE";
pub const PLACEHOLDER_WEBHOOK_URL: &str = "https://test.webhook.url";

/// Webhook settings taken from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub webhook_url: String,
    /// Print payloads instead of posting them.
    pub test_mode: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Without a webhook URL the placeholder is used and test mode is forced.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let test_mode = lookup(TEST_MODE_VAR)
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        match lookup(WEBHOOK_URL_VAR).filter(|url| !url.trim().is_empty()) {
            Some(url) => Self {
                webhook_url: url.trim().to_string(),
                test_mode,
            },
            None => Self {
                webhook_url: PLACEHOLDER_WEBHOOK_URL.to_string(),
                test_mode: true,
            },
        }
    }
}
