use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::{EMOJI_ERROR, EMOJI_INFO, EMOJI_WARN};

/// Severity of a log card. Drives the header color and emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level string (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Header color template for this level.
    pub fn template(self) -> &'static str {
        match self {
            LogLevel::Info => "blue",
            LogLevel::Warn => "orange",
            LogLevel::Error => "red",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            LogLevel::Info => EMOJI_INFO,
            LogLevel::Warn => EMOJI_WARN,
            LogLevel::Error => EMOJI_ERROR,
        }
    }

    /// Upper-case label shown in the configuration grid.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: {}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
