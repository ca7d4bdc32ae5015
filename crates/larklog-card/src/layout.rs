//! Layout constants shared by the card builder.

pub const CORNER_RADIUS: u32 = 8;

pub const PADDING_TOP: u32 = 8;
pub const PADDING_BOTTOM: u32 = 8;
pub const PADDING_LEFT: u32 = 12;
pub const PADDING_RIGHT: u32 = 12;

pub const LINE_HEIGHT: &str = "1.5";

pub const COLUMN_WEIGHT_KEY: u32 = 3;
pub const COLUMN_WEIGHT_VALUE: u32 = 7;

pub const FONT_SIZE_DEFAULT: &str = "default";
pub const FONT_SIZE_LARGE: &str = "large";

pub const BG_STYLE_HEADER: &str = "grey";
pub const BG_STYLE_ODD: &str = "default";
pub const BG_STYLE_EVEN: &str = "light";
pub const BG_STYLE_CONFIG: &str = "light_blue";

pub const EMOJI_INFO: &str = "ℹ️";
pub const EMOJI_WARN: &str = "⚠️";
pub const EMOJI_ERROR: &str = "❌";
pub const EMOJI_TIME: &str = "⏰";
pub const EMOJI_SUCCESS: &str = "✅";
pub const EMOJI_LINK: &str = "📌";

pub const TAG_LARK_MD: &str = "lark_md";
pub const TAG_PLAIN_TEXT: &str = "plain_text";
pub const TAG_MARKDOWN: &str = "markdown";

/// Values longer than this (or multi-line, or JSON-shaped) leave the table.
pub const SHORT_VALUE_MAX: usize = 80;
/// Escaped values longer than this are word-wrapped.
pub const WRAP_THRESHOLD: usize = 100;
pub const WRAP_WIDTH: usize = 50;
/// JSON-shaped values longer than this are truncated instead of wrapped.
pub const JSON_TRUNCATE_THRESHOLD: usize = 200;
pub const JSON_TRUNCATE_AT: usize = 150;

pub const PLACEHOLDER: &str = "-";

pub const CONFIRM_TITLE: &str = "Confirm Action";

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
