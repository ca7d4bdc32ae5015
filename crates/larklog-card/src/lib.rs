//! Lark interactive card model and builder.
//!
//! This crate owns the document model that is posted to a Lark webhook, the
//! value formatter that turns loosely typed log fields into safe markdown, and
//! the fluent [`CardBuilder`] that encodes the layout policy (striped tables,
//! stacked long values, the configuration grid and button rows).

pub mod builder;
pub mod format;
pub mod layout;
pub mod level;
pub mod message;
pub mod types;
pub mod value;

pub use builder::{CardBuilder, ConfigGrid, KvItem, kv_items};
pub use format::{escape_markup, format_timestamp, format_value, placeholder_or, shape_long_value};
pub use level::{LogLevel, ParseLevelError};
pub use message::MessageBody;
pub use types::{
    Button, ButtonElement, ButtonRow, ButtonStyle, Card, CardConfig, CardLink, Column,
    ColumnElement, ColumnRow, ConfirmDialog, Element, Header, MobileConfig, Padding, PlainText,
    Text, TextBlock, Title,
};
pub use value::{FieldValue, Fields};
