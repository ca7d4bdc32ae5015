use serde::{Deserialize, Serialize};

use crate::layout::{CORNER_RADIUS, TAG_LARK_MD, TAG_PLAIN_TEXT};
use crate::message::MessageBody;

/// A finished Lark interactive card (the `card` object of the webhook body).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub config: CardConfig,
    pub header: Header,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_link: Option<CardLink>,
    #[serde(default)]
    pub corner_radius: u32,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            config: CardConfig::default(),
            header: Header::default(),
            elements: Vec::new(),
            card_link: None,
            corner_radius: CORNER_RADIUS,
        }
    }
}

impl Card {
    /// Serialize the full webhook message (`msg_type` + `card`).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&MessageBody::Interactive { card: self })
    }

    /// Plain-text view of every text block and table cell, in element order.
    pub fn text_lines(&self) -> Vec<&str> {
        let mut lines = Vec::new();
        for element in &self.elements {
            match element {
                Element::Text(block) => lines.push(block.text.content.as_str()),
                Element::Columns(row) => {
                    for column in &row.columns {
                        for cell in &column.elements {
                            lines.push(cell.content.as_str());
                        }
                    }
                }
                Element::Divider | Element::Buttons(_) => {}
            }
        }
        lines
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    pub wide_screen_mode: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_forward: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub update_multi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_config: Option<MobileConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_config: Option<MobileConfig>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            wide_screen_mode: true,
            enable_forward: true,
            update_multi: true,
            ios_config: Some(MobileConfig {
                enable_forward: true,
            }),
            android_config: Some(MobileConfig {
                enable_forward: true,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileConfig {
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_forward: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub title: Title,
    pub template: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            title: Title {
                tag: TAG_LARK_MD.to_string(),
                content: String::new(),
                font_size: None,
            },
            template: "blue".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub tag: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLink {
    pub url: String,
}

/// One visual unit of a card, tagged the way the Lark card schema expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum Element {
    #[serde(rename = "div")]
    Text(TextBlock),
    #[serde(rename = "hr")]
    Divider,
    #[serde(rename = "column_set")]
    Columns(ColumnRow),
    #[serde(rename = "action")]
    Buttons(ButtonRow),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: Text,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub tag: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub columns: Vec<Column>,
    pub flex_mode: String,
    pub background_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub tag: String,
    pub width: String,
    pub weight: u32,
    pub vertical_align: String,
    #[serde(default)]
    pub elements: Vec<ColumnElement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnElement {
    pub tag: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonRow {
    pub actions: Vec<ButtonElement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonElement {
    pub tag: String,
    pub text: PlainText,
    pub url: String,
    #[serde(rename = "type")]
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmDialog>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainText {
    pub tag: String,
    pub content: String,
}

impl PlainText {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            tag: TAG_PLAIN_TEXT.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmDialog {
    pub title: PlainText,
    pub text: PlainText,
}

/// Visual weight of an action button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonStyle {
    /// Value of the button `type` field on the wire.
    pub fn wire_value(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "primary",
            ButtonStyle::Secondary => "default",
            ButtonStyle::Danger => "danger",
        }
    }
}

/// A link button attached to every card a logger emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Button {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub style: ButtonStyle,
    #[serde(default)]
    pub requires_confirm: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            style: ButtonStyle::Primary,
            requires_confirm: false,
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_confirm(mut self, requires_confirm: bool) -> Self {
        self.requires_confirm = requires_confirm;
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
