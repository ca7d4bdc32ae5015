//! Fluent card builder.
//!
//! Every operation appends elements and hands the builder back, so cards are
//! composed as a chain ending in [`CardBuilder::build`]. No operation can
//! fail: blank or missing input degrades to placeholders or is skipped.

use chrono::{Local, NaiveDateTime};

use crate::format::{escape_markup, format_timestamp, format_value, looks_like_json, placeholder_or};
use crate::layout::{
    BG_STYLE_CONFIG, BG_STYLE_EVEN, BG_STYLE_HEADER, BG_STYLE_ODD, COLUMN_WEIGHT_KEY,
    COLUMN_WEIGHT_VALUE, CONFIRM_TITLE, EMOJI_ERROR, EMOJI_LINK, EMOJI_SUCCESS, EMOJI_TIME,
    EMOJI_WARN, FONT_SIZE_DEFAULT, FONT_SIZE_LARGE, LINE_HEIGHT, PADDING_BOTTOM, PADDING_LEFT,
    PADDING_RIGHT, PADDING_TOP, SHORT_VALUE_MAX, TAG_LARK_MD, TAG_MARKDOWN,
};
use crate::types::{
    Button, ButtonElement, ButtonRow, ButtonStyle, Card, CardLink, Column, ColumnElement,
    ColumnRow, ConfirmDialog, Element, Padding, PlainText, Text, TextBlock, Title,
};
use crate::value::Fields;

/// A formatted key/value pair ready for table layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvItem {
    pub key: String,
    pub value: String,
}

impl KvItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Long values are stacked below the table instead of squeezed into a cell.
    pub fn is_long(&self) -> bool {
        self.value.chars().count() > SHORT_VALUE_MAX
            || self.value.contains('\n')
            || looks_like_json(&self.value)
    }
}

/// Format every field value, keeping field order.
pub fn kv_items(fields: &Fields) -> Vec<KvItem> {
    fields
        .iter()
        .map(|(key, value)| KvItem::new(key, format_value(value)))
        .collect()
}

/// The four fixed slots of the configuration grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigGrid {
    pub level: String,
    pub service: String,
    pub environment: String,
    pub hostname: String,
}

#[derive(Debug, Clone, Default)]
pub struct CardBuilder {
    card: Card,
}

impl CardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header. Calling it again replaces the previous header.
    pub fn header(mut self, title: &str, template: &str) -> Self {
        self.card.header.title = Title {
            tag: TAG_LARK_MD.to_string(),
            content: escape_markup(title),
            font_size: Some(FONT_SIZE_LARGE.to_string()),
        };
        self.card.header.template = template.to_string();
        self
    }

    pub fn section(self, content: &str) -> Self {
        let content = escape_markup(placeholder_or(content));
        self.push_markdown(content, standard_padding(), "left")
    }

    pub fn subtitle(self, subtitle: &str) -> Self {
        let content = grey(&escape_markup(placeholder_or(subtitle)));
        let padding = Padding {
            bottom: 0,
            ..standard_padding()
        };
        self.push_markdown(content, padding, "left")
    }

    /// Right-aligned local time.
    pub fn timestamp(self) -> Self {
        self.timestamp_at(Local::now().naive_local())
    }

    pub fn timestamp_at(self, at: NaiveDateTime) -> Self {
        let content = grey(&format!("{EMOJI_TIME} {}", format_timestamp(&at)));
        let padding = Padding {
            top: 0,
            ..standard_padding()
        };
        self.push_markdown(content, padding, "right")
    }

    pub fn divider(mut self) -> Self {
        self.card.elements.push(Element::Divider);
        self
    }

    /// Striped two-column table for short values; long values follow below a
    /// divider as stacked `**key**` blocks.
    pub fn kv_table(mut self, items: &[KvItem]) -> Self {
        let (long, short): (Vec<&KvItem>, Vec<&KvItem>) = items.iter().partition(|item| item.is_long());

        if !short.is_empty() {
            self.card.elements.push(two_column_row(
                cell("**Key**", Some(FONT_SIZE_LARGE)),
                cell("**Value**", Some(FONT_SIZE_LARGE)),
                (COLUMN_WEIGHT_KEY, COLUMN_WEIGHT_VALUE),
                BG_STYLE_HEADER,
            ));
            for (idx, item) in short.iter().enumerate() {
                let background = if idx % 2 == 1 {
                    BG_STYLE_EVEN
                } else {
                    BG_STYLE_ODD
                };
                self.card.elements.push(two_column_row(
                    cell(&bold_key(&item.key), None),
                    cell(placeholder_or(&item.value), Some(FONT_SIZE_DEFAULT)),
                    (COLUMN_WEIGHT_KEY, COLUMN_WEIGHT_VALUE),
                    background,
                ));
            }
        }

        if !long.is_empty() {
            self = self.divider();
            for item in long {
                let content = format!("{}\n{}", bold_key(&item.key), placeholder_or(&item.value));
                self = self.push_markdown(content, standard_padding(), "left");
            }
        }
        self
    }

    /// Fixed 2x2 label/value grid: Level | Service, Environment | Hostname.
    pub fn config_grid(mut self, grid: &ConfigGrid) -> Self {
        let rows = [
            ("**Level**", "**Service**"),
            (grid.level.as_str(), grid.service.as_str()),
            ("**Environment**", "**Hostname**"),
            (grid.environment.as_str(), grid.hostname.as_str()),
        ];
        for (idx, (left, right)) in rows.into_iter().enumerate() {
            let is_label = idx % 2 == 0;
            let (left, right) = if is_label {
                (left.to_string(), right.to_string())
            } else {
                (escape_markup(left), escape_markup(right))
            };
            self.card.elements.push(two_column_row(
                cell(&left, None),
                cell(&right, None),
                (1, 1),
                BG_STYLE_CONFIG,
            ));
        }
        self
    }

    /// One action row with a button per entry. Confirmation forces the
    /// danger style.
    pub fn buttons(mut self, buttons: &[Button]) -> Self {
        if buttons.is_empty() {
            return self;
        }
        let actions = buttons.iter().map(render_button).collect();
        self.card.elements.push(Element::Buttons(ButtonRow { actions }));
        self
    }

    pub fn key_value_list(mut self, title: &str, fields: &Fields) -> Self {
        self = self.section(&format!("**{title}**"));
        for (key, value) in fields.iter() {
            let content = format!("{}: {}", bold_key(key), format_value(value));
            self = self.push_markdown(content, standard_padding(), "left");
        }
        self
    }

    pub fn status_badge(self, status: &str, message: &str) -> Self {
        let emoji = match status.trim().to_ascii_lowercase().as_str() {
            "error" | "failed" => EMOJI_ERROR,
            "warning" | "warn" => EMOJI_WARN,
            _ => EMOJI_SUCCESS,
        };
        let content = format!(
            "{emoji} **Status**: {}",
            escape_markup(placeholder_or(message))
        );
        self.push_markdown(content, standard_padding(), "left")
    }

    pub fn metrics_grid(mut self, title: &str, metrics: &Fields) -> Self {
        self = self.section(&format!("**{title}**"));
        let lines: Vec<String> = metrics
            .iter()
            .map(|(key, value)| format!("{}: {}", bold_key(key), format_value(value)))
            .collect();
        if lines.is_empty() {
            return self;
        }
        self.push_markdown(lines.join("\n"), standard_padding(), "left")
    }

    /// Make the whole card clickable and add a hint line. Blank URLs are ignored.
    pub fn card_link(mut self, url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() {
            return self;
        }
        self.card.card_link = Some(CardLink {
            url: url.to_string(),
        });
        let content = grey(&format!(
            "{EMOJI_LINK} Click card to view detailed logs: [Log Link]({})",
            escape_markup(url)
        ));
        self.push_markdown(content, standard_padding(), "left")
    }

    pub fn build(self) -> Card {
        self.card
    }

    fn push_markdown(mut self, content: String, padding: Padding, align: &str) -> Self {
        self.card.elements.push(Element::Text(TextBlock {
            text: Text {
                tag: TAG_LARK_MD.to_string(),
                content,
                line_height: Some(LINE_HEIGHT.to_string()),
            },
            padding: Some(padding),
            text_align: Some(align.to_string()),
        }));
        self
    }
}

fn standard_padding() -> Padding {
    Padding {
        top: PADDING_TOP,
        bottom: PADDING_BOTTOM,
        left: PADDING_LEFT,
        right: PADDING_RIGHT,
    }
}

fn grey(content: &str) -> String {
    format!("<font color=\"grey\">{content}</font>")
}

fn bold_key(key: &str) -> String {
    format!("**{}**", escape_markup(placeholder_or(key)))
}

fn cell(content: &str, font_size: Option<&str>) -> ColumnElement {
    ColumnElement {
        tag: TAG_MARKDOWN.to_string(),
        content: content.to_string(),
        text_align: Some("left".to_string()),
        font_size: font_size.map(str::to_string),
    }
}

fn two_column_row(
    left: ColumnElement,
    right: ColumnElement,
    (left_weight, right_weight): (u32, u32),
    background: &str,
) -> Element {
    let column = |weight: u32, content: ColumnElement| Column {
        tag: "column".to_string(),
        width: "weighted".to_string(),
        weight,
        vertical_align: "middle".to_string(),
        elements: vec![content],
    };
    Element::Columns(ColumnRow {
        columns: vec![column(left_weight, left), column(right_weight, right)],
        flex_mode: "none".to_string(),
        background_style: background.to_string(),
        padding: Some(standard_padding()),
    })
}

fn render_button(button: &Button) -> ButtonElement {
    let style = if button.requires_confirm {
        ButtonStyle::Danger
    } else {
        button.style
    };
    let confirm = button.requires_confirm.then(|| ConfirmDialog {
        title: PlainText::new(CONFIRM_TITLE),
        text: PlainText::new(format!("Are you sure you want to \"{}\"?", button.label)),
    });
    ButtonElement {
        tag: "button".to_string(),
        text: PlainText::new(button.label.clone()),
        url: button.url.clone(),
        style: style.wire_value().to_string(),
        confirm,
    }
}
