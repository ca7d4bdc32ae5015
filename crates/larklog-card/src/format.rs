//! Value formatting for card markdown.
//!
//! Every field value ends up inside `lark_md` content, so the formatter only
//! escapes the characters that would corrupt the markup (`&`, `<`, `>`) and
//! leaves emphasis markers alone. Long values are reshaped so they stay
//! readable inside a card column.

use chrono::NaiveDateTime;

use crate::layout::{
    JSON_TRUNCATE_AT, JSON_TRUNCATE_THRESHOLD, PLACEHOLDER, TIMESTAMP_FORMAT, WRAP_THRESHOLD,
    WRAP_WIDTH,
};
use crate::value::FieldValue;

/// Render a field value as safe, bounded card markdown. Never empty.
pub fn format_value(value: &FieldValue) -> String {
    let raw = match value {
        FieldValue::Null => return PLACEHOLDER.to_string(),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Int(number) => number.to_string(),
        FieldValue::UInt(number) => number.to_string(),
        FieldValue::Float(number) => format!("{number:.2}"),
        FieldValue::Bool(flag) => flag.to_string(),
        FieldValue::Timestamp(timestamp) => format_timestamp(timestamp),
        FieldValue::Structured(json) => {
            serde_json::to_string(json).unwrap_or_else(|_| format!("{json:?}"))
        }
    };
    let escaped = escape_markup(&raw);
    shape_long_value(placeholder_or(&escaped))
}

/// `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Escape `&`, `<` and `>` as HTML entities.
pub fn escape_markup(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for ch in content.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Blank text renders as the placeholder.
pub fn placeholder_or(content: &str) -> &str {
    if content.trim().is_empty() {
        PLACEHOLDER
    } else {
        content
    }
}

/// Apply the long-value policy to already escaped text.
///
/// JSON-shaped text over the truncation threshold is cut at the last `,`
/// that fits and gets a `… (N chars)` suffix; any other text over the wrap
/// threshold is word-wrapped into fixed-width lines.
pub fn shape_long_value(escaped: &str) -> String {
    let total = escaped.chars().count();
    if looks_like_json(escaped) && total > JSON_TRUNCATE_THRESHOLD {
        return truncate_json(escaped, total);
    }
    if total > WRAP_THRESHOLD {
        return wrap_text(escaped, WRAP_WIDTH);
    }
    escaped.to_string()
}

pub(crate) fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn truncate_json(escaped: &str, total: usize) -> String {
    let limit = escaped
        .char_indices()
        .nth(JSON_TRUNCATE_AT)
        .map(|(offset, _)| offset)
        .unwrap_or(escaped.len());
    let window = &escaped[..limit];
    let cut = match window.rfind(',') {
        Some(comma) if comma > 0 => comma,
        _ => entity_safe_cut(window),
    };
    format!("{}… ({total} chars)", &escaped[..cut])
}

/// Back a cut position off so it does not land inside an `&...;` entity.
fn entity_safe_cut(window: &str) -> usize {
    match window.rfind('&') {
        Some(amp) if !window[amp..].contains(';') => amp,
        _ => window.len(),
    }
}

fn wrap_text(escaped: &str, width: usize) -> String {
    let mut lines = Vec::new();
    for paragraph in escaped.split('\n') {
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines.join("\n")
}

fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut emitted = false;

    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
            emitted = true;
        }
        if word_len <= width {
            current.push_str(word);
            current_len = word_len;
        } else {
            let mut chunks = split_word(word, width);
            if let Some(last) = chunks.pop() {
                lines.extend(chunks);
                current_len = last.chars().count();
                current = last;
            }
        }
    }

    if current_len > 0 || !emitted {
        lines.push(current);
    }
}

/// Hard-split a word into chunks of at most `width` characters, keeping
/// escape entities whole.
fn split_word(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0usize;
    for unit in markup_units(word) {
        let unit_len = unit.chars().count();
        if chunk_len > 0 && chunk_len + unit_len > width {
            chunks.push(std::mem::take(&mut chunk));
            chunk_len = 0;
        }
        chunk.push_str(unit);
        chunk_len += unit_len;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

fn markup_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        let len = if ch == '&' {
            rest.find(';')
                .filter(|end| *end <= 5)
                .map(|end| end + 1)
                .unwrap_or(1)
        } else {
            ch.len_utf8()
        };
        units.push(&rest[..len]);
        rest = &rest[len..];
    }
    units
}
