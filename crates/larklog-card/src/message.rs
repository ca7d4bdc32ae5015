use serde::Serialize;

use crate::types::Card;

/// Body posted to the webhook, tagged by `msg_type`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
pub enum MessageBody<'a> {
    Text { content: TextContent<'a> },
    Interactive { card: &'a Card },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TextContent<'a> {
    pub text: &'a str,
}

impl<'a> MessageBody<'a> {
    pub fn text(text: &'a str) -> Self {
        MessageBody::Text {
            content: TextContent { text },
        }
    }

    pub fn card(card: &'a Card) -> Self {
        MessageBody::Interactive { card }
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
