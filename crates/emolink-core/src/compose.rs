use std::fmt;

use serde::Serialize;

use crate::codec;
use crate::link::build_card_link;
use crate::reveal::CardView;
use crate::types::{CardPayload, DecodedCard, DEFAULT_MESSAGE, DEFAULT_RECEIVER, DEFAULT_SENDER};

/// Raw composer input. Blank text fields are filled with defaults at
/// generate time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeForm {
    pub template: Option<String>,
    pub receiver: String,
    pub message: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedLink {
    pub payload: CardPayload,
    pub token: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    NoTemplate,
    EncodeFailed,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::NoTemplate => write!(f, "please select a template first"),
            ComposeError::EncodeFailed => write!(f, "could not generate a link for this card"),
        }
    }
}

impl std::error::Error for ComposeError {}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

impl ComposeForm {
    /// The payload this form would produce at `now_ms`.
    pub fn to_payload(&self, now_ms: i64) -> Result<CardPayload, ComposeError> {
        let template = match self.template.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(ComposeError::NoTemplate),
        };
        Ok(CardPayload {
            template,
            receiver: or_default(&self.receiver, DEFAULT_RECEIVER),
            message: or_default(&self.message, DEFAULT_MESSAGE),
            sender: or_default(&self.sender, DEFAULT_SENDER),
            timestamp: now_ms,
        })
    }
}

/// Turn a filled form into a shareable link on `base_url`.
pub fn generate(
    form: &ComposeForm,
    base_url: &str,
    now_ms: i64,
) -> Result<GeneratedLink, ComposeError> {
    let payload = form.to_payload(now_ms)?;
    let token = codec::encode(&payload);
    if token.is_empty() {
        return Err(ComposeError::EncodeFailed);
    }
    let url = build_card_link(base_url, &token);
    Ok(GeneratedLink {
        payload,
        token,
        url,
    })
}

/// Render the form through the same view the recipient gets, without
/// building a link.
pub fn preview(form: &ComposeForm, now_ms: i64) -> Result<CardView, ComposeError> {
    let payload = form.to_payload(now_ms)?;
    Ok(CardView::from_card(&DecodedCard::from(payload)))
}

/// Message sent alongside the link when sharing to a chat app.
pub fn share_text(receiver: &str, url: &str) -> String {
    let name = if receiver.is_empty() { "there" } else { receiver };
    format!(
        "Hey {}! I've created something special for you. Follow the link to see it: {}",
        name, url
    )
}
