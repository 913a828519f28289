use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Query parameter that carries the token in a shared link.
pub const CARD_PARAM: &str = "card";

pub const DEFAULT_BASE_URL: &str = "https://emolink.app/";

// Fallback text used by the composer when a field is left blank.
pub const DEFAULT_RECEIVER: &str = "Someone Special";
pub const DEFAULT_MESSAGE: &str = "You are amazing!";
pub const DEFAULT_SENDER: &str = "Secret Admirer";

/// One greeting. Field order is the serialized key order, which keeps tokens
/// byte-identical with links produced by the web composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPayload {
    pub template: String,
    pub receiver: String,
    pub message: String,
    pub sender: String,
    /// Milliseconds since the Unix epoch at creation. Informational only.
    pub timestamp: i64,
}

/// Object recovered from a token, kept exactly as parsed.
///
/// Links come from untrusted sources, so fields may be missing, mistyped or
/// accompanied by extra keys. Accessors return `None` for anything absent or
/// of the wrong type; the renderer decides how to default.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCard {
    fields: Map<String, Value>,
}

impl DecodedCard {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn template(&self) -> Option<&str> {
        self.text("template")
    }

    pub fn receiver(&self) -> Option<&str> {
        self.text("receiver")
    }

    pub fn message(&self) -> Option<&str> {
        self.text("message")
    }

    pub fn sender(&self) -> Option<&str> {
        self.text("sender")
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.fields.get("timestamp").and_then(Value::as_i64)
    }

    /// Strict view: `Some` only when every payload field is present with the
    /// expected type. Extra keys are ignored.
    pub fn to_payload(&self) -> Option<CardPayload> {
        Some(CardPayload {
            template: self.template()?.to_string(),
            receiver: self.receiver()?.to_string(),
            message: self.message()?.to_string(),
            sender: self.sender()?.to_string(),
            timestamp: self.timestamp()?,
        })
    }
}

impl From<&CardPayload> for DecodedCard {
    fn from(p: &CardPayload) -> Self {
        let mut fields = Map::new();
        fields.insert("template".into(), Value::from(p.template.as_str()));
        fields.insert("receiver".into(), Value::from(p.receiver.as_str()));
        fields.insert("message".into(), Value::from(p.message.as_str()));
        fields.insert("sender".into(), Value::from(p.sender.as_str()));
        fields.insert("timestamp".into(), Value::from(p.timestamp));
        Self { fields }
    }
}

impl From<CardPayload> for DecodedCard {
    fn from(p: CardPayload) -> Self {
        DecodedCard::from(&p)
    }
}

/// Why a token could not be produced or read. `codec::decode` collapses all
/// of these into `None`; the variants exist for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    Serialize(String),
    Empty,
    Base64(String),
    Utf8(String),
    Json(String),
    NotAnObject,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Serialize(msg) => write!(f, "serialize card: {}", msg),
            LinkError::Empty => write!(f, "token is empty"),
            LinkError::Base64(msg) => write!(f, "base64 decode: {}", msg),
            LinkError::Utf8(msg) => write!(f, "token is not UTF-8 text: {}", msg),
            LinkError::Json(msg) => write!(f, "invalid card json: {}", msg),
            LinkError::NotAnObject => write!(f, "card json is not an object"),
        }
    }
}

impl std::error::Error for LinkError {}
