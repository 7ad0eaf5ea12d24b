//! Common types, result aliases and webhook wire payloads.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::DeserializeFromStr;

/// Error type used across the crate.
pub type Err = anyhow::Error;
/// Result alias over [`Err`].
pub type Res<T> = Result<T, Err>;
/// Result carrying no value.
pub type Void = Res<()>;

/// The `code` value Feishu returns when a message was accepted.
pub const SUCCESS_CODE: i64 = 0;

/// Message flavor requested by the caller (`MSG_TYPE`).
///
/// Feishu renders markdown syntax inside plain text messages, so both variants
/// go over the wire as `"text"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, DeserializeFromStr)]
pub enum MsgType {
    /// Plain text.
    #[default]
    Text,
    /// Markdown syntax inside a text message.
    Markdown,
}

impl MsgType {
    /// The `msg_type` discriminator sent to the webhook.
    pub fn wire_name(&self) -> &'static str {
        "text"
    }
}

impl FromStr for MsgType {
    type Err = Err;

    fn from_str(s: &str) -> Res<Self> {
        match s {
            "text" => Ok(MsgType::Text),
            "markdown" => Ok(MsgType::Markdown),
            other => Err(anyhow::anyhow!("Unsupported MSG_TYPE: {other}. Supported types: text, markdown")),
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsgType::Text => f.write_str("text"),
            MsgType::Markdown => f.write_str("markdown"),
        }
    }
}

/// Request body posted to the bot webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMessage {
    /// Message type discriminator, always `"text"`.
    pub msg_type: String,
    /// Message content.
    pub content: TextContent,
}

/// Content object of a text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// Final message text, mentions included.
    pub text: String,
}

impl WebhookMessage {
    /// Build a text message for the given flavor.
    pub fn new(msg_type: MsgType, text: impl Into<String>) -> Self {
        Self {
            msg_type: msg_type.wire_name().to_string(),
            content: TextContent { text: text.into() },
        }
    }
}

/// Raw HTTP reply from the webhook, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body as received.
    pub body: String,
}

/// Parsed JSON body of a webhook reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookResponse {
    /// Feishu status code; `0` means accepted.
    pub code: i64,
    /// Human-readable status message.
    #[serde(default)]
    pub msg: String,
    /// Opaque extra data.
    #[serde(default)]
    pub data: Value,
}
