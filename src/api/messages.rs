use serde::Deserialize;

use super::{lenient, lenient_list, or_missing, parse_lenient};

/// A row of the messages table. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoredMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
}

impl StoredMessage {
    /// Id for display, `?` when missing.
    #[must_use]
    pub fn id_label(&self) -> String {
        or_missing(self.id)
    }

    /// Content for display, empty when missing.
    #[must_use]
    pub fn content_label(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// First `limit` characters of the content.
    #[must_use]
    pub fn content_preview(&self, limit: usize) -> String {
        self.content_label().chars().take(limit).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct CreatedBody {
    #[serde(default, deserialize_with = "lenient")]
    data: Option<StoredMessage>,
}

/// Resolved `POST /api/db/messages` body: the stored row under `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedMessage {
    pub message: StoredMessage,
}

impl CreatedMessage {
    #[must_use]
    pub fn parse(body: Option<&[u8]>) -> Self {
        let body: CreatedBody = parse_lenient(body, "created message");
        Self {
            message: body.data.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListBody {
    #[serde(default, deserialize_with = "lenient")]
    count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_list")]
    messages: Option<Vec<StoredMessage>>,
}

/// Resolved `GET /api/db/messages` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageList {
    /// Fallback: `0`.
    pub count: u64,
    /// Fallback: empty.
    pub messages: Vec<StoredMessage>,
}

impl MessageList {
    #[must_use]
    pub fn parse(body: Option<&[u8]>) -> Self {
        let body: ListBody = parse_lenient(body, "message list");
        Self {
            count: body.count.unwrap_or(0),
            messages: body.messages.unwrap_or_default(),
        }
    }
}
