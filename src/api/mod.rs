//! Typed views over the JSON bodies returned by the API under test.
//!
//! Every field the client reads is optional on the wire. Parsing resolves
//! missing or malformed fields to documented fallbacks once, so display code
//! never deals with absent values directly.
mod health;
mod messages;


pub use health::{HealthReport, HealthStatus};
pub use messages::{CreatedMessage, MessageList, StoredMessage};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Placeholder shown for any numeric field the server did not send.
pub const MISSING: &str = "?";

/// Decodes `body`, falling back to `T::default()` when it is absent or malformed.
pub(crate) fn parse_lenient<T>(body: Option<&[u8]>, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(body) = body else {
        return T::default();
    };
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            warn!("Ignoring malformed {} body: {}", what, err);
            T::default()
        }
    }
}

pub(crate) fn or_missing<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_owned(), |value| value.to_string())
}

/// Field-level fallback: a value of the wrong shape resolves to `None`
/// instead of failing the enclosing body.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            warn!("Ignoring malformed field: {}", err);
            Ok(None)
        }
    }
}

/// Like [`lenient`] for arrays, dropping only the entries that do not decode.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let total = entries.len();
    let parsed: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if parsed.len() != total {
        warn!(
            "Dropped {} malformed list entries",
            total.saturating_sub(parsed.len())
        );
    }
    Ok(Some(parsed))
}
