use std::io::Write;

use chrono::Local;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::api::{CreatedMessage, MessageList, StoredMessage};
use crate::config::SuiteConfig;
use crate::error::AppResult;
use crate::http::{ProbeRequest, Prober};
use crate::metrics::{ProbeOutcome, ProbeResult, STATUS_OK};

use super::super::console::{Console, Marker};
use super::ScenarioContext;

pub(crate) const POST_PATH: &str = "api/post";
pub(crate) const MESSAGES_PATH: &str = "api/db/messages";
const STATUS_CREATED: u16 = 201;
/// Messages listed after the database round trip.
const LISTED_MESSAGES: usize = 5;
/// Characters of content shown per listed message.
const PREVIEW_CHARS: usize = 50;

/// Result of a single request/response exchange with a typed body.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeOutcome<T> {
    /// The expected status came back; the body resolved to `T`.
    Accepted(T),
    UnexpectedStatus(u16),
    /// Transport failure message.
    Failed(String),
}

impl<T> ExchangeOutcome<T> {
    #[must_use]
    pub const fn accepted(&self) -> Option<&T> {
        match self {
            ExchangeOutcome::Accepted(value) => Some(value),
            ExchangeOutcome::UnexpectedStatus(_) | ExchangeOutcome::Failed(_) => None,
        }
    }

    fn from_result(
        result: ProbeResult,
        expected: u16,
        parse: impl FnOnce(Option<&[u8]>) -> T,
    ) -> Self {
        match result.outcome {
            ProbeOutcome::Status(code) if code == expected => {
                ExchangeOutcome::Accepted(parse(result.body.as_deref()))
            }
            ProbeOutcome::Status(code) => ExchangeOutcome::UnexpectedStatus(code),
            ProbeOutcome::Failed { message, .. } => ExchangeOutcome::Failed(message),
        }
    }
}

/// Both halves of the database round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseReport {
    pub saved: ExchangeOutcome<StoredMessage>,
    pub listed: ExchangeOutcome<MessageList>,
}

impl<T: Eq> Eq for ExchangeOutcome<T> {}

/// Stores `content` through `POST /api/db/messages` and expects `201`.
///
/// # Errors
///
/// Returns an error when the endpoint URL cannot be built.
pub async fn save_message(
    prober: &dyn Prober,
    config: &SuiteConfig,
    content: &str,
) -> AppResult<ExchangeOutcome<StoredMessage>> {
    let request = ProbeRequest::post_json(
        config.endpoint(MESSAGES_PATH)?,
        json!({ "content": content }),
        config.request_timeout,
    )
    .capture_body();
    let result = prober.probe(1, &request).await;
    Ok(ExchangeOutcome::from_result(result, STATUS_CREATED, |body| {
        CreatedMessage::parse(body).message
    }))
}

/// Reads `GET /api/db/messages` and expects `200`.
///
/// # Errors
///
/// Returns an error when the endpoint URL cannot be built.
pub async fn list_messages(
    prober: &dyn Prober,
    config: &SuiteConfig,
) -> AppResult<ExchangeOutcome<MessageList>> {
    let request =
        ProbeRequest::get(config.endpoint(MESSAGES_PATH)?, config.request_timeout).capture_body();
    let result = prober.probe(1, &request).await;
    Ok(ExchangeOutcome::from_result(
        result,
        STATUS_OK,
        MessageList::parse,
    ))
}

/// Any 200 body is kept: JSON as-is, anything else as a string.
fn parse_echo(body: Option<&[u8]>) -> Value {
    let Some(body) = body else {
        return Value::Null;
    };
    serde_json::from_slice(body).unwrap_or_else(|err| {
        warn!("POST response is not JSON: {}", err);
        Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

pub(crate) async fn run_post<W: Write>(
    context: &ScenarioContext<'_>,
    console: &mut Console<W>,
) -> AppResult<ExchangeOutcome<Value>> {
    console.header("Test 3: POST request")?;

    let payload = json!({
        "test": "throttle_probe",
        "timestamp": Local::now().to_rfc3339(),
        "value": 42,
    });
    let request = ProbeRequest::post_json(
        context.config.endpoint(POST_PATH)?,
        payload,
        context.config.request_timeout,
    )
    .capture_body();
    let result = context.prober.probe(1, &request).await;
    let outcome = ExchangeOutcome::from_result(result, STATUS_OK, parse_echo);

    match &outcome {
        ExchangeOutcome::Accepted(response) => {
            let mark = console.mark(Marker::Ok);
            console.line(format!("{} POST successful", mark))?;
            console.line("Response:")?;
            console.line(serde_json::to_string_pretty(response)?)?;
        }
        ExchangeOutcome::UnexpectedStatus(code) => {
            let mark = console.mark(Marker::Fail);
            console.line(format!("{} POST failed: {}", mark, code))?;
        }
        ExchangeOutcome::Failed(message) => {
            let mark = console.mark(Marker::Fail);
            console.line(format!("{} Error: {}", mark, message))?;
        }
    }
    info!("post scenario finished: {}", outcome_label(&outcome));
    Ok(outcome)
}

pub(crate) async fn run_database<W: Write>(
    context: &ScenarioContext<'_>,
    console: &mut Console<W>,
) -> AppResult<DatabaseReport> {
    console.header("Test 4: Database (PostgreSQL)")?;

    let content = format!(
        "Message from throttle-probe at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    console.line("1. Saving message to DB...")?;
    let saved = save_message(context.prober.as_ref(), context.config, &content).await?;
    match &saved {
        ExchangeOutcome::Accepted(message) => {
            let mark = console.mark(Marker::Ok);
            console.line(format!("   {} Saved with ID: {}", mark, message.id_label()))?;
            console.line(format!("   Content: {}", message.content_label()))?;
        }
        ExchangeOutcome::UnexpectedStatus(code) => {
            let mark = console.mark(Marker::Fail);
            console.line(format!("   {} Save failed: {}", mark, code))?;
        }
        ExchangeOutcome::Failed(message) => {
            let mark = console.mark(Marker::Fail);
            console.line(format!("   {} Error: {}", mark, message))?;
        }
    }

    console.blank()?;
    console.line("2. Fetching messages from DB...")?;
    let listed = list_messages(context.prober.as_ref(), context.config).await?;
    match &listed {
        ExchangeOutcome::Accepted(list) => write_listing(console, list)?,
        ExchangeOutcome::UnexpectedStatus(code) => {
            let mark = console.mark(Marker::Fail);
            console.line(format!("   {} Fetch failed: {}", mark, code))?;
        }
        ExchangeOutcome::Failed(message) => {
            let mark = console.mark(Marker::Fail);
            console.line(format!("   {} Error: {}", mark, message))?;
        }
    }

    info!(
        "database scenario finished: save {}, list {}",
        outcome_label(&saved),
        outcome_label(&listed)
    );
    Ok(DatabaseReport { saved, listed })
}

fn write_listing<W: Write>(console: &mut Console<W>, list: &MessageList) -> AppResult<()> {
    let mark = console.mark(Marker::Ok);
    console.line(format!("   {} Total messages: {}", mark, list.count))?;
    if list.messages.is_empty() {
        return Ok(());
    }

    console.blank()?;
    console.line(format!("   Latest {} messages:", LISTED_MESSAGES))?;
    for message in list.messages.iter().take(LISTED_MESSAGES) {
        let preview = message.content_preview(PREVIEW_CHARS);
        let ellipsis = if message.content_label().chars().count() > PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        console.line(format!(
            "   - [{}] {}{}",
            message.id_label(),
            preview,
            ellipsis
        ))?;
    }
    Ok(())
}

fn outcome_label<T>(outcome: &ExchangeOutcome<T>) -> String {
    match outcome {
        ExchangeOutcome::Accepted(_) => "accepted".to_owned(),
        ExchangeOutcome::UnexpectedStatus(code) => format!("HTTP {}", code),
        ExchangeOutcome::Failed(_) => "transport error".to_owned(),
    }
}
