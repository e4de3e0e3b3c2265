use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::args::HttpMethod;
use crate::metrics::{FailureKind, ProbeOutcome, ProbeResult};

#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
    /// Keep the response body on the result instead of discarding it.
    pub capture_body: bool,
}

impl ProbeRequest {
    #[must_use]
    pub const fn get(url: Url, timeout: Duration) -> Self {
        Self {
            url,
            method: HttpMethod::Get,
            body: None,
            timeout,
            capture_body: false,
        }
    }

    #[must_use]
    pub const fn post_json(url: Url, body: serde_json::Value, timeout: Duration) -> Self {
        Self {
            url,
            method: HttpMethod::Post,
            body: Some(body),
            timeout,
            capture_body: false,
        }
    }

    #[must_use]
    pub fn capture_body(mut self) -> Self {
        self.capture_body = true;
        self
    }
}

/// Executes a single probe. Implementations never fail: transport problems
/// come back as [`ProbeOutcome::Failed`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, index: usize, request: &ProbeRequest) -> ProbeResult;
}

/// [`Prober`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, index: usize, request: &ProbeRequest) -> ProbeResult {
        probe_once(&self.client, index, request).await
    }
}

/// Sends one request and times it until the body has been fully read.
pub async fn probe_once(client: &Client, index: usize, request: &ProbeRequest) -> ProbeResult {
    let start = Instant::now();
    let mut builder = client
        .request(request.method.into(), request.url.clone())
        .timeout(request.timeout);
    if let Some(body) = request.body.as_ref() {
        builder = builder.json(body);
    }

    let (outcome, body) = match builder.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match read_body(response, request.capture_body).await {
                Ok(body) => (ProbeOutcome::Status(status), body),
                Err(err) => (failure(&err), None),
            }
        }
        Err(err) => (failure(&err), None),
    };
    let latency = start.elapsed();

    debug!(
        "probe {} {} {} -> {:?} in {:?}",
        index,
        reqwest::Method::from(request.method),
        request.url,
        outcome,
        latency
    );

    ProbeResult {
        index,
        outcome,
        latency,
        body,
    }
}

fn failure(err: &reqwest::Error) -> ProbeOutcome {
    ProbeOutcome::Failed {
        kind: FailureKind::from_error(err),
        message: err.to_string(),
    }
}

async fn read_body(
    response: reqwest::Response,
    capture: bool,
) -> Result<Option<Vec<u8>>, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut captured = Vec::new();
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        if capture {
            captured.extend_from_slice(&bytes);
        }
    }
    Ok(capture.then_some(captured))
}
