use std::io::Write;
use std::sync::Arc;

use tracing::info;

use crate::args::PositiveUsize;
use crate::error::AppResult;
use crate::http::{ProbeRequest, run_concurrent, run_sequential};
use crate::metrics::{
    FailureKind, ProbeBatch, ProbeOutcome, ProbeResult, STATUS_OK, STATUS_TOO_MANY_REQUESTS, SummaryStatistics,
    summarize,
};

use super::super::console::{Console, Marker};
use super::super::summary::{count_lines, format_ms, latency_lines, share_lines};
use super::ScenarioContext;

pub(crate) const GET_PATH: &str = "api/get";

fn get_request(context: &ScenarioContext<'_>) -> AppResult<ProbeRequest> {
    Ok(ProbeRequest::get(
        context.config.endpoint(GET_PATH)?,
        context.config.request_timeout,
    ))
}

pub(crate) async fn run_throttling<W: Write>(
    context: &ScenarioContext<'_>,
    requests: usize,
    console: &mut Console<W>,
) -> AppResult<SummaryStatistics> {
    console.header("Test 1: Throttling (response time)")?;
    console.line(format!("Sending {} requests...", requests))?;
    console.blank()?;

    let request = get_request(context)?;
    let batch = run_sequential(context.prober.as_ref(), &request, requests).await;
    for result in batch.iter() {
        let line = match &result.outcome {
            ProbeOutcome::Status(code) => {
                let marker = if *code == STATUS_OK {
                    Marker::Ok
                } else {
                    Marker::Fail
                };
                format!(
                    "Request {:2}: {} {:6}ms (HTTP {})",
                    result.index,
                    console.mark(marker),
                    format_ms(result.latency),
                    code
                )
            }
            ProbeOutcome::Failed { kind, message } => {
                failure_line(console, result, *kind, message)
            }
        };
        console.line(line)?;
    }

    let summary = summarize(&batch);
    console.blank()?;
    for line in latency_lines(&summary) {
        console.line(line)?;
    }
    log_summary("throttling", &summary);
    Ok(summary)
}

pub(crate) async fn run_rate_limit<W: Write>(
    context: &ScenarioContext<'_>,
    requests: usize,
    console: &mut Console<W>,
) -> AppResult<SummaryStatistics> {
    console.header("Test 2: Rate limiting")?;
    console.line(format!("Sending {} requests quickly...", requests))?;
    console.blank()?;

    let request = get_request(context)?;
    let batch = run_sequential(context.prober.as_ref(), &request, requests).await;
    write_status_lines(console, &batch, false)?;

    let summary = summarize(&batch);
    console.blank()?;
    for line in share_lines(&summary) {
        console.line(line)?;
    }
    log_summary("rate-limit", &summary);
    Ok(summary)
}

pub(crate) async fn run_concurrent_burst<W: Write>(
    context: &ScenarioContext<'_>,
    requests: usize,
    max_parallel: PositiveUsize,
    console: &mut Console<W>,
) -> AppResult<SummaryStatistics> {
    console.header("Test 5: Concurrent requests")?;
    console.line(format!(
        "Sending {} requests in parallel (max {} at once)...",
        requests,
        max_parallel.get().min(requests.max(1))
    ))?;
    console.blank()?;

    let request = Arc::new(get_request(context)?);
    let batch = run_concurrent(Arc::clone(context.prober), request, requests, max_parallel).await?;
    write_status_lines(console, &batch, true)?;

    let summary = summarize(&batch);
    console.blank()?;
    for line in count_lines(&summary) {
        console.line(line)?;
    }
    log_summary("concurrent", &summary);
    Ok(summary)
}

fn write_status_lines<W: Write>(
    console: &mut Console<W>,
    batch: &ProbeBatch,
    with_latency: bool,
) -> AppResult<()> {
    for result in batch.iter() {
        let line = match &result.outcome {
            ProbeOutcome::Status(STATUS_OK) if with_latency => format!(
                "Request {:2}: {} 200 OK ({}ms)",
                result.index,
                console.mark(Marker::Ok),
                format_ms(result.latency)
            ),
            ProbeOutcome::Status(STATUS_OK) => format!(
                "Request {:2}: {} 200 OK",
                result.index,
                console.mark(Marker::Ok)
            ),
            ProbeOutcome::Status(STATUS_TOO_MANY_REQUESTS) => format!(
                "Request {:2}: {} 429 Rate Limited",
                result.index,
                console.mark(Marker::Fail)
            ),
            ProbeOutcome::Status(code) => format!(
                "Request {:2}: {} {}",
                result.index,
                console.mark(Marker::Unknown),
                code
            ),
            ProbeOutcome::Failed { kind, message } => {
                failure_line(console, result, *kind, message)
            }
        };
        console.line(line)?;
    }
    Ok(())
}

fn failure_line<W: Write>(
    console: &Console<W>,
    result: &ProbeResult,
    kind: FailureKind,
    message: &str,
) -> String {
    format!(
        "Request {:2}: {} Error ({}): {}",
        result.index,
        console.mark(Marker::Fail),
        kind.as_str(),
        message
    )
}

fn log_summary(scenario: &str, summary: &SummaryStatistics) {
    info!(
        "{} scenario: {} requests, {} ok, {} rate limited, {} other",
        scenario,
        summary.total,
        summary.successful,
        summary.rate_limited,
        summary.other()
    );
}
