use std::time::Duration;

use tracing::warn;

use super::histogram::LatencyHistogram;
use super::types::{LatencyStats, ProbeBatch, ProbeOutcome, SummaryStatistics};

/// Aggregates a batch into counts and latency statistics. Pure: the batch is
/// only read, so repeated calls give identical results.
#[must_use]
pub fn summarize(batch: &ProbeBatch) -> SummaryStatistics {
    let mut successful = 0usize;
    let mut rate_limited = 0usize;
    let mut other_status = 0usize;
    let mut failures = 0usize;
    let mut latencies: Vec<Duration> = Vec::with_capacity(batch.len());

    for result in batch.iter() {
        match result.outcome {
            ProbeOutcome::Status(_) if result.is_success() => {
                successful = successful.saturating_add(1);
                latencies.push(result.latency);
            }
            ProbeOutcome::Status(_) if result.is_rate_limited() => {
                rate_limited = rate_limited.saturating_add(1);
            }
            ProbeOutcome::Status(_) => {
                other_status = other_status.saturating_add(1);
            }
            ProbeOutcome::Failed { .. } => {
                failures = failures.saturating_add(1);
            }
        }
    }

    SummaryStatistics {
        total: batch.len(),
        successful,
        rate_limited,
        other_status,
        failures,
        latency: latency_stats(latencies),
    }
}

fn latency_stats(mut latencies: Vec<Duration>) -> Option<LatencyStats> {
    latencies.sort_unstable();
    let min = *latencies.first()?;
    let max = *latencies.last()?;

    let count = u128::try_from(latencies.len()).ok()?;
    let total: u128 = latencies.iter().map(Duration::as_nanos).sum();
    let mean = duration_from_nanos(total.checked_div(count)?);

    let (p90, p99) = tail_percentiles(&latencies);

    Some(LatencyStats {
        mean,
        min,
        max,
        median: median(&latencies)?,
        p90,
        p99,
    })
}

/// Middle value of a sorted slice; the mean of the two middle values when the length is even.
fn median(sorted: &[Duration]) -> Option<Duration> {
    let mid = sorted.len().checked_div(2)?;
    let upper = *sorted.get(mid)?;
    if sorted.len().checked_rem(2) == Some(1) {
        return Some(upper);
    }
    let lower = *sorted.get(mid.checked_sub(1)?)?;
    let sum = lower.as_nanos().checked_add(upper.as_nanos())?;
    Some(duration_from_nanos(sum.checked_div(2)?))
}

fn tail_percentiles(latencies: &[Duration]) -> (Duration, Duration) {
    let mut histogram = match LatencyHistogram::new() {
        Ok(histogram) => histogram,
        Err(err) => {
            warn!("{}", err);
            return (Duration::ZERO, Duration::ZERO);
        }
    };
    for latency in latencies {
        if let Err(err) = histogram.record(*latency) {
            warn!("{}", err);
        }
    }
    histogram.tail_percentiles()
}

fn duration_from_nanos(nanos: u128) -> Duration {
    u64::try_from(nanos).map_or(Duration::MAX, Duration::from_nanos)
}
