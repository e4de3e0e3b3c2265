use super::*;
use std::time::Duration;

fn ok(index: usize, latency_ms: u64) -> ProbeResult {
    ProbeResult::new(
        index,
        ProbeOutcome::Status(STATUS_OK),
        Duration::from_millis(latency_ms),
    )
}

fn status(index: usize, code: u16) -> ProbeResult {
    ProbeResult::new(index, ProbeOutcome::Status(code), Duration::from_millis(1))
}

fn failed(index: usize) -> ProbeResult {
    ProbeResult::new(
        index,
        ProbeOutcome::Failed {
            kind: FailureKind::Connect,
            message: "connection refused".to_owned(),
        },
        Duration::from_millis(2),
    )
}

#[test]
fn summarize_odd_count_uses_middle_value() -> Result<(), String> {
    let batch = ProbeBatch::from_results(vec![ok(1, 30), ok(2, 10), ok(3, 20)]);
    let summary = summarize(&batch);
    let latency = summary.latency.ok_or("Expected latency stats")?;

    if latency.mean != Duration::from_millis(20) {
        return Err(format!("Unexpected mean: {:?}", latency.mean));
    }
    if latency.min != Duration::from_millis(10) || latency.max != Duration::from_millis(30) {
        return Err(format!(
            "Unexpected extrema: {:?} / {:?}",
            latency.min, latency.max
        ));
    }
    if latency.median != Duration::from_millis(20) {
        return Err(format!("Unexpected median: {:?}", latency.median));
    }
    Ok(())
}

#[test]
fn summarize_even_count_averages_middle_values() -> Result<(), String> {
    let batch = ProbeBatch::from_results(vec![ok(1, 40), ok(2, 10), ok(3, 30), ok(4, 20)]);
    let latency = summarize(&batch).latency.ok_or("Expected latency stats")?;

    if latency.median != Duration::from_millis(25) {
        return Err(format!("Unexpected median: {:?}", latency.median));
    }
    if latency.mean != Duration::from_millis(25) {
        return Err(format!("Unexpected mean: {:?}", latency.mean));
    }
    Ok(())
}

#[test]
fn summarize_without_successes_has_no_latency() -> Result<(), String> {
    let batch = ProbeBatch::from_results(vec![status(1, 429), failed(2), status(3, 500)]);
    let summary = summarize(&batch);
    if summary.latency.is_some() {
        return Err("Expected no latency figures".to_owned());
    }
    if summary.total != 3 {
        return Err(format!("Unexpected total: {}", summary.total));
    }
    Ok(())
}

#[test]
fn summarize_empty_batch() -> Result<(), String> {
    let summary = summarize(&ProbeBatch::default());
    if summary.total != 0 || summary.latency.is_some() {
        return Err(format!("Unexpected summary: {:?}", summary));
    }
    if summary.success_rate_x100() != 0 {
        return Err("Expected zero success rate".to_owned());
    }
    Ok(())
}

#[test]
fn summarize_counts_each_outcome_class() -> Result<(), String> {
    let batch = ProbeBatch::from_results(vec![
        ok(1, 5),
        status(2, 429),
        status(3, 429),
        status(4, 503),
        failed(5),
    ]);
    let summary = summarize(&batch);
    if summary.successful != 1 || summary.rate_limited != 2 {
        return Err(format!("Unexpected counts: {:?}", summary));
    }
    if summary.other_status != 1 || summary.failures != 1 || summary.other() != 2 {
        return Err(format!("Unexpected other counts: {:?}", summary));
    }
    if summary.success_rate_x100() != 2_000 || summary.rate_limited_x100() != 4_000 {
        return Err(format!(
            "Unexpected shares: {} / {}",
            summary.success_rate_x100(),
            summary.rate_limited_x100()
        ));
    }
    let latency = summary.latency.ok_or("Expected latency stats")?;
    if latency.mean != Duration::from_millis(5) {
        return Err("Latency must only cover successful probes".to_owned());
    }
    Ok(())
}

#[test]
fn summarize_is_idempotent() -> Result<(), String> {
    let batch = ProbeBatch::from_results(vec![ok(1, 12), status(2, 429), ok(3, 18)]);
    let first = summarize(&batch);
    let second = summarize(&batch);
    if first != second {
        return Err(format!("Summaries differ: {:?} vs {:?}", first, second));
    }
    Ok(())
}

#[test]
fn batch_orders_results_by_index() -> Result<(), String> {
    let batch = ProbeBatch::from_results(vec![ok(3, 1), ok(1, 1), ok(2, 1)]);
    let indexes: Vec<usize> = batch.iter().map(|result| result.index).collect();
    if indexes != vec![1, 2, 3] {
        return Err(format!("Unexpected order: {:?}", indexes));
    }
    Ok(())
}

#[test]
fn histogram_reports_tail_percentiles() -> Result<(), String> {
    let mut histogram = LatencyHistogram::new()?;
    for ms in 1..=100u64 {
        histogram.record(Duration::from_millis(ms))?;
    }
    let (p90, p99) = histogram.tail_percentiles();
    if p90 < Duration::from_millis(89) || p90 > Duration::from_millis(91) {
        return Err(format!("Unexpected p90: {:?}", p90));
    }
    if p99 < Duration::from_millis(98) || p99 > Duration::from_millis(100) {
        return Err(format!("Unexpected p99: {:?}", p99));
    }
    Ok(())
}
