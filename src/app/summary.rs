use std::time::Duration;

use crate::metrics::SummaryStatistics;

/// Divisor for fixed-point percentages stored in hundredths.
const PERCENT_DIVISOR: u64 = 100;
/// Rounding offset for fixed-point percentages.
const PERCENT_ROUNDING: u64 = 50;
const NS_PER_MS: u128 = 1_000_000;
const HALF_MS_NS: u128 = 500_000;

/// Whole milliseconds, rounded half up.
pub(crate) fn format_ms(duration: Duration) -> u128 {
    duration
        .as_nanos()
        .saturating_add(HALF_MS_NS)
        .checked_div(NS_PER_MS)
        .unwrap_or(0)
}

/// Whole percent from a share stored in hundredths of a percent.
pub(crate) fn whole_percent(share_x100: u64) -> u64 {
    share_x100
        .saturating_add(PERCENT_ROUNDING)
        .checked_div(PERCENT_DIVISOR)
        .unwrap_or(0)
}

pub(crate) fn latency_lines(summary: &SummaryStatistics) -> Vec<String> {
    let Some(latency) = summary.latency else {
        return vec!["No successful responses; latency statistics unavailable.".to_owned()];
    };
    vec![
        "Statistics:".to_owned(),
        format!("  Mean:    {:6}ms", format_ms(latency.mean)),
        format!("  Min:     {:6}ms", format_ms(latency.min)),
        format!("  Max:     {:6}ms", format_ms(latency.max)),
        format!("  Median:  {:6}ms", format_ms(latency.median)),
        format!(
            "  P90/P99: {}ms / {}ms",
            format_ms(latency.p90),
            format_ms(latency.p99)
        ),
    ]
}

/// Totals with percentages, as printed after sequential runs.
pub(crate) fn share_lines(summary: &SummaryStatistics) -> Vec<String> {
    let mut lines = vec![
        "Result:".to_owned(),
        format!(
            "  Successful:         {:3} ({}%)",
            summary.successful,
            whole_percent(summary.success_rate_x100())
        ),
        format!(
            "  Rate Limited (429): {:3} ({}%)",
            summary.rate_limited,
            whole_percent(summary.rate_limited_x100())
        ),
    ];
    lines.extend(other_line(summary));
    lines
}

/// Plain totals, as printed after concurrent runs.
pub(crate) fn count_lines(summary: &SummaryStatistics) -> Vec<String> {
    let mut lines = vec![
        "Result:".to_owned(),
        format!("  Successful:   {}", summary.successful),
        format!("  Rate Limited: {}", summary.rate_limited),
    ];
    lines.extend(other_line(summary));
    lines
}

fn other_line(summary: &SummaryStatistics) -> Option<String> {
    (summary.other() > 0).then(|| {
        format!(
            "  Other:        {} ({} errors, {} other status)",
            summary.other(),
            summary.failures,
            summary.other_status
        )
    })
}
