use std::time::Duration;

/// Why a probe produced no HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connect,
    Other,
}

impl FailureKind {
    #[must_use]
    pub fn from_error(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_connect() {
            FailureKind::Connect
        } else {
            FailureKind::Other
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::Other => "transport",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Status(u16),
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// 1-based position in the batch.
    pub index: usize,
    pub outcome: ProbeOutcome,
    pub latency: Duration,
    /// Response body, only when the request asked for it.
    pub body: Option<Vec<u8>>,
}

impl ProbeResult {
    #[must_use]
    pub const fn new(index: usize, outcome: ProbeOutcome, latency: Duration) -> Self {
        Self {
            index,
            outcome,
            latency,
            body: None,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Status(STATUS_OK))
    }

    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Status(STATUS_TOO_MANY_REQUESTS))
    }
}

pub const STATUS_OK: u16 = 200;
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Results of one scenario run, always ordered by [`ProbeResult::index`].
#[derive(Debug, Clone, Default)]
pub struct ProbeBatch {
    results: Vec<ProbeResult>,
}

impl ProbeBatch {
    /// Builds a batch from results in any order.
    #[must_use]
    pub fn from_results(mut results: Vec<ProbeResult>) -> Self {
        results.sort_by_key(|result| result.index);
        Self { results }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeResult> {
        self.results.iter()
    }
}

/// Latency figures over successful probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
    pub median: Duration,
    pub p90: Duration,
    pub p99: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStatistics {
    pub total: usize,
    /// HTTP 200 responses.
    pub successful: usize,
    /// HTTP 429 responses.
    pub rate_limited: usize,
    /// Any other HTTP status.
    pub other_status: usize,
    /// Transport failures (no HTTP status at all).
    pub failures: usize,
    /// `None` when no probe succeeded.
    pub latency: Option<LatencyStats>,
}

impl SummaryStatistics {
    #[must_use]
    pub const fn other(&self) -> usize {
        self.other_status.saturating_add(self.failures)
    }

    /// Share of successful probes in hundredths of a percent.
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        share_x100(self.successful, self.total)
    }

    /// Share of rate-limited probes in hundredths of a percent.
    #[must_use]
    pub fn rate_limited_x100(&self) -> u64 {
        share_x100(self.rate_limited, self.total)
    }
}

fn share_x100(part: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::try_from(part)
        .unwrap_or(u128::MAX)
        .saturating_mul(10_000)
        .checked_div(u128::try_from(total).unwrap_or(u128::MAX))
        .unwrap_or(0);
    u64::try_from(scaled).map_or(u64::MAX, |value| value)
}
