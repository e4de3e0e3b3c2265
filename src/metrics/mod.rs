//! Probe results, batches and their summary statistics.
mod histogram;
mod summary;
mod types;

#[cfg(test)]
mod tests;

pub use histogram::LatencyHistogram;
pub use summary::summarize;
pub use types::{
    FailureKind, LatencyStats, ProbeBatch, ProbeOutcome, ProbeResult, STATUS_OK,
    STATUS_TOO_MANY_REQUESTS, SummaryStatistics,
};
