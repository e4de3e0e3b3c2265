//! The individual steps of the suite. Each one probes the API, prints its
//! section of the report and returns what it observed.
mod batch;
mod exchange;

use std::io::Write;
use std::sync::Arc;

use crate::config::{ScenarioPlan, SuiteConfig};
use crate::error::AppResult;
use crate::http::Prober;
use crate::metrics::SummaryStatistics;

use super::console::Console;

pub use exchange::{DatabaseReport, ExchangeOutcome, list_messages, save_message};

/// What a scenario observed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioReport {
    Throttling(SummaryStatistics),
    RateLimit(SummaryStatistics),
    Post(ExchangeOutcome<serde_json::Value>),
    Database(DatabaseReport),
    Concurrent(SummaryStatistics),
}

/// Shared inputs for every scenario in one run.
pub(crate) struct ScenarioContext<'run> {
    pub(crate) config: &'run SuiteConfig,
    pub(crate) prober: &'run Arc<dyn Prober>,
}

pub(crate) async fn run_scenario<W: Write>(
    context: &ScenarioContext<'_>,
    plan: ScenarioPlan,
    console: &mut Console<W>,
) -> AppResult<ScenarioReport> {
    match plan {
        ScenarioPlan::Throttling { requests } => Ok(ScenarioReport::Throttling(
            batch::run_throttling(context, requests, console).await?,
        )),
        ScenarioPlan::RateLimit { requests } => Ok(ScenarioReport::RateLimit(
            batch::run_rate_limit(context, requests, console).await?,
        )),
        ScenarioPlan::Post => Ok(ScenarioReport::Post(
            exchange::run_post(context, console).await?,
        )),
        ScenarioPlan::Database => Ok(ScenarioReport::Database(
            exchange::run_database(context, console).await?,
        )),
        ScenarioPlan::Concurrent {
            requests,
            max_parallel,
        } => Ok(ScenarioReport::Concurrent(
            batch::run_concurrent_burst(context, requests, max_parallel, console).await?,
        )),
    }
}
