use std::io::Write;
use std::sync::Arc;

use tokio::time::{Instant, sleep};
use tracing::{error, info};

use crate::config::SuiteConfig;
use crate::error::AppResult;
use crate::http::Prober;

use super::console::Console;
use super::health::{HealthCheck, check_health, report_health};
use super::scenarios::{ScenarioContext, ScenarioReport, run_scenario};

const SUITE_TITLE: &str = "API Throttling - Probe Client";
const CLOSING_TITLE: &str = "Tests complete!";

/// Everything one run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteReport {
    pub health: HealthCheck,
    /// One entry per executed scenario, in execution order.
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// `true` when the health check stopped the run before any scenario.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        !matches!(self.health, HealthCheck::Online(_))
    }
}

/// Runs the health check and then every configured scenario, writing the
/// report to `console`.
///
/// Probe failures never fail the run; they show up in the report.
///
/// # Errors
///
/// Returns an error when writing the report fails, an endpoint URL cannot be
/// built, or a concurrent worker task dies.
pub async fn run_suite<W: Write>(
    config: &SuiteConfig,
    prober: Arc<dyn Prober>,
    console: &mut Console<W>,
) -> AppResult<SuiteReport> {
    let started = Instant::now();
    console.banner(SUITE_TITLE)?;
    info!("Probing {}", config.base_url);

    let health = check_health(prober.as_ref(), config).await?;
    report_health(console, &health)?;
    if !matches!(health, HealthCheck::Online(_)) {
        error!("API health check failed; skipping all scenarios");
        console.flush()?;
        return Ok(SuiteReport {
            health,
            scenarios: Vec::new(),
        });
    }
    console.flush()?;

    let context = ScenarioContext {
        config,
        prober: &prober,
    };
    let mut scenarios = Vec::with_capacity(config.scenarios.len());
    for (position, plan) in config.scenarios.iter().enumerate() {
        if position > 0 && !config.pause.is_zero() {
            sleep(config.pause).await;
        }
        info!("Running {} scenario", plan.kind().as_str());
        scenarios.push(run_scenario(&context, *plan, console).await?);
        console.flush()?;
    }

    console.blank()?;
    console.banner(CLOSING_TITLE)?;
    console.flush()?;
    info!(
        "Suite finished: {} scenarios in {:?}",
        scenarios.len(),
        started.elapsed()
    );

    Ok(SuiteReport { health, scenarios })
}
